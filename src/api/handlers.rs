//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use super::AppState;
use super::types::{
    ContentResponse, ErrorResponse, JsonFilesQuery, JsonFilesResponse, SceneQuery, SceneResponse,
};
use crate::error::ViewerError;
use crate::model::IngestedPlant;
use crate::scene;

type ApiError = (StatusCode, Json<ErrorResponse>);

/// Lists the library, or returns one document.
///
/// `GET /api/json-files` or `?file=` → 200 + `{files: [{name, path}]}`
/// `GET /api/json-files?file=NAME` → 200 + `{content}`, 404 if absent,
/// 500 for unreadable or malformed files
pub async fn get_json_files(
    State(state): State<Arc<AppState>>,
    Query(query): Query<JsonFilesQuery>,
) -> Response {
    match query.file.filter(|name| !name.is_empty()) {
        Some(name) => match state.library.read(&name) {
            Ok(content) => Json(ContentResponse { content }).into_response(),
            Err(e) => error_response(&name, &e).into_response(),
        },
        None => match state.library.list() {
            Ok(files) => Json(JsonFilesResponse { files }).into_response(),
            Err(e) => error_response(&state.library.dir().display().to_string(), &e)
                .into_response(),
        },
    }
}

/// Composes one library document under the requested visibility.
///
/// `GET /api/scene?file=NAME` → 200 + `SceneResponse`
/// `GET /api/scene?file=NAME&silos=false` → silos left out
/// `GET /api/scene` → 400 + `ErrorResponse`
pub async fn get_scene(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SceneQuery>,
) -> Result<Json<SceneResponse>, ApiError> {
    let Some(name) = query.file.as_deref().filter(|name| !name.is_empty()) else {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "missing `file` parameter".to_string(),
            }),
        ));
    };

    let document = state
        .library
        .read(name)
        .map_err(|e| error_response(name, &e))?;
    let plant = IngestedPlant::from_value(&document);
    let composed = scene::compose(&plant, &query.visibility());

    Ok(Json(SceneResponse {
        summary: composed.summary(),
        drawables: composed.drawables,
        dropped: plant.dropped,
    }))
}

/// Maps a library error to the endpoint's status and opaque message.
fn error_response(requested: &str, err: &ViewerError) -> ApiError {
    match err {
        ViewerError::NotFound(_) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "File not found".to_string(),
            }),
        ),
        other => {
            log::error!("error processing {requested}: {other}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to process request".to_string(),
                }),
            )
        }
    }
}
