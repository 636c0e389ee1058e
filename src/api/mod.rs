//! HTTP API over the plant document library.
//!
//! Provides two GET endpoints:
//! - `/api/json-files`: library listing, or one document with `?file=`
//! - `/api/scene?file=`: the composed drawable set of one document

mod handlers;
mod types;

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;

use crate::library::JsonLibrary;

pub use types::{ErrorResponse, JsonFilesResponse, SceneQuery, SceneResponse};

/// Immutable application state shared across all request handlers.
///
/// Wrapped in `Arc`; handlers only read from the library directory, so no
/// locks are needed.
pub struct AppState {
    /// Directory served by the listing endpoint.
    pub library: JsonLibrary,
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/json-files", get(handlers::get_json_files))
        .route("/api/scene", get(handlers::get_scene))
        .with_state(state)
}

/// Binds to the given address and serves the API until the process ends.
///
/// # Errors
///
/// Returns an error if the TCP listener cannot bind to `addr` or the server
/// stops with an IO failure.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("API server listening on http://{addr}");
    axum::serve(listener, app).await
}
