//! Integration tests for the HTTP API feature.

#![cfg(feature = "api")]

mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::util::ServiceExt;

use plant_viewer::api::{AppState, router};
use plant_viewer::library::JsonLibrary;

async fn get_json(state: Arc<AppState>, uri: &str) -> (StatusCode, serde_json::Value) {
    let app = router(state);
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

fn state_for(dir: &std::path::Path) -> Arc<AppState> {
    Arc::new(AppState {
        library: JsonLibrary::new(dir),
    })
}

#[tokio::test]
async fn empty_library_lists_nothing() {
    let tmp = tempfile::tempdir().unwrap();
    let (status, json) = get_json(state_for(tmp.path()), "/api/json-files").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, serde_json::json!({ "files": [] }));
}

#[tokio::test]
async fn nonexistent_library_lists_nothing() {
    let tmp = tempfile::tempdir().unwrap();
    let (status, json) =
        get_json(state_for(&tmp.path().join("json-files")), "/api/json-files").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, serde_json::json!({ "files": [] }));
}

#[tokio::test]
async fn traversal_is_sanitized_to_basename() {
    let tmp = tempfile::tempdir().unwrap();
    let lib = tmp.path().join("json-files");
    std::fs::create_dir(&lib).unwrap();
    common::write_file(tmp.path(), "passwd", "{}");

    let (status, json) = get_json(state_for(&lib), "/api/json-files?file=../passwd").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "File not found");

    let (status, _) = get_json(state_for(&lib), "/api/json-files?file=../../etc/passwd").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn file_content_matches_document() {
    let tmp = tempfile::tempdir().unwrap();
    let document = common::mixed_plant();
    common::write_file(
        tmp.path(),
        "unit3.json",
        &serde_json::to_string(&document).unwrap(),
    );

    let (status, json) = get_json(state_for(tmp.path()), "/api/json-files?file=unit3.json").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["content"], document);
}

#[tokio::test]
async fn scene_endpoint_composes_library_file() {
    let tmp = tempfile::tempdir().unwrap();
    common::write_file(
        tmp.path(),
        "unit3.json",
        &serde_json::to_string(&common::mixed_plant()).unwrap(),
    );

    let (status, json) = get_json(
        state_for(tmp.path()),
        "/api/scene?file=unit3.json&equipment=false",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["summary"]["equipment"], 0);
    assert_eq!(json["summary"]["silos"], 3);
    assert_eq!(json["drawables"].as_array().map(Vec::len), Some(7));
    assert_eq!(json["drawables"][0]["primitive"]["kind"], "box");
    assert_eq!(json["dropped"][0]["reason"]["kind"], "no_silo_footprint");

    let (status, _) = get_json(state_for(tmp.path()), "/api/scene?file=missing.json").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
