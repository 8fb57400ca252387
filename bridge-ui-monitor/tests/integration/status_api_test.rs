//! Status server over a real socket and through the router directly

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
};
use bridge_ui_monitor::api::create_app;
use bridge_ui_monitor::store::{FileResultStore, MemoryResultStore, ResultStore};
use bridge_ui_monitor::types::CheckResult;
use bridge_ui_monitor::AppState;
use chrono::{Duration, Utc};
use serde_json::Value;
use tower::ServiceExt;

use crate::support::http::spawn_status_server;

async fn get_json(url: &str) -> (reqwest::StatusCode, Value) {
    let response = reqwest::get(url).await.unwrap();
    let status = response.status();
    let body = response.json::<Value>().await.unwrap();
    (status, body)
}

#[tokio::test]
async fn test_status_right_after_run() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileResultStore::new(dir.path().join("result.json")));
    store.save(&CheckResult::passed(Utc::now())).await.unwrap();

    let server = spawn_status_server(store).await;
    let (status, body) = get_json(&server.status_url()).await;

    assert_eq!(status, reqwest::StatusCode::OK);
    assert_eq!(body["ok"], true);
    assert_eq!(body["timeDiff"], 0);
    assert!(body["completedAt"].is_string());
    assert!(body.get("error").is_none());

    server.stop().await;
}

#[tokio::test]
async fn test_status_ten_seconds_later_includes_error() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileResultStore::new(dir.path().join("result.json")));
    store
        .save(&CheckResult::failed(
            Utc::now() - Duration::seconds(10),
            "main page: returned not-OK statusCode: 503",
        ))
        .await
        .unwrap();

    let server = spawn_status_server(store).await;
    let (status, body) = get_json(&server.status_url()).await;

    assert_eq!(status, reqwest::StatusCode::OK);
    assert_eq!(body["ok"], false);
    assert_eq!(body["error"], "main page: returned not-OK statusCode: 503");
    let time_diff = body["timeDiff"].as_i64().unwrap();
    assert!((10..=11).contains(&time_diff), "timeDiff = {time_diff}");

    server.stop().await;
}

#[tokio::test]
async fn test_status_without_record_is_500() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileResultStore::new(dir.path().join("missing.json")));

    let server = spawn_status_server(store).await;
    let (status, body) = get_json(&server.status_url()).await;

    assert_eq!(status, reqwest::StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "No check result recorded yet");
    // パスは外部に漏らさない
    assert!(!body.to_string().contains("missing.json"));

    server.stop().await;
}

#[tokio::test]
async fn test_status_with_malformed_record_is_500() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("result.json");
    std::fs::write(&path, "{\"ok\": tru").unwrap();

    let server = spawn_status_server(Arc::new(FileResultStore::new(&path))).await;
    let (status, body) = get_json(&server.status_url()).await;

    assert_eq!(status, reqwest::StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Stored check result is malformed");

    server.stop().await;
}

#[tokio::test]
async fn test_status_rereads_record_per_request() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("result.json");
    let store = Arc::new(FileResultStore::new(&path));
    store.save(&CheckResult::passed(Utc::now())).await.unwrap();

    let server = spawn_status_server(store.clone()).await;
    let (_, first) = get_json(&server.status_url()).await;
    assert_eq!(first["ok"], true);

    store
        .save(&CheckResult::failed(Utc::now(), "react script: url returned not-OK statusCode: 404"))
        .await
        .unwrap();

    let (_, second) = get_json(&server.status_url()).await;
    assert_eq!(second["ok"], false);
    assert_eq!(
        second["error"],
        "react script: url returned not-OK statusCode: 404"
    );

    server.stop().await;
}

#[tokio::test]
async fn test_router_serves_memory_store() {
    let store = Arc::new(MemoryResultStore::new());
    store
        .save(&CheckResult::passed(Utc::now() - Duration::seconds(90)))
        .await
        .unwrap();
    let app = create_app(AppState { store });

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["ok"], true);
    assert!(json["timeDiff"].as_i64().unwrap() >= 90);
}

#[tokio::test]
async fn test_router_rejects_unknown_path() {
    let app = create_app(AppState {
        store: Arc::new(MemoryResultStore::new()),
    });

    let response = app
        .oneshot(Request::builder().uri("/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
