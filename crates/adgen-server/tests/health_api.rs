//! Integration tests for `GET /health`.

mod common;

use std::time::Duration;

use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use common::{body_json, build_test_app, build_test_app_with, closed_remote, short_timeouts, spawn_remote};
use serde_json::json;

#[tokio::test]
async fn reachable_remote_is_healthy() {
    let remote = spawn_remote(Router::new().route(
        "/",
        get(|| async { r#"{"status": "running", "gpu": "T4"}"# }),
    ))
    .await;
    let app = build_test_app(&remote);

    let response = common::get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({
            "status": "healthy",
            "colab_api": "connected",
            "colab_response": {"status": "running", "gpu": "T4"}
        })
    );
}

#[tokio::test]
async fn unreachable_remote_is_unhealthy() {
    let remote = closed_remote().await;
    let app = build_test_app(&remote);

    let response = common::get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let json = body_json(response).await;
    assert_eq!(json["status"], "unhealthy");
    assert_eq!(json["colab_api"], "disconnected");
    assert!(json["error"].is_string());
    assert!(json.get("colab_response").is_none());
}

#[tokio::test]
async fn non_json_root_is_unhealthy() {
    let remote = spawn_remote(Router::new().route("/", get(|| async { "ngrok tunnel offline" }))).await;
    let app = build_test_app(&remote);

    let response = common::get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body_json(response).await["status"], "unhealthy");
}

#[tokio::test]
async fn slow_remote_is_unhealthy() {
    let remote = spawn_remote(Router::new().route(
        "/",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(3)).await;
            "{}"
        }),
    ))
    .await;
    let app = build_test_app_with(&remote, short_timeouts());

    let response = common::get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let json = body_json(response).await;
    assert_eq!(json["status"], "unhealthy");
    assert_eq!(json["error"], "request timed out after 300 milliseconds");
}
