#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use adgen_config::Settings;
use adgen_core::Timeouts;
use adgen_server::{build_app, AppState};
use axum::body::Body;
use axum::http::{header, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

/// Serves `remote` on an ephemeral local port and returns its base URL.
pub async fn spawn_remote(remote: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, remote).await.unwrap();
    });
    format!("http://{addr}")
}

/// Returns a base URL nothing is listening on.
pub async fn closed_remote() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

/// Builds the application against `remote_url` with default timeouts.
pub fn build_test_app(remote_url: &str) -> Router {
    build_test_app_with(remote_url, Timeouts::default())
}

/// Builds the application against `remote_url` with the given timeouts.
pub fn build_test_app_with(remote_url: &str, timeouts: Timeouts) -> Router {
    let settings = Settings::new(remote_url).unwrap().with_timeouts(timeouts);
    build_app(Arc::new(AppState::new(&settings).unwrap()))
}

/// Timeouts short enough to exercise the timeout path quickly.
pub fn short_timeouts() -> Timeouts {
    Timeouts::uniform(Duration::from_millis(300))
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    post_raw(app, uri, body.to_string()).await
}

pub async fn post_raw(app: Router, uri: &str, body: impl Into<String>) -> Response<Body> {
    let request = Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.into()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
