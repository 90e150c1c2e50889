//! HTTP front-end: tool pages plus the forwarding routes to the remote API.
//!
//! The binary in `main.rs` only loads settings and serves [`build_app`];
//! everything else lives here so integration tests drive the same router.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod services;

use std::any::Any;
use std::sync::Arc;
use std::time::Duration;

use adgen_config::Settings;
use adgen_core::{Operation, Timeouts};
use adgen_remote::{BuildError, RemoteClient};
use axum::body::Body;
use axum::extract::DefaultBodyLimit;
use axum::http::{Request, Response};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::error::AppError;

/// Largest inbound body accepted on the forwarding routes.
///
/// Tool pages post base64 data URLs of full-size photos, which routinely
/// exceed axum's 2 MB default.
pub const MAX_BODY_BYTES: usize = 64 * 1024 * 1024;

/// Shared server state accessible from all handlers.
pub struct AppState {
    pub remote: RemoteClient,
    pub timeouts: Timeouts,
}

impl AppState {
    pub fn new(settings: &Settings) -> Result<Self, BuildError> {
        Ok(Self {
            remote: RemoteClient::new(settings.remote_url.clone())?,
            timeouts: settings.timeouts.clone(),
        })
    }
}

/// Builds the full application: pages, forwarding routes, health and middleware.
pub fn build_app(state: Arc<AppState>) -> Router {
    let forwarding = Router::new()
        .route(
            Operation::GenerateImage.path(),
            post(handlers::proxy::generate_image),
        )
        .route(
            Operation::AnimateImage.path(),
            post(handlers::proxy::animate_image),
        )
        .route(
            Operation::GenerateAvatar.path(),
            post(handlers::proxy::generate_avatar),
        )
        .route(
            Operation::EnhanceImage.path(),
            post(handlers::proxy::enhance_image),
        )
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES));

    let routes = Router::new()
        .merge(adgen_pages::routes::<Arc<AppState>>())
        .merge(forwarding)
        .route("/health", get(handlers::health::health))
        .fallback(adgen_pages::not_found)
        .with_state(state);

    with_middleware(routes)
}

/// Wraps a router in the middleware stack (applied bottom-up).
pub fn with_middleware(router: Router) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods(AnyOrigin)
        .allow_headers(AnyOrigin);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request<Body>| {
            let request_id = req
                .headers()
                .get("x-request-id")
                .and_then(|v| v.to_str().ok())
                .unwrap_or("-");
            tracing::info_span!(
                "request",
                method = %req.method(),
                uri = %req.uri(),
                request_id = %request_id,
            )
        })
        .on_response(|res: &Response<Body>, latency: Duration, _span: &tracing::Span| {
            info!(
                latency = %format!("{} ms", latency.as_millis()),
                status = %res.status().as_u16(),
                "finished processing request"
            );
        });

    router
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(trace_layer)
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(cors)
}

/// Last-resort handler: a panic in any handler becomes a 500 failure envelope.
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> axum::response::Response {
    let details = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic".to_string()
    };
    error!("Handler panicked: {}", details);

    AppError::Internal("Internal server error".into()).into_response()
}
