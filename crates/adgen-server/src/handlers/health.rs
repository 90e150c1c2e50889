//! Remote reachability check.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use tracing::warn;

use crate::dto::HealthReport;
use crate::AppState;

/// Fetches the remote root and reports whether it answered with JSON.
pub async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<HealthReport>) {
    match state.remote.check_root(state.timeouts.health()).await {
        Ok(colab_response) => (StatusCode::OK, Json(HealthReport::healthy(colab_response))),
        Err(e) => {
            warn!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthReport::unhealthy(e.to_string())),
            )
        }
    }
}
