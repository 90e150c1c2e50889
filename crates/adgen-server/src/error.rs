//! Application error types and Axum response conversion.

use adgen_core::{FailureEnvelope, Operation, RemoteFailure};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

/// Failures of a forwarding route, each tied to one HTTP status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// The remote did not answer in time (504).
    Timeout(String),
    /// The remote could not be reached (503).
    Unavailable(String),
    /// Anything else, including bad remote bodies (500).
    Internal(String),
}

impl AppError {
    /// Translates a remote failure into the route's caller-facing error.
    pub fn from_failure(op: Operation, failure: &RemoteFailure) -> Self {
        let message = op.failure_message(failure);
        match failure {
            RemoteFailure::Timeout(_) => AppError::Timeout(message),
            RemoteFailure::Unreachable(_) => AppError::Unavailable(message),
            RemoteFailure::EmptyBody
            | RemoteFailure::MalformedBody { .. }
            | RemoteFailure::Other(_) => AppError::Internal(message),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            AppError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            AppError::Timeout(msg) | AppError::Unavailable(msg) | AppError::Internal(msg) => msg,
        };
        (status, Json(FailureEnvelope::new(message))).into_response()
    }
}
