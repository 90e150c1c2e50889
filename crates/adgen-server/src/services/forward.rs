//! The forward-and-translate operation behind every tool route.
//!
//! Parses the inbound body, relays the operation's payload to the remote
//! with the operation's timeout, and turns the outcome into either the
//! remote's JSON body or an [`AppError`].

use adgen_core::Operation;
use serde_json::Value;
use tracing::{error, info};

use crate::error::AppError;
use crate::AppState;

/// Relays one inbound request body to the remote and returns its JSON answer.
pub async fn forward_and_translate(
    state: &AppState,
    op: Operation,
    raw_body: &[u8],
) -> Result<Value, AppError> {
    let body: Value = serde_json::from_slice(raw_body).map_err(|e| {
        error!("{}: unreadable request body: {}", op.label(), e);
        AppError::Internal(e.to_string())
    })?;

    info!("Received request for {}: {}", op.label(), op.summary(&body));
    if let Some(notice) = op.wait_notice() {
        info!("{}", notice);
    }

    let payload = op.shape_payload(body).map_err(|e| {
        error!("{}: {}", op.label(), e);
        AppError::Internal(e.to_string())
    })?;

    let timeout = state.timeouts.for_operation(op);
    match state.remote.forward(op, timeout, &payload).await {
        Ok(reply) => {
            info!("{} response status: {}", op.label(), reply.status);
            Ok(reply.body)
        }
        Err(failure) => {
            error!("{} failed: {}", op.label(), failure);
            Err(AppError::from_failure(op, &failure))
        }
    }
}
