//! Tool forwarding handlers, one thin entry per operation.
//!
//! Bodies are taken as raw bytes so that a body the server cannot buffer
//! (for example one over [`crate::MAX_BODY_BYTES`]) still answers with the
//! JSON failure envelope instead of axum's plain-text rejection.

use std::sync::Arc;

use adgen_core::Operation;
use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::State;
use axum::Json;
use serde_json::Value;
use tracing::error;

use crate::error::AppError;
use crate::services::forward::forward_and_translate;
use crate::AppState;

type ProxyResult = Result<Json<Value>, AppError>;
type RawBody = Result<Bytes, BytesRejection>;

async fn relay(state: &AppState, op: Operation, body: RawBody) -> ProxyResult {
    let body = body.map_err(|rejection| {
        error!("{}: failed to read request body: {}", op.label(), rejection);
        AppError::Internal(rejection.body_text())
    })?;
    forward_and_translate(state, op, &body).await.map(Json)
}

/// Tool 1: text to image.
pub async fn generate_image(State(state): State<Arc<AppState>>, body: RawBody) -> ProxyResult {
    relay(&state, Operation::GenerateImage, body).await
}

/// Tool 2: image to video. Only `ai_image` is forwarded.
pub async fn animate_image(State(state): State<Arc<AppState>>, body: RawBody) -> ProxyResult {
    relay(&state, Operation::AnimateImage, body).await
}

/// Tool 3: avatar holding the product, image plus video.
pub async fn generate_avatar(State(state): State<Arc<AppState>>, body: RawBody) -> ProxyResult {
    relay(&state, Operation::GenerateAvatar, body).await
}

/// Tool 4: image enhancement.
pub async fn enhance_image(State(state): State<Arc<AppState>>, body: RawBody) -> ProxyResult {
    relay(&state, Operation::EnhanceImage, body).await
}
