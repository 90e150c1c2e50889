//! Data transfer objects for HTTP message serialization.

use serde::Serialize;
use serde_json::Value;

/// Body of `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub colab_api: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colab_response: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HealthReport {
    pub fn healthy(colab_response: Value) -> Self {
        Self {
            status: "healthy",
            colab_api: "connected",
            colab_response: Some(colab_response),
            error: None,
        }
    }

    pub fn unhealthy(error: impl Into<String>) -> Self {
        Self {
            status: "unhealthy",
            colab_api: "disconnected",
            colab_response: None,
            error: Some(error.into()),
        }
    }
}
