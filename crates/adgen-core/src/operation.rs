//! The forwarding operations exposed by the front-end.
//!
//! Each operation is a thin configuration entry over the shared
//! forward-and-translate path: which remote path it hits, how long it may
//! wait, how the inbound body is reshaped, and what callers are told when
//! the remote misbehaves.

use std::time::Duration;

use serde_json::{json, Value};
use thiserror::Error;

use crate::failure::{humanize_budget, preview, RemoteFailure};
use crate::PREVIEW_CHARS;

const SUMMARY_CHARS: usize = 50;
const UNREACHABLE_MESSAGE: &str = "Cannot connect to Colab API. Make sure Colab is running.";

/// Errors raised while reshaping an inbound body for the remote.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PayloadError {
    /// The inbound body parsed as JSON but is not an object.
    #[error("request body must be a JSON object, got {0}")]
    NotAnObject(&'static str),
}

/// A forwarding route: one inbound endpoint relayed to one remote endpoint.
///
/// | Operation | Remote path | Timeout | Body checks |
/// |-----------|-------------|---------|-------------|
/// | `GenerateImage` | `/api/generate-image` | 120s | no |
/// | `AnimateImage` | `/api/animate-image` | 600s | yes |
/// | `GenerateAvatar` | `/api/generate-avatar` | 600s | no |
/// | `EnhanceImage` | `/api/enhance-image` | 120s | yes |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Text to image synthesis.
    GenerateImage,
    /// Image to video animation.
    AnimateImage,
    /// Avatar holding the product: image plus video.
    GenerateAvatar,
    /// Image to enhanced image.
    EnhanceImage,
}

impl Operation {
    /// Every operation, in tool order.
    pub const ALL: [Operation; 4] = [
        Operation::GenerateImage,
        Operation::AnimateImage,
        Operation::GenerateAvatar,
        Operation::EnhanceImage,
    ];

    /// Path of this operation, identical on the front-end and the remote.
    pub fn path(&self) -> &'static str {
        match self {
            Operation::GenerateImage => "/api/generate-image",
            Operation::AnimateImage => "/api/animate-image",
            Operation::GenerateAvatar => "/api/generate-avatar",
            Operation::EnhanceImage => "/api/enhance-image",
        }
    }

    /// Returns a human-readable label for logging.
    pub fn label(&self) -> &'static str {
        match self {
            Operation::GenerateImage => "Tool 1 (Generate Image)",
            Operation::AnimateImage => "Tool 2 (Video Animation)",
            Operation::GenerateAvatar => "Tool 3 (Avatar Product)",
            Operation::EnhanceImage => "Tool 4 (Image Enhancement)",
        }
    }

    /// How long the remote gets to answer before the call is abandoned.
    pub fn default_timeout(&self) -> Duration {
        match self {
            Operation::GenerateImage | Operation::EnhanceImage => Duration::from_secs(120),
            Operation::AnimateImage | Operation::GenerateAvatar => Duration::from_secs(600),
        }
    }

    /// Whether empty and non-JSON remote bodies get their own diagnosis.
    pub fn checks_body(&self) -> bool {
        matches!(self, Operation::AnimateImage | Operation::EnhanceImage)
    }

    /// Derives the body sent to the remote from the inbound body.
    ///
    /// Animation only forwards `ai_image` (null when absent); every other
    /// operation forwards the body untouched.
    pub fn shape_payload(&self, body: Value) -> Result<Value, PayloadError> {
        let mut fields = match body {
            Value::Object(fields) => fields,
            other => return Err(PayloadError::NotAnObject(json_kind(&other))),
        };

        match self {
            Operation::AnimateImage => {
                let image = fields.remove("ai_image").unwrap_or(Value::Null);
                Ok(json!({ "ai_image": image }))
            }
            _ => Ok(Value::Object(fields)),
        }
    }

    /// One-line description of an inbound body, built from selected fields.
    pub fn summary(&self, body: &Value) -> String {
        match self {
            Operation::GenerateImage => {
                let description = str_field(body, "description").unwrap_or("No description");
                format!("{}...", preview(description, SUMMARY_CHARS))
            }
            Operation::AnimateImage => "video animation".to_string(),
            Operation::GenerateAvatar => {
                let avatar = match body.get("avatar_id") {
                    Some(Value::String(id)) => id.clone(),
                    Some(Value::Null) | None => "none".to_string(),
                    Some(other) => other.to_string(),
                };
                format!("avatar #{avatar}")
            }
            Operation::EnhanceImage => {
                let description =
                    str_field(body, "description").unwrap_or("professional product photography");
                let strength = body.get("strength").cloned().unwrap_or_else(|| json!(0.75));
                format!(
                    "description: {}..., strength: {}",
                    preview(description, SUMMARY_CHARS),
                    strength
                )
            }
        }
    }

    /// Notice logged on receipt for operations known to run for minutes.
    pub fn wait_notice(&self) -> Option<&'static str> {
        match self {
            Operation::AnimateImage => Some("This takes 3-5 minutes, please wait..."),
            Operation::GenerateAvatar => {
                Some("This generates both image AND video, takes 4-6 minutes...")
            }
            _ => None,
        }
    }

    /// Caller-facing message for a failed remote call.
    pub fn failure_message(&self, failure: &RemoteFailure) -> String {
        match failure {
            RemoteFailure::Timeout(budget) => format!(
                "Request timeout after {}. {}",
                humanize_budget(budget),
                self.timeout_hint()
            ),
            RemoteFailure::Unreachable(_) => UNREACHABLE_MESSAGE.to_string(),
            RemoteFailure::EmptyBody => match self {
                Operation::AnimateImage => "Colab crashed during video generation. \
                    Restart the Colab runtime and try again."
                    .to_string(),
                Operation::EnhanceImage => {
                    "Empty response from Colab. Check if models are loaded.".to_string()
                }
                _ => failure.to_string(),
            },
            RemoteFailure::MalformedBody { preview: raw } => {
                let shown = preview(raw, PREVIEW_CHARS);
                match self {
                    Operation::AnimateImage => {
                        format!("Colab returned invalid response. Preview: {shown}")
                    }
                    _ => format!("Invalid JSON from Colab: {shown}"),
                }
            }
            RemoteFailure::Other(message) => message.clone(),
        }
    }

    fn timeout_hint(&self) -> &'static str {
        match self {
            Operation::GenerateImage => "Try again.",
            Operation::AnimateImage => "Restart Colab.",
            Operation::GenerateAvatar => "Try simpler description.",
            Operation::EnhanceImage => "Image enhancement took too long.",
        }
    }
}

fn str_field<'a>(body: &'a Value, key: &str) -> Option<&'a str> {
    body.get(key).and_then(Value::as_str)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn animation_forwards_only_the_image() {
        let payload = Operation::AnimateImage
            .shape_payload(json!({"ai_image": "data:image/png;base64,AAA", "noise": true}))
            .unwrap();
        assert_eq!(payload, json!({"ai_image": "data:image/png;base64,AAA"}));
    }

    #[test]
    fn animation_without_image_forwards_null() {
        let payload = Operation::AnimateImage.shape_payload(json!({})).unwrap();
        assert_eq!(payload, json!({"ai_image": null}));
    }

    #[test]
    fn other_operations_forward_the_whole_body() {
        let body = json!({"description": "red sneaker", "style": "studio"});
        for op in [
            Operation::GenerateImage,
            Operation::GenerateAvatar,
            Operation::EnhanceImage,
        ] {
            assert_eq!(op.shape_payload(body.clone()).unwrap(), body);
        }
    }

    #[test]
    fn non_object_bodies_are_rejected() {
        let err = Operation::GenerateImage.shape_payload(json!([1, 2])).unwrap_err();
        assert_eq!(err, PayloadError::NotAnObject("an array"));
        assert_eq!(
            err.to_string(),
            "request body must be a JSON object, got an array"
        );
    }

    #[test]
    fn only_long_running_image_routes_check_bodies() {
        assert!(!Operation::GenerateImage.checks_body());
        assert!(Operation::AnimateImage.checks_body());
        assert!(!Operation::GenerateAvatar.checks_body());
        assert!(Operation::EnhanceImage.checks_body());
    }

    #[test]
    fn timeouts_match_route_weight() {
        assert_eq!(Operation::GenerateImage.default_timeout(), Duration::from_secs(120));
        assert_eq!(Operation::AnimateImage.default_timeout(), Duration::from_secs(600));
        assert_eq!(Operation::GenerateAvatar.default_timeout(), Duration::from_secs(600));
        assert_eq!(Operation::EnhanceImage.default_timeout(), Duration::from_secs(120));
    }

    #[test]
    fn summaries_pick_route_fields() {
        let long = "x".repeat(80);
        assert_eq!(
            Operation::GenerateImage.summary(&json!({"description": long})),
            format!("{}...", "x".repeat(50))
        );
        assert_eq!(
            Operation::GenerateImage.summary(&json!({})),
            "No description..."
        );
        assert_eq!(
            Operation::GenerateAvatar.summary(&json!({"avatar_id": 3})),
            "avatar #3"
        );
        assert_eq!(
            Operation::EnhanceImage.summary(&json!({})),
            "description: professional product photography..., strength: 0.75"
        );
    }

    #[test]
    fn timeout_message_names_budget_and_hint() {
        let failure = RemoteFailure::Timeout(Duration::from_secs(600));
        assert_eq!(
            Operation::AnimateImage.failure_message(&failure),
            "Request timeout after 10 minutes. Restart Colab."
        );
    }

    #[test]
    fn empty_body_messages_hint_at_a_crash() {
        let animate = Operation::AnimateImage.failure_message(&RemoteFailure::EmptyBody);
        assert!(animate.contains("crashed"));
        let enhance = Operation::EnhanceImage.failure_message(&RemoteFailure::EmptyBody);
        assert!(enhance.contains("Empty response"));
    }

    #[test]
    fn malformed_messages_carry_a_short_preview() {
        let failure = RemoteFailure::MalformedBody {
            preview: "<".repeat(200),
        };
        let message = Operation::EnhanceImage.failure_message(&failure);
        assert_eq!(message, format!("Invalid JSON from Colab: {}", "<".repeat(100)));
    }
}
