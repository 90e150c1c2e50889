//! Core domain types for the adgen front-end.
//!
//! This crate holds everything the server needs to know about the remote
//! inference API without touching HTTP:
//!
//! - [`Operation`] — The four forwarding routes and their per-route behavior
//! - [`Timeouts`] — Per-operation timeout table with the health check budget
//! - [`RemoteFailure`] — Classification of a failed remote call
//! - [`FailureEnvelope`] — The `{"success": false, "error": ...}` body
//!
//! # Example
//!
//! ```rust
//! use adgen_core::{Operation, RemoteFailure};
//! use serde_json::json;
//!
//! let payload = Operation::AnimateImage
//!     .shape_payload(json!({"ai_image": "a.png", "prompt": "spin"}))
//!     .unwrap();
//! assert_eq!(payload, json!({"ai_image": "a.png"}));
//!
//! let message = Operation::GenerateImage.failure_message(&RemoteFailure::Unreachable(
//!     "connection refused".into(),
//! ));
//! assert_eq!(message, "Cannot connect to Colab API. Make sure Colab is running.");
//! ```

mod failure;
mod operation;
mod timeouts;

pub use failure::{humanize_budget, preview, FailureEnvelope, RemoteFailure};
pub use operation::{Operation, PayloadError};
pub use timeouts::{Timeouts, HEALTH_TIMEOUT};

/// Characters of an offending remote body shown to callers.
pub const PREVIEW_CHARS: usize = 100;

/// Characters of an offending remote body written to the log.
pub const LOG_PREVIEW_CHARS: usize = 200;
