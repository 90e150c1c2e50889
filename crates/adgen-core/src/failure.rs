//! Remote call failure classification and the failure envelope.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Ways a call to the remote inference API can fail.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RemoteFailure {
    /// The remote did not answer within the allotted budget.
    #[error("request timed out after {}", humanize_budget(.0))]
    Timeout(Duration),

    /// The remote could not be reached at all.
    #[error("cannot connect to remote: {0}")]
    Unreachable(String),

    /// The remote answered with a zero-length (or whitespace-only) body.
    #[error("remote returned an empty response")]
    EmptyBody,

    /// The remote answered with something that is not JSON.
    #[error("remote returned invalid JSON: {preview}")]
    MalformedBody { preview: String },

    /// Anything else, carrying the raw error text.
    #[error("{0}")]
    Other(String),
}

/// JSON body returned to callers whenever a forwarding route fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureEnvelope {
    pub success: bool,
    pub error: String,
}

impl FailureEnvelope {
    /// Creates a failure envelope with the given message.
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

/// Returns at most the first `max_chars` characters of `text`.
pub fn preview(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Renders a timeout budget for humans: "10 minutes", "5 seconds".
pub fn humanize_budget(budget: &Duration) -> String {
    let secs = budget.as_secs();
    let plural = |n: u64, unit: &str| {
        if n == 1 {
            format!("1 {unit}")
        } else {
            format!("{n} {unit}s")
        }
    };

    if secs >= 60 && secs % 60 == 0 && budget.subsec_nanos() == 0 {
        plural(secs / 60, "minute")
    } else if secs >= 1 && budget.subsec_nanos() == 0 {
        plural(secs, "second")
    } else {
        plural(budget.as_millis() as u64, "millisecond")
    }
}
