//! Client for the remote inference API.
//!
//! The remote is a best-effort process reached through a tunnel. This crate
//! turns every way a call to it can go wrong into a [`RemoteFailure`] so the
//! server never has to look at transport errors itself.
//!
//! ```rust,ignore
//! use adgen_core::Operation;
//! use adgen_remote::RemoteClient;
//!
//! let client = RemoteClient::new("https://example.ngrok-free.dev")?;
//! let reply = client
//!     .forward(Operation::GenerateImage, Operation::GenerateImage.default_timeout(), &payload)
//!     .await?;
//! ```

use std::time::{Duration, Instant};

use adgen_core::{preview, Operation, RemoteFailure, LOG_PREVIEW_CHARS};
use serde_json::Value;
use tracing::{error, info, warn};

/// A successful remote answer.
#[derive(Debug, Clone)]
pub struct RemoteReply {
    /// HTTP status the remote answered with. Logged, not propagated.
    pub status: u16,
    /// Parsed JSON body, passed back to callers unchanged.
    pub body: Value,
}

/// Error raised when the underlying HTTP client cannot be constructed.
pub type BuildError = reqwest::Error;

/// Client for the remote inference API.
#[derive(Debug, Clone)]
pub struct RemoteClient {
    http: reqwest::Client,
    base_url: String,
}

impl RemoteClient {
    /// Creates a client for the given base URL (no trailing slash).
    ///
    /// Fails only when the TLS backend cannot be initialised.
    pub fn new(base_url: impl Into<String>) -> Result<Self, BuildError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("adgen/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    /// Posts `payload` to the operation's remote path and parses the answer.
    pub async fn forward(
        &self,
        op: Operation,
        timeout: Duration,
        payload: &Value,
    ) -> Result<RemoteReply, RemoteFailure> {
        let url = format!("{}{}", self.base_url, op.path());
        let start = Instant::now();

        let response = self
            .http
            .post(&url)
            .timeout(timeout)
            .json(payload)
            .send()
            .await
            .map_err(|e| classify(e, timeout))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| classify(e, timeout))?;

        info!(
            "Remote {} answered {} in {}ms",
            op.path(),
            status.as_u16(),
            start.elapsed().as_millis()
        );
        if !status.is_success() {
            warn!("Remote {} returned non-success status {}", op.path(), status);
        }

        let body = interpret_body(op.checks_body(), &text)?;
        Ok(RemoteReply {
            status: status.as_u16(),
            body,
        })
    }

    /// Fetches the remote root, which must answer with JSON.
    pub async fn check_root(&self, timeout: Duration) -> Result<Value, RemoteFailure> {
        let url = format!("{}/", self.base_url);

        let response = self
            .http
            .get(&url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| classify(e, timeout))?;

        let text = response.text().await.map_err(|e| classify(e, timeout))?;
        serde_json::from_str(&text).map_err(|e| RemoteFailure::Other(e.to_string()))
    }
}

/// Parses a remote body.
///
/// With `checks_body`, an empty body and a non-JSON body are reported as
/// [`RemoteFailure::EmptyBody`] and [`RemoteFailure::MalformedBody`];
/// otherwise any parse failure is a plain [`RemoteFailure::Other`].
pub fn interpret_body(checks_body: bool, text: &str) -> Result<Value, RemoteFailure> {
    if !checks_body {
        return serde_json::from_str(text).map_err(|e| RemoteFailure::Other(e.to_string()));
    }

    if text.trim().is_empty() {
        error!("Empty response from remote (likely crashed)");
        return Err(RemoteFailure::EmptyBody);
    }

    serde_json::from_str(text).map_err(|_| {
        let shown = preview(text, LOG_PREVIEW_CHARS);
        error!("Invalid JSON response: {}", shown);
        RemoteFailure::MalformedBody {
            preview: shown.to_string(),
        }
    })
}

/// Maps a transport error onto the failure taxonomy.
///
/// Timeouts win over connect errors so a connect that hangs past the budget
/// reads as a timeout.
fn classify(err: reqwest::Error, timeout: Duration) -> RemoteFailure {
    if err.is_timeout() {
        RemoteFailure::Timeout(timeout)
    } else if err.is_connect() {
        RemoteFailure::Unreachable(err.to_string())
    } else {
        RemoteFailure::Other(err.to_string())
    }
}
