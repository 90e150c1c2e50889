//! Runtime settings for the adgen front-end.
//!
//! The remote inference API lives behind a tunnel whose URL changes every
//! time the remote notebook restarts, so it is read from the environment at
//! startup instead of being compiled in:
//!
//! | Variable | Required | Default |
//! |----------|----------|---------|
//! | `COLAB_API_URL` | yes | — |
//! | `ADGEN_BIND_ADDR` | no | `0.0.0.0:5001` |
//!
//! # Example
//!
//! ```rust
//! use adgen_config::Settings;
//!
//! let settings = Settings::new("https://example.ngrok-free.dev/").unwrap();
//! assert_eq!(settings.remote_url, "https://example.ngrok-free.dev");
//! ```

use std::net::SocketAddr;

use adgen_core::Timeouts;
use tracing::debug;

pub const REMOTE_URL_VAR: &str = "COLAB_API_URL";
pub const BIND_ADDR_VAR: &str = "ADGEN_BIND_ADDR";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5001";

/// Errors that can occur when loading settings.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is not set.
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    /// The remote URL is not an absolute http(s) URL.
    #[error("Invalid remote URL '{0}': expected http:// or https://")]
    InvalidUrl(String),

    /// The bind address does not parse as `host:port`.
    #[error("Invalid bind address '{0}'")]
    InvalidBindAddr(String),
}

/// Settings injected into the server at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Base URL of the remote inference API, without a trailing slash.
    pub remote_url: String,
    /// Address the front-end listens on.
    pub bind_addr: SocketAddr,
    /// Outbound call budgets.
    pub timeouts: Timeouts,
}

impl Settings {
    /// Creates settings for the given remote with default bind address and timeouts.
    pub fn new(remote_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            remote_url: normalize_url(remote_url)?,
            bind_addr: parse_bind_addr(DEFAULT_BIND_ADDR)?,
            timeouts: Timeouts::default(),
        })
    }

    /// Loads settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads settings through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let remote_url = lookup(REMOTE_URL_VAR)
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing(REMOTE_URL_VAR))?;

        let mut settings = Self::new(&remote_url)?;

        if let Some(addr) = lookup(BIND_ADDR_VAR) {
            settings.bind_addr = parse_bind_addr(&addr)?;
        }

        debug!(
            "Settings loaded: remote={}, bind={}",
            settings.remote_url, settings.bind_addr
        );
        Ok(settings)
    }

    pub fn with_timeouts(mut self, timeouts: Timeouts) -> Self {
        self.timeouts = timeouts;
        self
    }
}

fn normalize_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let has_host = ["http://", "https://"]
        .iter()
        .any(|scheme| trimmed.len() > scheme.len() && trimmed.starts_with(scheme));

    if !has_host {
        return Err(ConfigError::InvalidUrl(raw.to_string()));
    }
    Ok(trimmed.to_string())
}

fn parse_bind_addr(raw: &str) -> Result<SocketAddr, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::InvalidBindAddr(raw.to_string()))
}
