//! Shared HTTP client construction policy for collection sources.
//!
//! Keeps timeout, user-agent, and compression defaults in one place so every
//! source talks to its API the same way.

use std::time::Duration;

use reqwest::Client;

use crate::user_agent;

use super::SourceError;

/// Default connect timeout in seconds.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// Default read timeout in seconds.
pub const DEFAULT_READ_TIMEOUT_SECS: u64 = 30;

/// Connect and read timeouts applied to source HTTP clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpTimeouts {
    /// Connect timeout in seconds.
    pub connect_secs: u64,
    /// Whole-request timeout in seconds.
    pub read_secs: u64,
}

impl Default for HttpTimeouts {
    fn default() -> Self {
        Self {
            connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            read_secs: DEFAULT_READ_TIMEOUT_SECS,
        }
    }
}

/// Builds a source HTTP client using shared project policy.
///
/// # Errors
///
/// Returns [`SourceError::Unavailable`] when client construction fails.
pub fn build_source_http_client(timeouts: HttpTimeouts) -> Result<Client, SourceError> {
    Client::builder()
        .connect_timeout(Duration::from_secs(timeouts.connect_secs))
        .timeout(Duration::from_secs(timeouts.read_secs))
        .user_agent(user_agent::default_source_user_agent())
        .gzip(true)
        .build()
        .map_err(|error| {
            SourceError::unavailable(format!("HTTP client construction failed: {error}"))
        })
}
