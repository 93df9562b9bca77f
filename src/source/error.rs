//! Error types for collection source requests.
//!
//! Errors follow the What/Why/Fix pattern used across the project. Within the
//! fetch pipeline they are logged and absorbed, never surfaced to callers.

use thiserror::Error;

/// Errors that can occur while querying a collection source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Network-level failure (DNS, connection refused, TLS, timeout).
    #[error("network error calling {endpoint}: {source}")]
    Network {
        /// The endpoint that was called.
        endpoint: String,
        /// The underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// The API answered with a non-success status.
    #[error("HTTP {status} from {endpoint}: {message}\n  Suggestion: {suggestion}")]
    HttpStatus {
        /// The endpoint that was called.
        endpoint: String,
        /// The HTTP status code.
        status: u16,
        /// The API's own error message, or the status reason.
        message: String,
        /// How to fix the issue.
        suggestion: String,
    },

    /// The response body did not have the expected shape.
    #[error("unexpected response from {endpoint}: {reason}")]
    Decode {
        /// The endpoint that was called.
        endpoint: String,
        /// What failed to decode.
        reason: String,
    },

    /// The source could not be constructed.
    #[error("source unavailable: {reason}")]
    Unavailable {
        /// Why the source cannot be used.
        reason: String,
    },
}

impl SourceError {
    /// Creates a network error from a reqwest error.
    pub fn network(endpoint: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            endpoint: endpoint.into(),
            source,
        }
    }

    /// Creates an HTTP status error with a suggestion derived from the status.
    pub fn http_status(endpoint: impl Into<String>, status: u16, message: impl Into<String>) -> Self {
        let suggestion = match status {
            401 => "Check that the integration token is valid",
            403 | 404 => "Share the database with the integration and check the database id",
            429 => "Rate limited by the API; try again shortly",
            s if s >= 500 => "The API is unavailable; try again later",
            _ => "Check the request parameters",
        };
        Self::HttpStatus {
            endpoint: endpoint.into(),
            status,
            message: message.into(),
            suggestion: suggestion.to_string(),
        }
    }

    /// Creates a decode error.
    pub fn decode(endpoint: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Decode {
            endpoint: endpoint.into(),
            reason: reason.into(),
        }
    }

    /// Creates an unavailable-source error.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }

    /// Returns the HTTP status code if this is an HTTP status error.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}
