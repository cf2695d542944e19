//! Rental backend error types

use serde_json::Value;
use thiserror::Error;

/// Failure of a backend call
///
/// Success is `Ok(ApiResponse)`; a response with a non-2xx status is
/// `Http`, carrying the status and whatever body the backend sent. Failures
/// before any response arrived are `Network` or `Timeout`.
#[derive(Debug, Error)]
pub enum RentalApiError {
    /// The backend answered with a non-success status
    #[error("Backend returned HTTP {status}{}", server_suffix(.body))]
    Http {
        /// HTTP status code
        status: u16,
        /// Response body; JSON if it parsed, the raw text otherwise
        body: Value,
    },

    /// The request never got a response
    #[error("Network error: {0}")]
    Network(String),

    /// The configured request timeout elapsed
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },

    /// A success response whose body is not the expected JSON
    #[error("Invalid response body (HTTP {status}): {message}")]
    InvalidBody {
        /// HTTP status code
        status: u16,
        /// Parser message
        message: String,
    },

    /// The request could not be built from the given input
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Client configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

fn server_suffix(body: &Value) -> String {
    body.get("error")
        .and_then(Value::as_str)
        .map(|msg| format!(": {msg}"))
        .unwrap_or_default()
}

impl RentalApiError {
    /// HTTP status, if a response was received
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } | Self::InvalidBody { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The backend's `{"error": "..."}` message, if present
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Http { body, .. } => body.get("error").and_then(Value::as_str),
            _ => None,
        }
    }

    /// Returns true if repeating the call could succeed
    ///
    /// The client never retries on its own; this only informs the caller.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) | Self::Timeout { .. } => true,
            Self::Http { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}
