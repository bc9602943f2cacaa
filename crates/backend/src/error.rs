//! Backend Error Types
//!
//! Error taxonomy for calls against the analysis backend, plus the helpers
//! that turn HTTP failures into human-readable messages. Backends disagree
//! about where they put their error text, so extraction walks a fallback
//! chain: `message` → `detail` → a caller-supplied generic.

use serde::{Deserialize, Serialize};

/// Error types for backend operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BackendError {
    /// Authentication failed or the session is not accepted
    AuthenticationFailed { message: String },
    /// Resource (session, endpoint) not found
    NotFound { message: String },
    /// Invalid request (bad parameters, rejected upload)
    InvalidRequest { message: String },
    /// Server error from the backend
    ServerError {
        message: String,
        status: Option<u16>,
    },
    /// Network/connection error
    NetworkError { message: String },
    /// Response parsing error
    ParseError { message: String },
    /// Other error
    Other { message: String },
}

impl std::fmt::Display for BackendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendError::AuthenticationFailed { message } => {
                write!(f, "Authentication failed: {}", message)
            }
            BackendError::NotFound { message } => {
                write!(f, "Not found: {}", message)
            }
            BackendError::InvalidRequest { message } => {
                write!(f, "{}", message)
            }
            BackendError::ServerError { message, status } => {
                if let Some(s) = status {
                    write!(f, "Server error ({}): {}", s, message)
                } else {
                    write!(f, "Server error: {}", message)
                }
            }
            BackendError::NetworkError { message } => {
                write!(f, "Network error: {}", message)
            }
            BackendError::ParseError { message } => {
                write!(f, "Parse error: {}", message)
            }
            BackendError::Other { message } => {
                write!(f, "Error: {}", message)
            }
        }
    }
}

impl std::error::Error for BackendError {}

/// Result type for backend operations
pub type BackendResult<T> = Result<T, BackendError>;

/// Extract a human-readable message from an error response body.
///
/// Tries `message`, then `detail`, then falls back to the caller-supplied
/// generic. Non-JSON bodies fall through to the generic as well.
pub fn extract_error_message(body: &str, fallback: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["message", "detail"] {
            if let Some(text) = value.get(key).and_then(|v| v.as_str()) {
                if !text.is_empty() {
                    return text.to_string();
                }
            }
        }
    }
    fallback.to_string()
}

/// Map an HTTP error status and body to a `BackendError`.
///
/// The body is run through the message fallback chain with `fallback` as
/// the generic message.
pub fn parse_http_error(status: u16, body: &str, fallback: &str) -> BackendError {
    let message = extract_error_message(body, fallback);
    match status {
        401 | 403 => BackendError::AuthenticationFailed { message },
        404 => BackendError::NotFound { message },
        400 | 422 => BackendError::InvalidRequest { message },
        500..=599 => BackendError::ServerError {
            message,
            status: Some(status),
        },
        _ => BackendError::Other { message },
    }
}
