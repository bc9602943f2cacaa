//! Error Handling
//!
//! Unified error types for the orchestrator. Uses thiserror for ergonomic
//! error definitions and aggregates the member-crate error types, so every
//! pipeline converts its failure into one `AppError` at its boundary.

use thiserror::Error;

use insightflow_backend::BackendError;
use insightflow_core::CoreError;
use insightflow_validation::ValidationError;

/// Orchestrator-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Core configuration/validation errors
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Backend transport/protocol errors
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// Upload validation and normalization errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A workflow precondition is not met (no authenticated user, missing
    /// entitlement); not recoverable within the workflow
    #[error("{0}")]
    Precondition(String),

    /// An operation needed an active session and none exists
    #[error("No active analysis session.")]
    SessionRequired,

    /// The session changed while a request was in flight; its result was
    /// discarded instead of being written into the fresh state
    #[error("Session changed while the request was in flight; result discarded.")]
    StaleSession,

    /// Not found errors
    #[error("Not found: {0}")]
    NotFound(String),

    /// File I/O errors (export saves)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for orchestrator errors
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Create a precondition error
    pub fn precondition(msg: impl Into<String>) -> Self {
        Self::Precondition(msg.into())
    }

    /// Create a not found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

/// Convert AppError to a string suitable for host-facing state
impl From<AppError> for String {
    fn from(err: AppError) -> String {
        err.to_string()
    }
}
