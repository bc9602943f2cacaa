//! Validation Error Types
//!
//! User-facing failures raised before a network call (file checks) and
//! structural failures raised after one (unrecognized response shapes).

use thiserror::Error;

/// Errors produced by upload validation and response normalization.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The file exceeds the configured maximum size.
    #[error("File too large. Maximum size: {max_mb}MB.")]
    FileTooLarge { max_mb: u64 },

    /// The file's MIME type is not on the allow-list.
    #[error("File type not supported.")]
    UnsupportedFileType,

    /// No column matched the recognized text-column synonyms.
    #[error("No text column found. Expected a column named like one of: {synonyms}.")]
    MissingTextColumn { synonyms: String },

    /// The backend's validation response matched none of the known shapes.
    #[error("Unrecognized validation response shape: {0}")]
    UnrecognizedShape(String),
}

/// Result type alias for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;
