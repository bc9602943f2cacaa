//! Local File Checks
//!
//! Size and MIME-type validation that runs before any network call. A
//! failure here is reported immediately and the user may retry at once.

use insightflow_core::{UploadConfig, UploadFile};

use crate::error::{ValidationError, ValidationResult};

/// Validate a file against the configured limits without touching the network.
pub fn validate_local(file: &UploadFile, config: &UploadConfig) -> ValidationResult<()> {
    if file.size_bytes() > config.max_size_bytes {
        return Err(ValidationError::FileTooLarge {
            max_mb: config.max_size_mb(),
        });
    }
    if !config.allows_mime_type(&file.content_type) {
        return Err(ValidationError::UnsupportedFileType);
    }
    Ok(())
}
