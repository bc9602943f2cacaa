//! InsightFlow Validation
//!
//! Everything that stands between a dropped file and a well-formed
//! validation result:
//! - Pre-network file checks (size, MIME type) with user-facing messages
//! - Normalization of the backend's heterogeneous validation responses
//!   into one canonical shape, via explicit schema attempts
//! - Column policies: text-column detection and target suggestion

pub mod columns;
pub mod error;
pub mod file_check;
pub mod normalize;

pub use columns::{find_text_column, require_text_column, suggest_target_column, TEXT_COLUMN_SYNONYMS};
pub use error::{ValidationError, ValidationResult};
pub use file_check::validate_local;
pub use normalize::{normalize, CanonicalValidationResult, DatasetSummary, ValidationReport};
