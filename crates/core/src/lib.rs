//! InsightFlow Core
//!
//! Shared foundation for the InsightFlow workspace:
//! - Error types (`CoreError`, `CoreResult`)
//! - Tool identification (`ToolType`) and user identity (`UserIdentity`)
//! - Step configuration (`StepConfig`, `StepKind`, `EndpointTemplate`)
//! - Tool configuration (`ToolConfig`, `UploadConfig`) with load-time validation
//! - Upload file handle (`UploadFile`)
//!
//! These types are dependency-light (serde + thiserror only) so every other
//! crate in the workspace can build on them.

pub mod config;
pub mod error;
pub mod identity;
pub mod step;
pub mod tool;
pub mod upload;

pub use config::{ToolConfig, UploadConfig};
pub use error::{CoreError, CoreResult};
pub use identity::UserIdentity;
pub use step::{EndpointTemplate, StepConfig, StepKind};
pub use tool::ToolType;
pub use upload::UploadFile;
