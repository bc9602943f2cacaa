//! InsightFlow - Tool Session Orchestrator
//!
//! Headless orchestration for guided, multi-step data-analysis workflows
//! (exploratory analysis, classification, clustering, text analysis).
//! It includes:
//! - Session lifecycle against the remote analysis backend
//! - The step engine (step pointer, per-step data store, local/remote steps)
//! - The upload pipeline (local checks, dispatch, response normalization)
//! - Result-tab derivation, notifications, and the error channel
//!
//! Presentation is out of scope: hosts read orchestrator state through
//! `ToolContext` and render it however they like.

pub mod models;
pub mod services;
pub mod utils;

pub use models::notification::{Notification, NotificationKind};
pub use models::results::ResultTab;
pub use models::session::{SessionState, ToolSession};
pub use services::context::ToolContext;
pub use services::export::{export_filename, ExportedFile};
pub use services::results::derive_result_tabs;
pub use services::step_engine::{StepEngine, UPLOADED_FILE_KEY, UPLOAD_RESULTS_KEY};
pub use utils::error::{AppError, AppResult};
