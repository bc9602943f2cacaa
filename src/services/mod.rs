//! Services
//!
//! The orchestrator's moving parts. `ToolContext` wires them together into
//! the single surface presentation talks to.

pub mod context;
pub mod error_channel;
pub mod export;
pub mod notifications;
pub mod results;
pub mod session_manager;
pub mod step_engine;
pub mod upload;

pub use context::ToolContext;
pub use error_channel::ErrorChannel;
pub use export::{export_filename, ExportedFile};
pub use notifications::NotificationCenter;
pub use results::derive_result_tabs;
pub use session_manager::SessionManager;
pub use step_engine::StepEngine;
pub use upload::UploadPipeline;
