//! InsightFlow Backend
//!
//! HTTP client for the remote analysis backend:
//! - `BackendApi` trait: the full surface the orchestrator consumes
//!   (session creation, data validation, step processing, export)
//! - `HttpBackend`: reqwest implementation of that trait
//! - `BackendError`: transport/protocol error taxonomy with the
//!   `message` → `detail` → generic fallback chain for backend messages
//! - HTTP client factory

pub mod api;
pub mod error;
pub mod http_client;
pub mod types;

pub use api::{BackendApi, HttpBackend};
pub use error::{extract_error_message, parse_http_error, BackendError, BackendResult};
pub use http_client::build_http_client;
pub use types::{CreateSessionRequest, SessionCreated};
