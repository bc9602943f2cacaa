//! Session Models
//!
//! The remote analysis session handle and the creation state machine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use insightflow_core::ToolType;

/// Lifecycle state of session creation.
///
/// `create()` only acts from `Idle` or `Failed`; a call arriving while
/// another creation is in flight collapses into that call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// No session and no creation in flight
    Idle,
    /// A creation call is in flight
    Creating,
    /// A session exists
    Ready,
    /// The last creation attempt failed; an explicit retry is required
    Failed,
}

impl SessionState {
    /// Whether `create()` may start a new network call from this state.
    pub fn can_create(&self) -> bool {
        matches!(self, SessionState::Idle | SessionState::Failed)
    }
}

/// A server-side handle identifying one user's in-progress analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSession {
    /// Backend-assigned session identifier
    pub session_id: String,
    /// Workflow this session belongs to
    pub tool_type: ToolType,
    /// When the session was created (client clock)
    pub created_at: DateTime<Utc>,
}

impl ToolSession {
    /// Create a session handle stamped with the current time.
    pub fn new(session_id: impl Into<String>, tool_type: ToolType) -> Self {
        Self {
            session_id: session_id.into(),
            tool_type,
            created_at: Utc::now(),
        }
    }
}
