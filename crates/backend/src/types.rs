//! Backend Wire Types
//!
//! Request/response DTOs for the analysis backend's REST surface. Field
//! names follow the backend's snake_case convention.

use serde::{Deserialize, Serialize};

use insightflow_core::ToolType;

/// Body of `POST /api/{tool}/session`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSessionRequest {
    /// Display name for the session
    pub name: String,
    /// Display description
    pub description: String,
    /// Id of the user owning the session
    pub user_id: String,
    /// Tool slug, repeated in the body for backend bookkeeping
    pub tool_type: ToolType,
}

impl CreateSessionRequest {
    /// Build a session-creation request.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        user_id: impl Into<String>,
        tool_type: ToolType,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            user_id: user_id.into(),
            tool_type,
        }
    }
}

/// Response of `POST /api/{tool}/session`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionCreated {
    /// Backend-assigned session identifier
    pub session_id: String,
}
