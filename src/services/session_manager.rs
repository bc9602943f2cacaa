//! Session Manager
//!
//! Owns creation (and idempotent re-creation) of the remote analysis
//! session. Creation is guarded by an explicit state machine
//! (`Idle | Creating | Ready | Failed`) so redundant initialization
//! triggers collapse into a single network call. There is no automatic
//! retry: after a failure a subsequent explicit `create()` is required.

use std::sync::Arc;
use tokio::sync::RwLock;

use insightflow_backend::{BackendApi, CreateSessionRequest};
use insightflow_core::{ToolConfig, UserIdentity};

use crate::models::session::{SessionState, ToolSession};
use crate::services::error_channel::ErrorChannel;
use crate::utils::error::{AppError, AppResult};

/// Manages the remote session for one workflow instance.
pub struct SessionManager {
    backend: Arc<dyn BackendApi>,
    config: Arc<ToolConfig>,
    user: UserIdentity,
    errors: Arc<ErrorChannel>,
    state: RwLock<SessionState>,
    session: RwLock<Option<ToolSession>>,
}

impl SessionManager {
    /// Create a manager with no session.
    pub fn new(
        backend: Arc<dyn BackendApi>,
        config: Arc<ToolConfig>,
        user: UserIdentity,
        errors: Arc<ErrorChannel>,
    ) -> Self {
        Self {
            backend,
            config,
            user,
            errors,
            state: RwLock::new(SessionState::Idle),
            session: RwLock::new(None),
        }
    }

    /// Create the remote session.
    ///
    /// Returns the session when this call (or an earlier one) produced it,
    /// and `None` when the call collapsed into a creation already in
    /// flight. On failure the state moves to `Failed` and the error channel
    /// carries a human-readable message.
    pub async fn create(&self) -> AppResult<Option<ToolSession>> {
        if self.user.is_anonymous {
            return Err(AppError::precondition(
                "Sign in to start an analysis session.",
            ));
        }

        {
            let mut state = self.state.write().await;
            match *state {
                SessionState::Creating => {
                    tracing::debug!("session creation already in flight");
                    return Ok(None);
                }
                SessionState::Ready => {
                    return Ok(self.session.read().await.clone());
                }
                SessionState::Idle | SessionState::Failed => {
                    *state = SessionState::Creating;
                }
            }
        }

        let request = CreateSessionRequest::new(
            self.config.session_name.clone(),
            self.config.session_description.clone(),
            self.user.user_id.clone(),
            self.config.tool_type,
        );

        match self
            .backend
            .create_session(self.config.tool_type, &request)
            .await
        {
            Ok(created) => {
                let session = ToolSession::new(created.session_id, self.config.tool_type);
                tracing::info!(
                    session_id = %session.session_id,
                    tool = %session.tool_type,
                    "analysis session created"
                );
                *self.session.write().await = Some(session.clone());
                *self.state.write().await = SessionState::Ready;
                Ok(Some(session))
            }
            Err(e) => {
                *self.state.write().await = SessionState::Failed;
                self.errors
                    .report(format!("Failed to create analysis session: {}", e))
                    .await;
                Err(AppError::Backend(e))
            }
        }
    }

    /// Drop the current session and return to `Idle`.
    pub async fn clear(&self) {
        *self.session.write().await = None;
        *self.state.write().await = SessionState::Idle;
    }

    /// Current creation state.
    pub async fn state(&self) -> SessionState {
        *self.state.read().await
    }

    /// Current session handle, if any.
    pub async fn current(&self) -> Option<ToolSession> {
        self.session.read().await.clone()
    }

    /// Current session id, if any.
    pub async fn session_id(&self) -> Option<String> {
        self.session
            .read()
            .await
            .as_ref()
            .map(|s| s.session_id.clone())
    }
}
