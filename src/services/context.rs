//! Tool Context
//!
//! The page-level controller: wires the session manager, step engine,
//! upload pipeline, notification center, and error channel into a single
//! surface presentation talks to. Every pipeline failure is converted into
//! error-channel state here; nothing propagates to the host as a panic.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

use chrono::Utc;
use serde_json::Value;

use insightflow_backend::BackendApi;
use insightflow_core::{ToolConfig, UploadFile, UserIdentity};
use insightflow_validation::CanonicalValidationResult;

use crate::models::results::ResultTab;
use crate::models::session::{SessionState, ToolSession};
use crate::services::error_channel::ErrorChannel;
use crate::services::export::{export_filename, ExportedFile};
use crate::services::notifications::NotificationCenter;
use crate::services::results::derive_result_tabs;
use crate::services::session_manager::SessionManager;
use crate::services::step_engine::StepEngine;
use crate::services::upload::UploadPipeline;
use crate::utils::error::{AppError, AppResult};

/// One workflow instance, owned by the host for the lifetime of a page.
pub struct ToolContext {
    config: Arc<ToolConfig>,
    user: UserIdentity,
    backend: Arc<dyn BackendApi>,
    sessions: SessionManager,
    engine: StepEngine,
    upload: UploadPipeline,
    notifications: NotificationCenter,
    errors: Arc<ErrorChannel>,
    result_tabs: RwLock<Vec<ResultTab>>,
}

impl ToolContext {
    /// Build a context for a validated tool configuration.
    pub fn new(
        config: ToolConfig,
        user: UserIdentity,
        backend: Arc<dyn BackendApi>,
    ) -> AppResult<Self> {
        config.validate()?;
        let config = Arc::new(config);
        let errors = Arc::new(ErrorChannel::new());
        let sessions = SessionManager::new(
            Arc::clone(&backend),
            Arc::clone(&config),
            user.clone(),
            Arc::clone(&errors),
        );
        let engine = StepEngine::new(Arc::clone(&config), Arc::clone(&backend));
        let upload = UploadPipeline::new(Arc::clone(&config), Arc::clone(&backend));

        Ok(Self {
            config,
            user,
            backend,
            sessions,
            engine,
            upload,
            notifications: NotificationCenter::new(),
            errors,
            result_tabs: RwLock::new(Vec::new()),
        })
    }

    /// Hard preconditions for every operation: an authenticated,
    /// non-anonymous user, plus the premium entitlement for gated tools.
    fn ensure_authorized(&self) -> AppResult<()> {
        if self.user.is_anonymous {
            return Err(AppError::precondition("Sign in to use analysis tools."));
        }
        if self.config.requires_premium && !self.user.is_premium {
            return Err(AppError::precondition(
                "This tool requires a premium subscription.",
            ));
        }
        Ok(())
    }

    /// Start the workflow: create the remote session.
    pub async fn start(&self) -> AppResult<Option<ToolSession>> {
        self.ensure_authorized()?;
        self.sessions.create().await
    }

    /// Upload a dataset against the active session.
    ///
    /// On success the store holds `{uploadedFile, uploadResults}`, a success
    /// notification is queued, and the pointer auto-advanced unless the
    /// dataset was flagged invalid. Failures land in the error channel and
    /// an error notification; the store is left untouched.
    pub async fn upload_file(&self, file: &UploadFile) -> AppResult<CanonicalValidationResult> {
        self.ensure_authorized()?;
        match self.upload.run(&self.sessions, &self.engine, file).await {
            Ok(result) => {
                self.errors.clear().await;
                self.notifications
                    .success(format!("File '{}' uploaded and validated.", file.file_name))
                    .await;
                Ok(result)
            }
            Err(e) => Err(self.surface_failure(e, true).await),
        }
    }

    /// Execute a step by name with a JSON payload.
    ///
    /// Results-bearing responses refresh the derived result tabs.
    pub async fn process_step(&self, step_name: &str, payload: Value) -> AppResult<Value> {
        self.ensure_authorized()?;
        match self
            .engine
            .process_step(&self.sessions, step_name, payload)
            .await
        {
            Ok(result) => {
                self.errors.clear().await;
                let tabs = derive_result_tabs(&result);
                if !tabs.is_empty() {
                    *self.result_tabs.write().await = tabs;
                }
                Ok(result)
            }
            Err(e) => Err(self.surface_failure(e, true).await),
        }
    }

    /// Fetch the results export for the active session.
    ///
    /// Export failures are surfaced through the error channel only; no
    /// notification is queued.
    pub async fn export(&self, format: &str) -> AppResult<ExportedFile> {
        self.ensure_authorized()?;
        let session_id = match self.sessions.session_id().await {
            Some(id) => id,
            None => return Err(self.surface_failure(AppError::SessionRequired, false).await),
        };

        match self
            .backend
            .export(self.config.tool_type, &session_id, format)
            .await
        {
            Ok(data) => Ok(ExportedFile {
                filename: export_filename(self.config.tool_type, Utc::now().date_naive(), format),
                data,
            }),
            Err(e) => Err(self.surface_failure(AppError::Backend(e), false).await),
        }
    }

    /// Start over: tear down the step store, completed set, result tabs and
    /// current error, then create a fresh session.
    pub async fn reset(&self) -> AppResult<Option<ToolSession>> {
        self.ensure_authorized()?;
        tracing::info!(tool = %self.config.tool_type, "workflow reset");
        self.engine.clear().await;
        self.result_tabs.write().await.clear();
        self.errors.clear().await;
        self.sessions.clear().await;
        self.sessions.create().await
    }

    /// Route a failure into the error channel (and optionally a
    /// notification). Stale results were discarded deliberately and stay
    /// out of user-facing state.
    async fn surface_failure(&self, error: AppError, notify: bool) -> AppError {
        if matches!(error, AppError::StaleSession) {
            return error;
        }
        let message = error.to_string();
        self.errors.report(message.clone()).await;
        if notify {
            self.notifications.error(message).await;
        }
        error
    }

    // ------------------------------------------------------------------
    // Navigation and read access
    // ------------------------------------------------------------------

    /// Current 1-based step number.
    pub async fn current_step(&self) -> usize {
        self.engine.current_step().await
    }

    /// Advance one step (clipped).
    pub async fn next_step(&self) -> usize {
        self.engine.next_step().await
    }

    /// Go back one step (clipped).
    pub async fn prev_step(&self) -> usize {
        self.engine.prev_step().await
    }

    /// Jump to a step if it is in bounds.
    pub async fn go_to_step(&self, k: usize) -> usize {
        self.engine.go_to_step(k).await
    }

    /// Data stored for one key.
    pub async fn step_data(&self, key: &str) -> Option<Value> {
        self.engine.step_data(key).await
    }

    /// Snapshot of the whole step data store.
    pub async fn data(&self) -> HashMap<String, Value> {
        self.engine.data().await
    }

    /// Step numbers that have stored data.
    pub async fn completed_steps(&self) -> HashSet<usize> {
        self.engine.completed_steps().await
    }

    /// Currently derived result tabs.
    pub async fn result_tabs(&self) -> Vec<ResultTab> {
        self.result_tabs.read().await.clone()
    }

    /// Current session handle.
    pub async fn session(&self) -> Option<ToolSession> {
        self.sessions.current().await
    }

    /// Current session-creation state.
    pub async fn session_state(&self) -> SessionState {
        self.sessions.state().await
    }

    /// Current error, if any.
    pub async fn current_error(&self) -> Option<String> {
        self.errors.current().await
    }

    /// Clear the current error (never triggers a retry).
    pub async fn clear_error(&self) {
        self.errors.clear().await
    }

    /// The notification center, for reading and dismissing notifications.
    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    /// The active tool configuration.
    pub fn config(&self) -> &ToolConfig {
        &self.config
    }
}
