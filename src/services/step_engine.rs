//! Step Engine
//!
//! Owns the ordered step sequence, the current step pointer, the per-step
//! data store, and the completed-step set. A step executes either as a
//! remote call (with optional one-level response unwrapping) or as a
//! local-only state update; on failure nothing is stored, so the same step
//! can be retried.
//!
//! The engine bounds-checks the step pointer but does not enforce
//! reachability; that policy is layered on top by presentation.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

use serde_json::Value;

use insightflow_backend::BackendApi;
use insightflow_core::{StepKind, ToolConfig};

use crate::services::session_manager::SessionManager;
use crate::utils::error::{AppError, AppResult};

/// Reserved store key for the uploaded file's metadata.
pub const UPLOADED_FILE_KEY: &str = "uploadedFile";
/// Reserved store key for the normalized upload validation result.
pub const UPLOAD_RESULTS_KEY: &str = "uploadResults";

#[derive(Debug)]
struct EngineState {
    current_step: usize,
    data: HashMap<String, Value>,
    completed: HashSet<usize>,
}

impl EngineState {
    fn new() -> Self {
        Self {
            current_step: 1,
            data: HashMap::new(),
            completed: HashSet::new(),
        }
    }
}

/// The step state machine for one workflow instance.
pub struct StepEngine {
    config: Arc<ToolConfig>,
    backend: Arc<dyn BackendApi>,
    state: RwLock<EngineState>,
}

impl StepEngine {
    /// Create an engine positioned on step 1 with an empty store.
    pub fn new(config: Arc<ToolConfig>, backend: Arc<dyn BackendApi>) -> Self {
        Self {
            config,
            backend,
            state: RwLock::new(EngineState::new()),
        }
    }

    /// Number of configured steps.
    pub fn step_count(&self) -> usize {
        self.config.step_count()
    }

    /// Current 1-based step number.
    pub async fn current_step(&self) -> usize {
        self.state.read().await.current_step
    }

    /// Advance one step, clipped to the last step.
    pub async fn next_step(&self) -> usize {
        let mut state = self.state.write().await;
        if state.current_step < self.config.step_count() {
            state.current_step += 1;
        }
        state.current_step
    }

    /// Go back one step, clipped to the first step.
    pub async fn prev_step(&self) -> usize {
        let mut state = self.state.write().await;
        if state.current_step > 1 {
            state.current_step -= 1;
        }
        state.current_step
    }

    /// Jump directly to step `k` iff `1 <= k <= N`; out-of-bounds jumps are
    /// a no-op.
    pub async fn go_to_step(&self, k: usize) -> usize {
        let mut state = self.state.write().await;
        if k >= 1 && k <= self.config.step_count() {
            state.current_step = k;
        }
        state.current_step
    }

    /// Snapshot of the data stored for one key.
    pub async fn step_data(&self, key: &str) -> Option<Value> {
        self.state.read().await.data.get(key).cloned()
    }

    /// Snapshot of the whole data store.
    pub async fn data(&self) -> HashMap<String, Value> {
        self.state.read().await.data.clone()
    }

    /// Step numbers that have successfully stored data.
    pub async fn completed_steps(&self) -> HashSet<usize> {
        self.state.read().await.completed.clone()
    }

    /// Whether a 1-based step number is marked completed.
    pub async fn is_step_completed(&self, step_number: usize) -> bool {
        self.state.read().await.completed.contains(&step_number)
    }

    /// Reset pointer, store, and completed set.
    pub async fn clear(&self) {
        *self.state.write().await = EngineState::new();
    }

    /// Store a value under a key (reserved keys included) without touching
    /// the pointer.
    pub(crate) async fn insert_data(&self, key: &str, value: Value) {
        self.state.write().await.data.insert(key.to_string(), value);
    }

    /// Mark a 1-based step number completed.
    pub(crate) async fn mark_step_completed(&self, step_number: usize) {
        self.state.write().await.completed.insert(step_number);
    }

    /// Execute a step by name.
    ///
    /// Remote steps resolve the endpoint template, POST the payload with the
    /// active session id, and unwrap the response one level when the step
    /// declares an unwrap key. Local steps store the payload verbatim with
    /// no network activity. On failure nothing is stored and the pointer is
    /// left where it is.
    pub async fn process_step(
        &self,
        sessions: &SessionManager,
        step_name: &str,
        payload: Value,
    ) -> AppResult<Value> {
        let step_number = self
            .config
            .step_number(step_name)
            .ok_or_else(|| AppError::not_found(format!("Unknown step: {}", step_name)))?;
        let step = &self.config.steps[step_number - 1];

        match &step.kind {
            StepKind::Local => {
                tracing::debug!(step = step_name, "local step stored");
                self.insert_data(step_name, payload.clone()).await;
                self.mark_step_completed(step_number).await;
                Ok(payload)
            }
            StepKind::Remote {
                endpoint_template,
                response_unwrap_key,
            } => {
                let session_id = sessions
                    .session_id()
                    .await
                    .ok_or(AppError::SessionRequired)?;
                let path = endpoint_template.resolve(self.config.tool_type);
                tracing::debug!(step = step_name, %path, "dispatching remote step");

                let response = self
                    .backend
                    .process_step(&path, &session_id, &payload)
                    .await?;

                let result = match response_unwrap_key {
                    Some(key) => response.get(key).cloned().unwrap_or(response),
                    None => response,
                };

                // A session swapped out mid-flight (reset) invalidates this
                // result; discard instead of writing into the fresh store.
                if sessions.session_id().await.as_deref() != Some(session_id.as_str()) {
                    tracing::warn!(
                        step = step_name,
                        dispatched_session = %session_id,
                        "discarding step result for a replaced session"
                    );
                    return Err(AppError::StaleSession);
                }

                self.insert_data(step_name, result.clone()).await;
                self.mark_step_completed(step_number).await;
                Ok(result)
            }
        }
    }
}
