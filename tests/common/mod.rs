//! Shared test support: a programmable, call-counting mock backend and
//! tool-configuration fixtures. No network calls are made anywhere in the
//! integration suite.

// Each test binary uses its own subset of this module.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;
use serde_json::{json, Value};

use insightflow_backend::{BackendApi, BackendError, BackendResult, CreateSessionRequest, SessionCreated};
use insightflow_core::{StepConfig, ToolConfig, ToolType, UploadConfig, UploadFile};

/// Programmable mock implementation of `BackendApi`.
pub struct MockBackend {
    pub session_calls: AtomicUsize,
    pub validate_calls: AtomicUsize,
    pub step_calls: AtomicUsize,
    pub export_calls: AtomicUsize,
    /// Artificial latency for create_session, to widen race windows
    pub session_delay_ms: u64,
    /// Artificial latency for process_step
    pub step_delay_ms: u64,
    pub fail_create: Mutex<Option<BackendError>>,
    pub fail_validate: Mutex<Option<BackendError>>,
    pub fail_step: Mutex<Option<BackendError>>,
    pub fail_export: Mutex<Option<BackendError>>,
    pub validate_response: Mutex<Value>,
    pub step_response: Mutex<Value>,
    pub last_step_path: Mutex<Option<String>>,
    pub last_step_session: Mutex<Option<String>>,
    pub last_validate_fields: Mutex<Vec<(String, String)>>,
    session_counter: AtomicUsize,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            session_calls: AtomicUsize::new(0),
            validate_calls: AtomicUsize::new(0),
            step_calls: AtomicUsize::new(0),
            export_calls: AtomicUsize::new(0),
            session_delay_ms: 0,
            step_delay_ms: 0,
            fail_create: Mutex::new(None),
            fail_validate: Mutex::new(None),
            fail_step: Mutex::new(None),
            fail_export: Mutex::new(None),
            validate_response: Mutex::new(default_validate_response()),
            step_response: Mutex::new(json!({ "results": { "accuracy": 0.9 } })),
            last_step_path: Mutex::new(None),
            last_step_session: Mutex::new(None),
            last_validate_fields: Mutex::new(Vec::new()),
            session_counter: AtomicUsize::new(0),
        }
    }

    pub fn with_session_delay(mut self, ms: u64) -> Self {
        self.session_delay_ms = ms;
        self
    }

    pub fn with_step_delay(mut self, ms: u64) -> Self {
        self.step_delay_ms = ms;
        self
    }

    pub fn set_validate_response(&self, value: Value) {
        *self.validate_response.lock().unwrap() = value;
    }

    pub fn set_step_response(&self, value: Value) {
        *self.step_response.lock().unwrap() = value;
    }

    pub fn set_fail_step(&self, error: BackendError) {
        *self.fail_step.lock().unwrap() = Some(error);
    }
}

#[async_trait]
impl BackendApi for MockBackend {
    async fn create_session(
        &self,
        _tool: ToolType,
        _request: &CreateSessionRequest,
    ) -> BackendResult<SessionCreated> {
        self.session_calls.fetch_add(1, Ordering::SeqCst);
        if self.session_delay_ms > 0 {
            tokio::time::sleep(std::time::Duration::from_millis(self.session_delay_ms)).await;
        }
        if let Some(err) = self.fail_create.lock().unwrap().clone() {
            return Err(err);
        }
        let n = self.session_counter.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(SessionCreated {
            session_id: format!("session-{}", n),
        })
    }

    async fn validate_data(
        &self,
        _tool: ToolType,
        _session_id: &str,
        _file: &UploadFile,
        extra_fields: &[(String, String)],
    ) -> BackendResult<Value> {
        self.validate_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.fail_validate.lock().unwrap().clone() {
            return Err(err);
        }
        *self.last_validate_fields.lock().unwrap() = extra_fields.to_vec();
        Ok(self.validate_response.lock().unwrap().clone())
    }

    async fn process_step(
        &self,
        path: &str,
        session_id: &str,
        _payload: &Value,
    ) -> BackendResult<Value> {
        self.step_calls.fetch_add(1, Ordering::SeqCst);
        if self.step_delay_ms > 0 {
            tokio::time::sleep(std::time::Duration::from_millis(self.step_delay_ms)).await;
        }
        if let Some(err) = self.fail_step.lock().unwrap().clone() {
            return Err(err);
        }
        *self.last_step_path.lock().unwrap() = Some(path.to_string());
        *self.last_step_session.lock().unwrap() = Some(session_id.to_string());
        Ok(self.step_response.lock().unwrap().clone())
    }

    async fn export(
        &self,
        _tool: ToolType,
        _session_id: &str,
        _format: &str,
    ) -> BackendResult<Bytes> {
        self.export_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.fail_export.lock().unwrap().clone() {
            return Err(err);
        }
        Ok(Bytes::from_static(b"col_a,col_b\n1,2\n"))
    }

    async fn health_check(&self) -> BackendResult<()> {
        Ok(())
    }
}

/// Nested-shape validation response with a usable summary.
pub fn default_validate_response() -> Value {
    json!({
        "validation": {
            "validation": { "is_valid": true, "warnings": [] },
            "summary": {
                "rows": 100,
                "columns": 3,
                "column_names": ["age", "income", "label"],
                "numeric_columns": ["age", "income"]
            }
        }
    })
}

/// Five-step classification workflow: two local steps, two remote steps,
/// one local results step.
pub fn classification_config() -> ToolConfig {
    ToolConfig {
        tool_type: ToolType::Classification,
        session_name: "Classification Analysis".to_string(),
        session_description: "Guided classification workflow".to_string(),
        steps: vec![
            StepConfig::local("upload", "upload", "Upload a dataset", "upload"),
            StepConfig::local("configure", "configure", "Pick model settings", "configure"),
            StepConfig::remote(
                "train",
                "train",
                "Train the model",
                "train",
                "/api/:tool/train",
                Some("results"),
            )
            .unwrap(),
            StepConfig::remote(
                "evaluate",
                "evaluate",
                "Evaluate the model",
                "evaluate",
                "/api/:tool/evaluate",
                None,
            )
            .unwrap(),
            StepConfig::local("results", "results", "Review results", "results"),
        ],
        upload: UploadConfig::default(),
        requires_premium: false,
        requires_text_column: false,
        column_hint_field: None,
    }
}

/// Text-analysis workflow requiring a recognizable text column and sending
/// a column hint with uploads.
pub fn text_analysis_config() -> ToolConfig {
    ToolConfig {
        tool_type: ToolType::TextAnalysis,
        session_name: "Text Analysis".to_string(),
        session_description: "Guided text analysis workflow".to_string(),
        steps: vec![
            StepConfig::local("upload", "upload", "Upload a dataset", "upload"),
            StepConfig::local("configure", "configure", "Pick analysis settings", "configure"),
            StepConfig::remote(
                "analyze",
                "analyze",
                "Run the analysis",
                "analyze",
                "/api/:tool/analyze",
                Some("results"),
            )
            .unwrap(),
            StepConfig::local("results", "results", "Review results", "results"),
        ],
        upload: UploadConfig::default(),
        requires_premium: false,
        requires_text_column: true,
        column_hint_field: Some("text_column".to_string()),
    }
}

/// A small CSV upload with the given header row.
pub fn csv_file(name: &str, header: &str) -> UploadFile {
    let data = format!("{}\n1,2,3\n", header).into_bytes();
    UploadFile::new(name, "text/csv", data)
}
