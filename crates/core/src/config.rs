//! Tool Configuration
//!
//! Static, per-tool configuration supplied by the host: the ordered step
//! list, session display metadata, upload limits and per-tool flags.
//! `ToolConfig::validate` runs once when the configuration loads so the
//! orchestrator never has to re-check templates or step names per call.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::step::StepConfig;
use crate::tool::ToolType;

/// Default maximum upload size: 50 MB.
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 50 * 1024 * 1024;

/// Upload limits and the MIME allow-list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Maximum accepted file size in bytes
    pub max_size_bytes: u64,
    /// Accepted MIME types
    pub allowed_mime_types: Vec<String>,
}

impl UploadConfig {
    /// Maximum size expressed in whole megabytes (for user-facing messages).
    pub fn max_size_mb(&self) -> u64 {
        self.max_size_bytes / (1024 * 1024)
    }

    /// Whether a MIME type is on the allow-list.
    pub fn allows_mime_type(&self, mime_type: &str) -> bool {
        self.allowed_mime_types
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(mime_type))
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_size_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            allowed_mime_types: vec![
                "text/csv".to_string(),
                "application/vnd.ms-excel".to_string(),
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet".to_string(),
                "application/json".to_string(),
            ],
        }
    }
}

/// Complete configuration of one guided workflow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolConfig {
    /// Which workflow this configures
    pub tool_type: ToolType,
    /// Display name sent when creating the remote session
    pub session_name: String,
    /// Display description sent when creating the remote session
    pub session_description: String,
    /// Ordered step list; step numbers are 1-based over this list
    pub steps: Vec<StepConfig>,
    /// Upload limits and MIME allow-list
    #[serde(default)]
    pub upload: UploadConfig,
    /// Whether the tool is gated behind a premium entitlement
    #[serde(default)]
    pub requires_premium: bool,
    /// Whether uploads must contain a recognizable text column
    #[serde(default)]
    pub requires_text_column: bool,
    /// Multipart field name for the best-effort column hint, when the tool
    /// sends one alongside the upload
    #[serde(default)]
    pub column_hint_field: Option<String>,
}

impl ToolConfig {
    /// Validate the configuration. Called once at load time.
    pub fn validate(&self) -> CoreResult<()> {
        if self.steps.is_empty() {
            return Err(CoreError::config(format!(
                "tool '{}' has no steps configured",
                self.tool_type
            )));
        }
        for step in &self.steps {
            step.validate()?;
        }
        let mut names: Vec<&str> = self.steps.iter().map(|s| s.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        if names.len() != self.steps.len() {
            return Err(CoreError::config(format!(
                "tool '{}' has duplicate step names",
                self.tool_type
            )));
        }
        Ok(())
    }

    /// Number of configured steps.
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Look up a step by its name.
    pub fn step_by_name(&self, name: &str) -> Option<&StepConfig> {
        self.steps.iter().find(|s| s.name == name)
    }

    /// Look up a step by its 1-based step number.
    pub fn step_at(&self, step_number: usize) -> Option<&StepConfig> {
        if step_number == 0 {
            return None;
        }
        self.steps.get(step_number - 1)
    }

    /// 1-based step number for a step name.
    pub fn step_number(&self, name: &str) -> Option<usize> {
        self.steps.iter().position(|s| s.name == name).map(|i| i + 1)
    }
}
