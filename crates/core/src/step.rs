//! Step Configuration
//!
//! Describes one stage of a linear workflow. A step is either local-only
//! (pure state update) or remote (POST against a templated endpoint, with an
//! optional one-level response unwrap key). The local/remote split is a
//! tagged variant validated once when the tool configuration loads, never
//! interpreted ad hoc per call.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::tool::ToolType;

/// Placeholder substituted with the tool slug when resolving a template.
pub const TOOL_PLACEHOLDER: &str = ":tool";

/// A validated endpoint path template, e.g. `/api/:tool/train`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EndpointTemplate(String);

impl EndpointTemplate {
    /// Validate and wrap a template string.
    ///
    /// Templates must be non-empty paths starting with `/`. The `:tool`
    /// placeholder is optional; templates may already be tool-specific.
    pub fn new(template: impl Into<String>) -> CoreResult<Self> {
        let template = template.into();
        if template.is_empty() {
            return Err(CoreError::config("endpoint template must not be empty"));
        }
        if !template.starts_with('/') {
            return Err(CoreError::config(format!(
                "endpoint template must start with '/': {}",
                template
            )));
        }
        Ok(Self(template))
    }

    /// Substitute the tool placeholder, producing a concrete request path.
    pub fn resolve(&self, tool: ToolType) -> String {
        self.0.replace(TOOL_PLACEHOLDER, tool.as_str())
    }

    /// The raw template string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Whether a step runs locally or against the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepKind {
    /// Pure client-side state update; the payload is stored verbatim.
    Local,
    /// Server-backed step: POST against the resolved template.
    Remote {
        /// Endpoint path template with optional `:tool` placeholder
        endpoint_template: EndpointTemplate,
        /// Key under which the true payload is nested in the response,
        /// if the backend wraps it (varies per step, supplied per tool)
        response_unwrap_key: Option<String>,
    },
}

impl StepKind {
    /// Convenience constructor for a remote step.
    pub fn remote(template: impl Into<String>, unwrap_key: Option<&str>) -> CoreResult<Self> {
        Ok(StepKind::Remote {
            endpoint_template: EndpointTemplate::new(template)?,
            response_unwrap_key: unwrap_key.map(String::from),
        })
    }

    /// Whether this step issues a network call.
    pub fn is_remote(&self) -> bool {
        matches!(self, StepKind::Remote { .. })
    }
}

/// Definition of one workflow step, immutable for the lifetime of a tool
/// configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepConfig {
    /// Stable identifier within the tool
    pub id: String,
    /// Step name; also the StepDataStore key for its result
    pub name: String,
    /// Short description shown by presentation
    pub description: String,
    /// Key presentation uses to pick the step's view
    pub presentation_key: String,
    /// Local or remote execution
    pub kind: StepKind,
}

impl StepConfig {
    /// Create a local-only step.
    pub fn local(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        presentation_key: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            presentation_key: presentation_key.into(),
            kind: StepKind::Local,
        }
    }

    /// Create a remote step with a validated endpoint template.
    pub fn remote(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        presentation_key: impl Into<String>,
        endpoint_template: impl Into<String>,
        response_unwrap_key: Option<&str>,
    ) -> CoreResult<Self> {
        Ok(Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            presentation_key: presentation_key.into(),
            kind: StepKind::remote(endpoint_template, response_unwrap_key)?,
        })
    }

    /// Validate the step definition (invoked from `ToolConfig::validate`).
    pub fn validate(&self) -> CoreResult<()> {
        if self.id.is_empty() {
            return Err(CoreError::validation("step id must not be empty"));
        }
        if self.name.is_empty() {
            return Err(CoreError::validation(format!(
                "step '{}' has an empty name",
                self.id
            )));
        }
        Ok(())
    }
}
