//! Validation Response Normalization
//!
//! The backend's upload-validation endpoint answers in one of three shapes,
//! depending on tool and backend revision:
//! 1. nested : `{ "validation": { "validation": {...}, "summary": {...} } }`
//! 2. flat   : `{ "validation": {...}, "data_info": { rows, columns, memory_mb } }`
//! 3. bare   : `{ "validation": {...}, "summary": {...} }`
//!
//! Each shape is attempted in that order via a typed parse. A payload that
//! matches none of them yields `ValidationError::UnrecognizedShape` so
//! malformed responses surface in tests instead of being masked by silent
//! defaults. Within a recognized shape, a backend that is silent on
//! validity defaults to valid.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::columns::suggest_target_column;
use crate::error::{ValidationError, ValidationResult};

/// Validation verdict, always well-formed after normalization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    /// Whether the dataset passed validation (defaults to true when the
    /// backend is silent on the matter)
    pub is_valid: bool,
    /// Hard validation errors
    pub errors: Vec<String>,
    /// Non-fatal warnings
    pub warnings: Vec<String>,
    /// Suggested follow-ups (e.g. "drop constant columns")
    pub recommendations: Vec<String>,
}

/// Dataset shape summary. Parsed from the backend's `summary` object or
/// synthesized from `data_info` for the flat response shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetSummary {
    /// Row count
    #[serde(default)]
    pub rows: Option<u64>,
    /// Column count
    #[serde(default)]
    pub columns: Option<u64>,
    /// In-memory size in megabytes
    #[serde(default, alias = "memory_mb")]
    pub memory_mb: Option<f64>,
    /// All column names
    #[serde(default, alias = "column_names")]
    pub column_names: Vec<String>,
    /// Names of numeric columns
    #[serde(default, alias = "numeric_columns")]
    pub numeric_columns: Vec<String>,
}

/// The single normalized shape every validation response is converted into
/// before reaching presentation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalValidationResult {
    /// Normalized verdict
    pub validation: ValidationReport,
    /// Dataset summary, when the backend provided or implied one
    pub summary: Option<DatasetSummary>,
    /// Numeric column names (from the summary, else a top-level hint)
    pub numeric_columns: Vec<String>,
    /// Proposed target column (backend-supplied, else last numeric column)
    pub suggested_target: Option<String>,
    /// The raw backend payload, untouched
    pub raw: Value,
}

impl CanonicalValidationResult {
    /// Whether the upload may auto-advance the step pointer.
    pub fn is_valid(&self) -> bool {
        self.validation.is_valid
    }
}

// ============================================================================
// Raw wire shapes (deserialize-only)
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
struct RawValidation {
    #[serde(default, alias = "isValid")]
    is_valid: Option<bool>,
    #[serde(default)]
    errors: Vec<String>,
    #[serde(default)]
    warnings: Vec<String>,
    #[serde(default)]
    recommendations: Vec<String>,
}

impl RawValidation {
    fn into_report(self) -> ValidationReport {
        ValidationReport {
            is_valid: self.is_valid.unwrap_or(true),
            errors: self.errors,
            warnings: self.warnings,
            recommendations: self.recommendations,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawDataInfo {
    #[serde(default)]
    rows: Option<u64>,
    #[serde(default)]
    columns: Option<u64>,
    #[serde(default)]
    memory_mb: Option<f64>,
    #[serde(default)]
    column_names: Vec<String>,
    #[serde(default)]
    numeric_columns: Vec<String>,
}

/// Shape 1: the true payload is nested one level under `validation`.
#[derive(Debug, Deserialize)]
struct NestedShape {
    validation: NestedInner,
}

#[derive(Debug, Deserialize)]
struct NestedInner {
    validation: RawValidation,
    #[serde(default)]
    summary: Option<DatasetSummary>,
}

/// Shape 2: flat verdict plus a `data_info` block to synthesize a summary from.
#[derive(Debug, Deserialize)]
struct FlatShape {
    validation: RawValidation,
    data_info: RawDataInfo,
}

/// Shape 3: verdict and summary side by side.
#[derive(Debug, Deserialize)]
struct BareShape {
    validation: RawValidation,
    #[serde(default)]
    summary: Option<DatasetSummary>,
}

// ============================================================================
// Normalization
// ============================================================================

/// Reconcile a raw validation response into `CanonicalValidationResult`.
pub fn normalize(raw: &Value) -> ValidationResult<CanonicalValidationResult> {
    let (report, summary) = if let Ok(nested) = serde_json::from_value::<NestedShape>(raw.clone())
    {
        tracing::debug!("validation response matched nested shape");
        (nested.validation.validation.into_report(), nested.validation.summary)
    } else if let Ok(flat) = serde_json::from_value::<FlatShape>(raw.clone()) {
        tracing::debug!("validation response matched flat data_info shape");
        let info = flat.data_info;
        let summary = DatasetSummary {
            rows: info.rows,
            columns: info.columns,
            memory_mb: info.memory_mb,
            column_names: info.column_names,
            numeric_columns: info.numeric_columns,
        };
        (flat.validation.into_report(), Some(summary))
    } else if let Ok(bare) = serde_json::from_value::<BareShape>(raw.clone()) {
        tracing::debug!("validation response matched bare shape");
        (bare.validation.into_report(), bare.summary)
    } else {
        return Err(ValidationError::UnrecognizedShape(shape_preview(raw)));
    };

    let numeric_columns = summary
        .as_ref()
        .filter(|s| !s.numeric_columns.is_empty())
        .map(|s| s.numeric_columns.clone())
        .unwrap_or_else(|| top_level_string_list(raw, "numeric_columns"));

    let explicit_target = top_level_string(raw, "suggested_target");
    let suggested_target = suggest_target_column(explicit_target, &numeric_columns);

    Ok(CanonicalValidationResult {
        validation: report,
        summary,
        numeric_columns,
        suggested_target,
        raw: raw.clone(),
    })
}

/// Top-level string hint, accepting snake_case and camelCase spellings.
fn top_level_string(raw: &Value, key: &str) -> Option<String> {
    raw.get(key)
        .or_else(|| raw.get(camel_case(key)))
        .and_then(Value::as_str)
        .map(String::from)
}

/// Top-level string-list hint, accepting snake_case and camelCase spellings.
fn top_level_string_list(raw: &Value, key: &str) -> Vec<String> {
    raw.get(key)
        .or_else(|| raw.get(camel_case(key)))
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}

fn camel_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut upper_next = false;
    for ch in key.chars() {
        if ch == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }
    out
}

/// Short description of an unrecognized payload for error messages.
fn shape_preview(raw: &Value) -> String {
    match raw {
        Value::Object(map) => {
            let keys: Vec<&str> = map.keys().map(String::as_str).collect();
            format!("object with keys [{}]", keys.join(", "))
        }
        Value::Array(items) => format!("array of {} items", items.len()),
        other => format!("{:?}", other),
    }
}
