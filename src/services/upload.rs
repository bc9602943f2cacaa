//! Upload Pipeline
//!
//! Validates a file locally, uploads it against the active session, and
//! normalizes the backend's validation response into the canonical shape.
//! On success the store receives `{uploadedFile, uploadResults}` and the
//! step pointer auto-advances unless the backend flagged the dataset
//! invalid. On failure nothing is stored for the step, so the user can fix
//! the file and retry at once.

use std::sync::Arc;

use serde_json::{json, Value};

use insightflow_backend::BackendApi;
use insightflow_core::{ToolConfig, UploadFile};
use insightflow_validation::{
    find_text_column, normalize, require_text_column, validate_local, CanonicalValidationResult,
};

use crate::services::session_manager::SessionManager;
use crate::services::step_engine::{StepEngine, UPLOADED_FILE_KEY, UPLOAD_RESULTS_KEY};
use crate::utils::error::{AppError, AppResult};

/// Cap on the header sniff used for the best-effort column hint.
const HEADER_SNIFF_BYTES: usize = 4096;

/// Orchestrates one file upload end to end.
pub struct UploadPipeline {
    config: Arc<ToolConfig>,
    backend: Arc<dyn BackendApi>,
}

impl UploadPipeline {
    /// Create the pipeline for a tool configuration.
    pub fn new(config: Arc<ToolConfig>, backend: Arc<dyn BackendApi>) -> Self {
        Self { config, backend }
    }

    /// Run local checks, upload, normalize, and store the result.
    pub async fn run(
        &self,
        sessions: &SessionManager,
        engine: &StepEngine,
        file: &UploadFile,
    ) -> AppResult<CanonicalValidationResult> {
        validate_local(file, &self.config.upload)?;

        let session_id = sessions
            .session_id()
            .await
            .ok_or(AppError::SessionRequired)?;

        let extra_fields = self.column_hint_fields(file);
        tracing::debug!(
            file = %file.file_name,
            size = file.size_bytes(),
            "dispatching upload for validation"
        );

        let raw = self
            .backend
            .validate_data(self.config.tool_type, &session_id, file, &extra_fields)
            .await?;

        let result = normalize(&raw)?;

        if self.config.requires_text_column {
            let columns = self.known_columns(&result, file);
            require_text_column(&columns)?;
        }

        // A session swapped out mid-flight (reset) invalidates this result.
        if sessions.session_id().await.as_deref() != Some(session_id.as_str()) {
            tracing::warn!(
                file = %file.file_name,
                dispatched_session = %session_id,
                "discarding upload result for a replaced session"
            );
            return Err(AppError::StaleSession);
        }

        let upload_step = engine.current_step().await;
        engine
            .insert_data(UPLOADED_FILE_KEY, file_metadata(file))
            .await;
        engine
            .insert_data(UPLOAD_RESULTS_KEY, serde_json::to_value(&result)?)
            .await;
        engine.mark_step_completed(upload_step).await;

        if result.is_valid() {
            engine.next_step().await;
        }

        Ok(result)
    }

    /// Auxiliary multipart fields: the best-effort column hint, when the
    /// tool declares a field for it and a candidate column is detectable
    /// from the file's header row.
    fn column_hint_fields(&self, file: &UploadFile) -> Vec<(String, String)> {
        let Some(field) = &self.config.column_hint_field else {
            return Vec::new();
        };
        let columns = sniff_header_columns(file);
        match find_text_column(&columns) {
            Some(column) => vec![(field.clone(), column.to_string())],
            None => Vec::new(),
        }
    }

    /// Column names for the post-upload text-column check: the backend's
    /// summary when it has one, else the sniffed header row.
    fn known_columns(&self, result: &CanonicalValidationResult, file: &UploadFile) -> Vec<String> {
        let from_summary = result
            .summary
            .as_ref()
            .map(|s| s.column_names.clone())
            .unwrap_or_default();
        if !from_summary.is_empty() {
            return from_summary;
        }
        sniff_header_columns(file)
    }
}

/// Store entry describing the uploaded file.
fn file_metadata(file: &UploadFile) -> Value {
    json!({
        "name": file.file_name,
        "size": file.size_bytes(),
        "type": file.content_type,
    })
}

/// Best-effort read of a delimited header row from the first line of the
/// file. Real parsing happens server-side; this only feeds the column hint
/// and the pre-advance text-column check.
fn sniff_header_columns(file: &UploadFile) -> Vec<String> {
    let window = &file.data[..file.data.len().min(HEADER_SNIFF_BYTES)];
    let text = String::from_utf8_lossy(window);
    let Some(first_line) = text.lines().next() else {
        return Vec::new();
    };
    first_line
        .split(',')
        .map(|col| col.trim().trim_matches('"').to_string())
        .filter(|col| !col.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sniff_header_columns() {
        let file = UploadFile::new(
            "reviews.csv",
            "text/csv",
            b"id,\"review_text\",rating\n1,nice,5\n".to_vec(),
        );
        assert_eq!(
            sniff_header_columns(&file),
            vec!["id", "review_text", "rating"]
        );
    }

    #[test]
    fn test_sniff_header_empty_file() {
        let file = UploadFile::new("empty.csv", "text/csv", Vec::new());
        assert!(sniff_header_columns(&file).is_empty());
    }

    #[test]
    fn test_file_metadata_shape() {
        let file = UploadFile::new("data.csv", "text/csv", vec![0u8; 10]);
        let meta = file_metadata(&file);
        assert_eq!(meta["name"], "data.csv");
        assert_eq!(meta["size"], 10);
        assert_eq!(meta["type"], "text/csv");
    }
}
