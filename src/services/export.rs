//! Results Export
//!
//! Fetching the export happens through `BackendApi::export`; this module
//! owns the download naming convention and the save-to-disk helper.

use std::path::{Path, PathBuf};

use bytes::Bytes;
use chrono::NaiveDate;

use insightflow_core::ToolType;

/// Download filename for an export: `{tool}_results_{ISO date}.{format}`.
pub fn export_filename(tool: ToolType, date: NaiveDate, format: &str) -> String {
    format!("{}_results_{}.{}", tool.as_str(), date.format("%Y-%m-%d"), format)
}

/// An export payload ready to hand to the host as a download.
#[derive(Debug, Clone)]
pub struct ExportedFile {
    /// Suggested download filename
    pub filename: String,
    /// Raw export bytes
    pub data: Bytes,
}

impl ExportedFile {
    /// Write the export into `dir` under its suggested filename.
    pub fn save_to(&self, dir: &Path) -> std::io::Result<PathBuf> {
        let path = dir.join(&self.filename);
        std::fs::write(&path, &self.data)?;
        Ok(path)
    }
}
