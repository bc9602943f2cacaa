//! Upload File Handle
//!
//! An in-memory handle on a file the user dropped into the workflow. Decoding
//! the file's contents (CSV/Excel/JSON) happens server-side; the orchestrator
//! only forwards bytes and checks size and MIME type locally.

use serde::{Deserialize, Serialize};

/// A file selected for upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadFile {
    /// Original filename, e.g. `sales.csv`
    pub file_name: String,
    /// MIME type reported by the host, e.g. `text/csv`
    pub content_type: String,
    /// Raw file bytes
    #[serde(skip)]
    pub data: Vec<u8>,
}

impl UploadFile {
    /// Create a new upload handle.
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        data: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            data,
        }
    }

    /// File size in bytes.
    pub fn size_bytes(&self) -> u64 {
        self.data.len() as u64
    }
}
