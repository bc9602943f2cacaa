//! Result Models
//!
//! Named views derived from a results payload; never persisted.

use serde::{Deserialize, Serialize};

/// One dynamically derived result view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultTab {
    /// Display name
    pub name: String,
    /// Payload key the tab renders
    pub key: String,
}

impl ResultTab {
    /// Create a result tab.
    pub fn new(name: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key: key.into(),
        }
    }
}
