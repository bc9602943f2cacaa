//! Tool Types
//!
//! Identifies the guided analysis workflows the orchestrator can drive.
//! The slug form feeds endpoint paths and export filenames.

use serde::{Deserialize, Serialize};

/// One of the supported analytical workflows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolType {
    /// Exploratory data analysis
    Eda,
    /// Supervised classification
    Classification,
    /// Unsupervised clustering
    Clustering,
    /// Text analysis (sentiment, topics)
    TextAnalysis,
}

impl ToolType {
    /// Slug used in endpoint paths and export filenames.
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolType::Eda => "eda",
            ToolType::Classification => "classification",
            ToolType::Clustering => "clustering",
            ToolType::TextAnalysis => "text_analysis",
        }
    }

    /// Human-readable display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            ToolType::Eda => "Exploratory Data Analysis",
            ToolType::Classification => "Classification",
            ToolType::Clustering => "Clustering",
            ToolType::TextAnalysis => "Text Analysis",
        }
    }
}

impl std::fmt::Display for ToolType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_type_slugs() {
        assert_eq!(ToolType::Eda.as_str(), "eda");
        assert_eq!(ToolType::Classification.as_str(), "classification");
        assert_eq!(ToolType::Clustering.as_str(), "clustering");
        assert_eq!(ToolType::TextAnalysis.as_str(), "text_analysis");
    }

    #[test]
    fn test_tool_type_serialization() {
        let json = serde_json::to_string(&ToolType::TextAnalysis).unwrap();
        assert_eq!(json, "\"text_analysis\"");

        let parsed: ToolType = serde_json::from_str("\"classification\"").unwrap();
        assert_eq!(parsed, ToolType::Classification);
    }

    #[test]
    fn test_tool_type_display() {
        assert_eq!(ToolType::Clustering.to_string(), "clustering");
        assert_eq!(ToolType::Eda.display_name(), "Exploratory Data Analysis");
    }
}
