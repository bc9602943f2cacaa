//! Column Policies
//!
//! Two explicit, testable policies that earlier iterations of the product
//! left implicit:
//! - text-column detection for the text-analysis tool, against a fixed
//!   synonym set, case-insensitive substring match, leftmost column wins
//! - target-column suggestion: a backend-supplied value always wins,
//!   otherwise the last numeric column is proposed (heuristic, not a
//!   guarantee of correctness)

use crate::error::{ValidationError, ValidationResult};

/// Column-name fragments recognized as "the text column".
pub const TEXT_COLUMN_SYNONYMS: &[&str] = &["text", "content", "body", "message"];

/// Find the leftmost column whose name contains one of the recognized
/// synonyms (case-insensitive).
pub fn find_text_column<'a>(columns: &'a [String]) -> Option<&'a str> {
    columns
        .iter()
        .find(|col| {
            let lower = col.to_lowercase();
            TEXT_COLUMN_SYNONYMS.iter().any(|syn| lower.contains(syn))
        })
        .map(|s| s.as_str())
}

/// Require that a recognizable text column exists, naming the synonym set
/// in the failure message.
pub fn require_text_column(columns: &[String]) -> ValidationResult<()> {
    if find_text_column(columns).is_some() {
        return Ok(());
    }
    Err(ValidationError::MissingTextColumn {
        synonyms: TEXT_COLUMN_SYNONYMS.join(", "),
    })
}

/// Pick a target column suggestion.
///
/// The backend's explicit suggestion always wins; otherwise the last numeric
/// column is proposed, and `None` when there are no numeric columns.
pub fn suggest_target_column(
    explicit: Option<String>,
    numeric_columns: &[String],
) -> Option<String> {
    explicit.or_else(|| numeric_columns.last().cloned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_find_text_column_exact_and_substring() {
        assert_eq!(find_text_column(&cols(&["id", "text"])), Some("text"));
        assert_eq!(
            find_text_column(&cols(&["id", "review_body", "score"])),
            Some("review_body")
        );
        assert_eq!(find_text_column(&cols(&["id", "Message"])), Some("Message"));
    }

    #[test]
    fn test_find_text_column_leftmost_wins() {
        assert_eq!(
            find_text_column(&cols(&["content", "body", "text"])),
            Some("content")
        );
    }

    #[test]
    fn test_find_text_column_none() {
        assert_eq!(find_text_column(&cols(&["id", "rating"])), None);
    }

    #[test]
    fn test_require_text_column_error_names_synonyms() {
        let err = require_text_column(&cols(&["id", "rating"])).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("text"));
        assert!(msg.contains("content"));
        assert!(msg.contains("body"));
        assert!(msg.contains("message"));
    }

    #[test]
    fn test_suggest_target_prefers_explicit() {
        let suggestion = suggest_target_column(
            Some("churn".to_string()),
            &cols(&["age", "income", "score"]),
        );
        assert_eq!(suggestion.as_deref(), Some("churn"));
    }

    #[test]
    fn test_suggest_target_falls_back_to_last_numeric() {
        let suggestion = suggest_target_column(None, &cols(&["age", "income", "score"]));
        assert_eq!(suggestion.as_deref(), Some("score"));
    }

    #[test]
    fn test_suggest_target_none_without_numeric_columns() {
        assert_eq!(suggest_target_column(None, &[]), None);
    }
}
