//! Result Tab Derivation
//!
//! Inspects a results payload and produces the ordered list of named views
//! presentation should offer. The scan walks a fixed priority list, so tab
//! order never depends on the payload's own key enumeration order. A
//! payload with no known keys yields an empty list and presentation falls
//! back to its default view.

use serde_json::Value;

use crate::models::results::ResultTab;

/// Known result-shape keys, in display priority order.
const RESULT_TAB_PRIORITY: &[(&str, &str)] = &[
    ("comparison_data", "Comparison"),
    ("visualization_data", "Visualizations"),
    ("feature_importance", "Feature Importance"),
    ("metrics", "Metrics"),
    ("cluster_data", "Clusters"),
    ("sentiment_data", "Sentiment"),
    ("topic_data", "Topics"),
];

/// Derive result tabs from an arbitrary results payload.
pub fn derive_result_tabs(payload: &Value) -> Vec<ResultTab> {
    RESULT_TAB_PRIORITY
        .iter()
        .filter(|(key, _)| payload.get(key).is_some())
        .map(|(key, name)| ResultTab::new(*name, *key))
        .collect()
}
