//! Step Engine Integration Tests
//!
//! Remote dispatch with template resolution and response unwrapping,
//! local-step purity, pointer bounds, failure semantics, result-tab
//! derivation, and the stale-session guard.

mod common;

use std::sync::atomic::Ordering;
use std::sync::Arc;

use serde_json::json;

use common::{classification_config, MockBackend};
use insightflow::{AppError, ToolContext};
use insightflow_backend::BackendError;
use insightflow_core::UserIdentity;

async fn started_context(backend: Arc<MockBackend>) -> ToolContext {
    let ctx = ToolContext::new(
        classification_config(),
        UserIdentity::authenticated("user-1"),
        backend,
    )
    .unwrap();
    ctx.start().await.unwrap();
    ctx
}

#[tokio::test]
async fn remote_step_resolves_template_and_unwraps_response() {
    let backend = Arc::new(MockBackend::new());
    backend.set_step_response(json!({ "results": { "accuracy": 0.93 }, "elapsed_ms": 1200 }));
    let ctx = started_context(Arc::clone(&backend)).await;
    let session_id = ctx.session().await.unwrap().session_id;

    let result = ctx
        .process_step("train", json!({ "target": "label" }))
        .await
        .unwrap();

    assert_eq!(
        backend.last_step_path.lock().unwrap().as_deref(),
        Some("/api/classification/train")
    );
    assert_eq!(
        backend.last_step_session.lock().unwrap().as_deref(),
        Some(session_id.as_str())
    );

    // Unwrapped one level under the configured key.
    assert_eq!(result, json!({ "accuracy": 0.93 }));
    assert_eq!(
        ctx.step_data("train").await.unwrap(),
        json!({ "accuracy": 0.93 })
    );
    assert!(ctx.completed_steps().await.contains(&3));
}

#[tokio::test]
async fn remote_step_without_unwrap_key_stores_full_response() {
    let backend = Arc::new(MockBackend::new());
    backend.set_step_response(json!({ "metrics": { "f1": 0.8 } }));
    let ctx = started_context(Arc::clone(&backend)).await;

    let result = ctx.process_step("evaluate", json!({})).await.unwrap();
    assert_eq!(result, json!({ "metrics": { "f1": 0.8 } }));
    assert_eq!(ctx.step_data("evaluate").await.unwrap(), result);
}

#[tokio::test]
async fn local_step_stores_payload_verbatim_with_no_network() {
    let backend = Arc::new(MockBackend::new());
    let ctx = started_context(Arc::clone(&backend)).await;

    let payload = json!({ "target": "label", "model": "random_forest" });
    let result = ctx.process_step("configure", payload.clone()).await.unwrap();

    assert_eq!(result, payload);
    assert_eq!(ctx.step_data("configure").await.unwrap(), payload);
    assert_eq!(backend.step_calls.load(Ordering::SeqCst), 0);
    assert!(ctx.completed_steps().await.contains(&2));
}

#[tokio::test]
async fn unknown_step_is_not_found() {
    let backend = Arc::new(MockBackend::new());
    let ctx = started_context(Arc::clone(&backend)).await;

    let err = ctx.process_step("predict", json!({})).await.unwrap_err();
    assert!(err.to_string().contains("Unknown step: predict"));
    assert!(ctx.step_data("predict").await.is_none());
}

#[tokio::test]
async fn pointer_is_clipped_to_bounds() {
    let backend = Arc::new(MockBackend::new());
    let ctx = started_context(Arc::clone(&backend)).await;

    assert_eq!(ctx.current_step().await, 1);
    assert_eq!(ctx.prev_step().await, 1);

    assert_eq!(ctx.go_to_step(0).await, 1);
    assert_eq!(ctx.go_to_step(99).await, 1);

    assert_eq!(ctx.go_to_step(5).await, 5);
    assert_eq!(ctx.next_step().await, 5);

    assert_eq!(ctx.go_to_step(2).await, 2);
    assert_eq!(ctx.next_step().await, 3);
    assert_eq!(ctx.prev_step().await, 2);
}

#[tokio::test]
async fn step_failure_leaves_key_unset_and_allows_retry() {
    let backend = Arc::new(MockBackend::new());
    backend.set_fail_step(BackendError::ServerError {
        message: "training crashed".to_string(),
        status: Some(500),
    });
    let ctx = started_context(Arc::clone(&backend)).await;
    ctx.go_to_step(3).await;

    let err = ctx.process_step("train", json!({})).await.unwrap_err();
    assert!(err.to_string().contains("training crashed"));
    assert!(ctx.step_data("train").await.is_none());
    assert!(!ctx.completed_steps().await.contains(&3));
    assert_eq!(ctx.current_step().await, 3);
    assert!(ctx.current_error().await.is_some());

    // Retry is a distinct, explicit call against the same step.
    *backend.fail_step.lock().unwrap() = None;
    ctx.process_step("train", json!({})).await.unwrap();
    assert!(ctx.step_data("train").await.is_some());
    assert!(ctx.current_error().await.is_none());
}

#[tokio::test]
async fn results_bearing_step_refreshes_result_tabs_in_priority_order() {
    let backend = Arc::new(MockBackend::new());
    backend.set_step_response(json!({
        "cluster_data": { "k": 3 },
        "metrics": { "silhouette": 0.55 }
    }));
    let ctx = started_context(Arc::clone(&backend)).await;

    ctx.process_step("evaluate", json!({})).await.unwrap();

    let tabs = ctx.result_tabs().await;
    let keys: Vec<&str> = tabs.iter().map(|t| t.key.as_str()).collect();
    assert_eq!(keys, vec!["metrics", "cluster_data"]);
}

#[tokio::test]
async fn step_result_arriving_after_reset_is_discarded() {
    let backend = Arc::new(MockBackend::new().with_step_delay(150));
    let ctx = Arc::new(
        ToolContext::new(
            classification_config(),
            UserIdentity::authenticated("user-1"),
            backend.clone(),
        )
        .unwrap(),
    );
    ctx.start().await.unwrap();

    let in_flight = {
        let ctx = Arc::clone(&ctx);
        tokio::spawn(async move { ctx.process_step("train", json!({})).await })
    };

    // Let the step dispatch, then start over while it is in flight.
    tokio::time::sleep(std::time::Duration::from_millis(40)).await;
    ctx.reset().await.unwrap();

    let outcome = in_flight.await.unwrap();
    assert!(matches!(outcome, Err(AppError::StaleSession)));
    // The fresh store never saw the stale result.
    assert!(ctx.step_data("train").await.is_none());
    assert!(ctx.completed_steps().await.is_empty());
}
