//! Error Channel
//!
//! Holds at most one current error message. Each new failure overwrites the
//! previous one (no queueing, unlike notifications); clearing happens on
//! explicit user action or when a subsequent operation succeeds.

use tokio::sync::RwLock;

/// Single-slot error state shared with presentation.
#[derive(Debug, Default)]
pub struct ErrorChannel {
    current: RwLock<Option<String>>,
}

impl ErrorChannel {
    /// Create an empty channel.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the current error.
    pub async fn report(&self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(error = %message, "workflow error reported");
        *self.current.write().await = Some(message);
    }

    /// Clear the current error.
    pub async fn clear(&self) {
        *self.current.write().await = None;
    }

    /// The current error, if any.
    pub async fn current(&self) -> Option<String> {
        self.current.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_report_and_clear() {
        let channel = ErrorChannel::new();
        assert!(channel.current().await.is_none());

        channel.report("Upload failed").await;
        assert_eq!(channel.current().await.as_deref(), Some("Upload failed"));

        channel.clear().await;
        assert!(channel.current().await.is_none());
    }

    #[tokio::test]
    async fn test_new_error_overwrites_previous() {
        let channel = ErrorChannel::new();
        channel.report("first").await;
        channel.report("second").await;
        assert_eq!(channel.current().await.as_deref(), Some("second"));
    }
}
