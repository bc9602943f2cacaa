//! Notification Center
//!
//! A small FIFO queue of transient status messages with a fixed
//! time-to-live. Expired entries are pruned on access and by an explicit
//! sweep; no background task is required inside a library crate.

use chrono::{Duration, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::models::notification::{Notification, NotificationKind};

/// Default notification time-to-live.
const DEFAULT_TTL_MS: i64 = 5_000;

/// FIFO queue of transient, auto-expiring notifications.
#[derive(Debug)]
pub struct NotificationCenter {
    entries: Mutex<Vec<Notification>>,
    ttl: Duration,
}

impl NotificationCenter {
    /// Create a center with the default TTL.
    pub fn new() -> Self {
        Self::with_ttl(Duration::milliseconds(DEFAULT_TTL_MS))
    }

    /// Create a center with a custom TTL.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            ttl,
        }
    }

    /// Queue a notification, returning its generated id.
    pub async fn add(&self, kind: NotificationKind, message: impl Into<String>) -> Uuid {
        let notification = Notification::new(kind, message, self.ttl);
        let id = notification.id;
        self.entries.lock().await.push(notification);
        id
    }

    /// Queue a success notification.
    pub async fn success(&self, message: impl Into<String>) -> Uuid {
        self.add(NotificationKind::Success, message).await
    }

    /// Queue an error notification.
    pub async fn error(&self, message: impl Into<String>) -> Uuid {
        self.add(NotificationKind::Error, message).await
    }

    /// Queue an info notification.
    pub async fn info(&self, message: impl Into<String>) -> Uuid {
        self.add(NotificationKind::Info, message).await
    }

    /// Dismiss a notification before it expires. Returns whether it existed.
    pub async fn dismiss(&self, id: Uuid) -> bool {
        let mut entries = self.entries.lock().await;
        let before = entries.len();
        entries.retain(|n| n.id != id);
        entries.len() != before
    }

    /// Currently visible notifications, in insertion order. Expired entries
    /// are pruned as a side effect.
    pub async fn active(&self) -> Vec<Notification> {
        let now = Utc::now();
        let mut entries = self.entries.lock().await;
        entries.retain(|n| !n.is_expired_at(now));
        entries.clone()
    }

    /// Drop expired entries without returning the rest.
    pub async fn sweep(&self) {
        let now = Utc::now();
        self.entries.lock().await.retain(|n| !n.is_expired_at(now));
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new()
    }
}
