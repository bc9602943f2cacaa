//! Notification Models
//!
//! Transient, auto-expiring status messages. Unlike the error channel,
//! multiple notifications may coexist, each with an independent expiry.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of a transient notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

/// One transient status message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    /// Generated identifier, used for manual dismissal
    pub id: Uuid,
    /// Success, error, or info
    pub kind: NotificationKind,
    /// Message shown to the user
    pub message: String,
    /// When the notification stops being shown
    pub expires_at: DateTime<Utc>,
}

impl Notification {
    /// Create a notification expiring `ttl` from now.
    pub fn new(kind: NotificationKind, message: impl Into<String>, ttl: Duration) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            message: message.into(),
            expires_at: Utc::now() + ttl,
        }
    }

    /// Whether the notification has expired at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}
