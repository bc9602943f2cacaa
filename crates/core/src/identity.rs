//! User Identity
//!
//! The authenticated identity supplied by the host's auth collaborator.
//! The orchestrator only inspects it; it never performs authentication.

use serde::{Deserialize, Serialize};

/// Identity of the user driving a workflow.
///
/// An anonymous identity blocks the whole workflow before any session is
/// created; premium entitlement gates tools configured to require it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserIdentity {
    /// Stable user identifier from the auth provider
    pub user_id: String,
    /// Whether this is an anonymous/guest identity
    pub is_anonymous: bool,
    /// Whether the user holds a premium entitlement
    pub is_premium: bool,
}

impl UserIdentity {
    /// Create an authenticated, non-premium identity.
    pub fn authenticated(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            is_anonymous: false,
            is_premium: false,
        }
    }

    /// Create an authenticated identity with premium entitlement.
    pub fn premium(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            is_anonymous: false,
            is_premium: true,
        }
    }

    /// Create an anonymous identity.
    pub fn anonymous() -> Self {
        Self {
            user_id: String::new(),
            is_anonymous: true,
            is_premium: false,
        }
    }
}
