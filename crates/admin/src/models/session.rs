//! Session-related types for admin authentication.
//!
//! Types stored in the session for authentication state.

use serde::{Deserialize, Serialize};

/// Session-stored admin identity.
///
/// The presence of a non-empty `token` is what makes a session
/// authenticated. The token is never validated or expired locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentAdmin {
    /// Login name shown in the sidebar.
    pub username: String,
    /// Role label reported at login.
    pub role: String,
    /// Bearer token forwarded to the REST API.
    pub token: String,
}

impl CurrentAdmin {
    /// Whether this identity carries a usable token.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        !self.token.is_empty()
    }

    /// Initial for the avatar badge.
    #[must_use]
    pub fn initial(&self) -> String {
        self.username
            .chars()
            .next()
            .map_or_else(|| "A".to_string(), |c| c.to_uppercase().to_string())
    }
}

/// Session keys for admin data.
pub mod keys {
    /// Key for storing the current logged-in admin.
    pub const CURRENT_ADMIN: &str = "current_admin";

    /// Key for toasts waiting to be shown after a redirect.
    pub const TOASTS: &str = "toasts";

    /// Prefix for per-editor submit locks (`submit_lock:products`, ...).
    pub const SUBMIT_LOCK_PREFIX: &str = "submit_lock:";
}
