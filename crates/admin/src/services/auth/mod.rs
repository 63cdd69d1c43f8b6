//! Admin authentication.
//!
//! The login form hands credentials to an [`AuthPolicy`]. Which policy runs
//! is decided by configuration:
//!
//! - [`StaticCredentialPolicy`] - one configured username/password pair,
//!   mints a local token.
//! - [`ApiLoginPolicy`] - forwards to `POST /auth/login` and keeps the token
//!   the API returns.

mod error;

pub use error::AuthError;

use std::sync::Arc;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use tracing::instrument;
use uuid::Uuid;

use crate::config::AuthMode;
use crate::gateway::{ApiClient, GatewayError};
use crate::models::CurrentAdmin;

/// Checks login credentials and produces the session identity.
#[async_trait]
pub trait AuthPolicy: Send + Sync {
    /// Verify `username`/`password` and return the identity to store.
    ///
    /// # Errors
    ///
    /// Returns `AuthError` when the credentials are rejected or the check
    /// itself fails.
    async fn authenticate(&self, username: &str, password: &str)
    -> Result<CurrentAdmin, AuthError>;

    /// Short name for logs.
    fn name(&self) -> &'static str;
}

/// Build the policy selected by configuration.
#[must_use]
pub fn policy_from_config(mode: &AuthMode, client: &ApiClient) -> Arc<dyn AuthPolicy> {
    match mode {
        AuthMode::Static { username, password } => Arc::new(StaticCredentialPolicy::new(
            username.clone(),
            password.clone(),
        )),
        AuthMode::Api => Arc::new(ApiLoginPolicy::new(client.clone())),
    }
}

fn require_filled(username: &str, password: &str) -> Result<(), AuthError> {
    if username.trim().is_empty() || password.is_empty() {
        return Err(AuthError::MissingCredentials);
    }
    Ok(())
}

// =============================================================================
// Static credentials
// =============================================================================

/// Compares against a single configured username/password pair.
pub struct StaticCredentialPolicy {
    username: String,
    password: SecretString,
}

impl StaticCredentialPolicy {
    /// Create a policy accepting exactly this pair.
    #[must_use]
    pub const fn new(username: String, password: SecretString) -> Self {
        Self { username, password }
    }
}

#[async_trait]
impl AuthPolicy for StaticCredentialPolicy {
    #[instrument(skip(self, password))]
    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<CurrentAdmin, AuthError> {
        require_filled(username, password)?;

        if username.trim() != self.username || password != self.password.expose_secret() {
            tracing::warn!("Rejected static credential login");
            return Err(AuthError::InvalidCredentials);
        }

        Ok(CurrentAdmin {
            username: self.username.clone(),
            role: "admin".to_string(),
            token: format!("mock-admin-token-{}", Uuid::new_v4()),
        })
    }

    fn name(&self) -> &'static str {
        "static"
    }
}

// =============================================================================
// API login
// =============================================================================

/// Forwards credentials to the REST API's login endpoint.
///
/// The username field carries the admin's mobile number.
pub struct ApiLoginPolicy {
    client: ApiClient,
}

impl ApiLoginPolicy {
    /// Create a policy that logs in through `client`.
    #[must_use]
    pub const fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

/// Pull a display name and role out of the loosely typed `user` object.
fn identity_from_user(user: Option<&Value>, fallback: &str) -> (String, String) {
    let field = |key: &str| {
        user.and_then(|u| u.get(key))
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    let username = field("username")
        .or_else(|| field("name"))
        .unwrap_or_else(|| fallback.to_string());
    let role = field("role").unwrap_or_else(|| "admin".to_string());
    (username, role)
}

#[async_trait]
impl AuthPolicy for ApiLoginPolicy {
    #[instrument(skip(self, password))]
    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<CurrentAdmin, AuthError> {
        require_filled(username, password)?;

        let response = match self.client.login(username.trim(), password).await {
            Ok(response) => response,
            Err(GatewayError::Api {
                status: 401 | 403, ..
            }) => return Err(AuthError::InvalidCredentials),
            Err(e) => return Err(e.into()),
        };

        let token = response
            .session_token()
            .ok_or(AuthError::MissingToken)?
            .to_string();
        let (username, role) = identity_from_user(response.user.as_ref(), username.trim());

        Ok(CurrentAdmin {
            username,
            role,
            token,
        })
    }

    fn name(&self) -> &'static str {
        "api"
    }
}
