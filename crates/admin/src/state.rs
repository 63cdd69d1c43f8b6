//! Application state shared across handlers.

use std::{sync::Arc, time::Duration};

use crate::{
    config::AdminConfig,
    gateway::{ApiClient, GatewayError},
    models::CurrentAdmin,
    services::auth::{AuthPolicy, policy_from_config},
};

/// Application state shared across all handlers.
///
/// Cheap to clone; everything lives behind one `Arc` and never changes
/// after startup.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    api: ApiClient,
    auth_policy: Arc<dyn AuthPolicy>,
}

impl AppState {
    /// Build state from configuration, choosing the login policy it names.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: AdminConfig) -> Result<Self, GatewayError> {
        let api = ApiClient::new(&config.api)?;
        let auth_policy = policy_from_config(&config.auth, &api);
        Ok(Self::with_policy(config, api, auth_policy))
    }

    /// Build state around an explicit login policy.
    #[must_use]
    pub fn with_policy(config: AdminConfig, api: ApiClient, auth_policy: Arc<dyn AuthPolicy>) -> Self {
        tracing::info!(policy = auth_policy.name(), api = %api.base_url(), "Admin state ready");
        Self {
            inner: Arc::new(AppStateInner {
                config,
                api,
                auth_policy,
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// The unauthenticated API client.
    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.inner.api
    }

    #[must_use]
    pub fn auth_policy(&self) -> &dyn AuthPolicy {
        self.inner.auth_policy.as_ref()
    }

    /// API client carrying the admin's bearer token.
    #[must_use]
    pub fn client_for(&self, admin: &CurrentAdmin) -> ApiClient {
        self.inner.api.with_bearer(&admin.token)
    }

    /// User id products and plans are owned by.
    #[must_use]
    pub fn default_owner(&self) -> &str {
        &self.inner.config.api.default_user_id
    }

    /// Age after which a submit lock is treated as abandoned.
    ///
    /// A held submission makes at most two API calls, each bounded by the
    /// request timeout.
    #[must_use]
    pub fn submit_lock_ttl(&self) -> Duration {
        self.inner.config.api.timeout * 2 + Duration::from_secs(5)
    }
}
