//! User (customer) endpoints.
//!
//! Single-user endpoints are keyed by an identifier, which in practice is the
//! user's mobile number.

use reqwest::Method;
use serde_json::Value;
use tracing::instrument;

use super::{ApiClient, GatewayError, UserPayload, UserRecord};

impl ApiClient {
    /// Fetch every user.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not a user list.
    #[instrument(skip(self))]
    pub async fn list_users(&self) -> Result<Vec<UserRecord>, GatewayError> {
        self.get_json(&["users"]).await
    }

    /// Fetch one user's current details.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the user does not exist.
    #[instrument(skip(self))]
    pub async fn get_user(&self, identifier: &str) -> Result<UserRecord, GatewayError> {
        self.get_json(&["users", identifier]).await
    }

    /// Create a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects the payload.
    #[instrument(skip(self, payload), fields(mobile = %payload.mobile))]
    pub async fn create_user(&self, payload: &UserPayload) -> Result<Value, GatewayError> {
        self.send_json(Method::POST, &["users"], payload).await
    }

    /// Replace a user's details.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects the payload.
    #[instrument(skip(self, payload))]
    pub async fn update_user(
        &self,
        identifier: &str,
        payload: &UserPayload,
    ) -> Result<Value, GatewayError> {
        self.send_json(Method::PUT, &["users", identifier], payload)
            .await
    }

    /// Delete a user account.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or no such user exists.
    #[instrument(skip(self))]
    pub async fn delete_user(&self, identifier: &str) -> Result<Value, GatewayError> {
        self.delete(&["users", identifier], &[]).await
    }
}
