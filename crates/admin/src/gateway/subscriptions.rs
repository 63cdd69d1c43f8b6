//! Subscription plan endpoints.

use reqwest::Method;
use serde_json::Value;
use tracing::instrument;

use super::{ApiClient, GatewayError, PlanPayload, PlanRecord};
use true_harvest_core::PlanId;

impl ApiClient {
    /// Fetch every subscription plan.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not a plan list.
    #[instrument(skip(self))]
    pub async fn list_plans(&self) -> Result<Vec<PlanRecord>, GatewayError> {
        self.get_json(&["subscription-plans"]).await
    }

    /// Create a plan.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects the payload.
    #[instrument(skip(self, payload), fields(name = %payload.name))]
    pub async fn create_plan(&self, payload: &PlanPayload) -> Result<Value, GatewayError> {
        self.send_json(Method::POST, &["subscription-plans"], payload)
            .await
    }

    /// Replace a plan.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects the payload.
    #[instrument(skip(self, payload), fields(plan_id = %id))]
    pub async fn update_plan(&self, id: &PlanId, payload: &PlanPayload) -> Result<Value, GatewayError> {
        self.send_json(Method::PUT, &["subscription-plans", id.as_str()], payload)
            .await
    }

    /// Delete a plan owned by `userid`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server refuses.
    #[instrument(skip(self), fields(plan_id = %id))]
    pub async fn delete_plan(&self, id: &PlanId, userid: &str) -> Result<Value, GatewayError> {
        self.delete(&["subscription-plans", id.as_str()], &[("userid", userid)])
            .await
    }
}
