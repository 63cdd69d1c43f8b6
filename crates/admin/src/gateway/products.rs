//! Product catalog endpoints.

use reqwest::Method;
use serde_json::Value;
use tracing::instrument;

use super::{ApiClient, GatewayError, ProductPayload, ProductRecord};
use true_harvest_core::ProductId;

impl ApiClient {
    /// Fetch every product.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not a product list.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<ProductRecord>, GatewayError> {
        self.get_json(&["products"]).await
    }

    /// Create a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects the payload.
    #[instrument(skip(self, payload), fields(name = %payload.name))]
    pub async fn create_product(&self, payload: &ProductPayload) -> Result<Value, GatewayError> {
        self.send_json(Method::POST, &["products"], payload).await
    }

    /// Replace a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects the payload.
    #[instrument(skip(self, payload), fields(product_id = %id))]
    pub async fn update_product(
        &self,
        id: &ProductId,
        payload: &ProductPayload,
    ) -> Result<Value, GatewayError> {
        self.send_json(Method::PUT, &["products", id.as_str()], payload)
            .await
    }

    /// Delete a product owned by `userid`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server refuses.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn delete_product(&self, id: &ProductId, userid: &str) -> Result<Value, GatewayError> {
        self.delete(&["products", id.as_str()], &[("userid", userid)])
            .await
    }
}
