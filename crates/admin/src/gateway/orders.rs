//! Order endpoints. Orders are read-only from the admin panel.

use tracing::instrument;

use super::{ApiClient, GatewayError, OrderRecord};

impl ApiClient {
    /// Fetch every order.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not an order list.
    #[instrument(skip(self))]
    pub async fn list_orders(&self) -> Result<Vec<OrderRecord>, GatewayError> {
        self.get_json(&["orders"]).await
    }
}
