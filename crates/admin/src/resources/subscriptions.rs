//! Subscription plans resource.
//!
//! Plans are loaded together with the product catalog: the grid shows each
//! plan's product by name and the editor offers the catalog as choices. If
//! either request fails the whole load fails.

use std::sync::Mutex;

use async_trait::async_trait;
use true_harvest_core::{PlanId, PriceVariation};

use super::format::format_inr;
use crate::collection::{Mutation, ResourceSource, ResourceWriter, Searchable, contains_ci};
use crate::gateway::{ApiClient, GatewayError, PlanPayload, PlanRecord, ProductRecord};
use crate::models::Toast;

/// A product the plan editor can link to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductOption {
    pub id: String,
    pub name: String,
}

impl From<&ProductRecord> for ProductOption {
    fn from(product: &ProductRecord) -> Self {
        Self {
            id: product.product_id.to_string(),
            name: product.name.clone(),
        }
    }
}

/// A plan joined with its product's name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanRow {
    pub plan: PlanRecord,
    /// Linked product name, or the raw product id when it is not in the
    /// catalog.
    pub product_name: String,
}

impl PlanRow {
    #[must_use]
    pub fn join(plan: PlanRecord, catalog: &[ProductOption]) -> Self {
        let product_id = plan.product_id.as_str();
        let product_name = catalog
            .iter()
            .find(|p| p.id == product_id)
            .map_or_else(|| product_id.to_string(), |p| p.name.clone());
        Self { plan, product_name }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        self.plan.plan_id.as_str()
    }

    #[must_use]
    pub fn status_label(&self) -> &'static str {
        if self.plan.is_active { "Active" } else { "Inactive" }
    }

    /// The editable price variation, zeros when the plan has none.
    #[must_use]
    pub fn price(&self) -> PriceVariation {
        self.plan.primary_price().copied().unwrap_or_default()
    }

    #[must_use]
    pub fn actual_price(&self) -> String {
        format_inr(self.price().actual_price)
    }

    #[must_use]
    pub fn discounted_price(&self) -> String {
        format_inr(self.price().discounted_price)
    }

    #[must_use]
    pub fn savings(&self) -> String {
        format_inr(self.price().savings())
    }

    /// Discount as a whole percentage string.
    #[must_use]
    pub fn discount_percent(&self) -> String {
        self.price().discounted_percentage.normalize().to_string()
    }
}

impl Searchable for PlanRow {
    fn record_id(&self) -> &str {
        self.id()
    }

    fn matches_search(&self, needle: &str) -> bool {
        contains_ci(&self.plan.name, needle) || contains_ci(&self.product_name, needle)
    }

    fn matches_selector(&self, selector: &str) -> bool {
        self.status_label().eq_ignore_ascii_case(selector)
    }
}

/// Plan endpoints plus the product catalog of the last load.
#[derive(Debug)]
pub struct PlansApi {
    client: ApiClient,
    owner: String,
    catalog: Mutex<Vec<ProductOption>>,
}

impl PlansApi {
    /// `owner` is the user id plans are created and deleted under.
    #[must_use]
    pub const fn new(client: ApiClient, owner: String) -> Self {
        Self {
            client,
            owner,
            catalog: Mutex::new(Vec::new()),
        }
    }

    /// Delete under the plan's own user id instead of the default owner.
    #[must_use]
    pub fn with_owner(mut self, owner: Option<String>) -> Self {
        if let Some(owner) = owner.filter(|o| !o.trim().is_empty()) {
            self.owner = owner;
        }
        self
    }

    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Products loaded alongside the plans.
    #[must_use]
    pub fn catalog(&self) -> Vec<ProductOption> {
        self.catalog
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ResourceSource for PlansApi {
    type Record = PlanRow;

    async fn fetch_all(&self) -> Result<Vec<PlanRow>, GatewayError> {
        let (plans, products) =
            tokio::try_join!(self.client.list_plans(), self.client.list_products())?;
        let catalog: Vec<ProductOption> = products.iter().map(ProductOption::from).collect();

        let rows = plans
            .into_iter()
            .map(|plan| PlanRow::join(plan, &catalog))
            .collect();

        match self.catalog.lock() {
            Ok(mut guard) => *guard = catalog,
            Err(e) => tracing::warn!("Product catalog lock poisoned: {e}"),
        }
        Ok(rows)
    }
}

#[async_trait]
impl ResourceWriter for PlansApi {
    type Payload = PlanPayload;

    async fn create(&self, payload: &PlanPayload) -> Result<(), GatewayError> {
        self.client.create_plan(payload).await.map(drop)
    }

    async fn update(&self, id: &str, payload: &PlanPayload) -> Result<(), GatewayError> {
        self.client
            .update_plan(&PlanId::new(id), payload)
            .await
            .map(drop)
    }

    async fn delete(&self, id: &str) -> Result<(), GatewayError> {
        self.client
            .delete_plan(&PlanId::new(id), &self.owner)
            .await
            .map(drop)
    }

    fn success_toast(&self, mutation: Mutation, _label: &str) -> Toast {
        match mutation {
            Mutation::Create => Toast::success(
                "Plan Created",
                "The subscription plan has been created successfully.",
            ),
            Mutation::Update => Toast::success(
                "Plan Updated",
                "The subscription plan has been updated successfully.",
            ),
            Mutation::Delete => Toast::success(
                "Plan Deleted",
                "The subscription plan has been removed successfully.",
            ),
        }
    }

    fn failure_toast(&self, mutation: Mutation, error: &GatewayError) -> Toast {
        match mutation {
            Mutation::Delete => Toast::error("Delete Failed", error.to_string()),
            Mutation::Create | Mutation::Update => {
                Toast::error("Operation Failed", error.to_string())
            }
        }
    }
}
