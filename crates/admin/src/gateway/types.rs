//! Wire types for the True Harvest REST API.
//!
//! Records are what list/detail endpoints return; payloads are what write
//! endpoints accept. Optional and loosely typed fields default rather than
//! fail, because the API omits fields freely.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use true_harvest_core::{OrderId, PlanId, PriceVariation, ProductId, UserId};

const fn default_true() -> bool {
    true
}

/// Deserialize a string field that may be `null`.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

// =============================================================================
// Products
// =============================================================================

/// Long description and feature bullets of a product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDescription {
    #[serde(rename = "Description", default, deserialize_with = "null_as_empty")]
    pub description: String,
    /// Feature bullets keyed `key1`, `key2`, ...
    #[serde(rename = "Features", default)]
    pub features: BTreeMap<String, String>,
}

impl ProductDescription {
    /// Feature bullets in `keyN` order (`key2` before `key10`).
    #[must_use]
    pub fn ordered_features(&self) -> Vec<String> {
        let mut entries: Vec<(&String, &String)> = self.features.iter().collect();
        entries.sort_by_key(|(key, _)| {
            key.strip_prefix("key")
                .and_then(|n| n.parse::<u32>().ok())
                .unwrap_or(u32::MAX)
        });
        entries.into_iter().map(|(_, v)| v.clone()).collect()
    }
}

/// A product as returned by `GET /products`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub product_id: ProductId,
    #[serde(default)]
    pub userid: UserId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default)]
    pub description: ProductDescription,
    /// Variation label to price.
    #[serde(default)]
    pub price: BTreeMap<String, Decimal>,
    /// Category.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tag: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Body of `POST /products` and `PUT /products/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductPayload {
    pub userid: String,
    pub name: String,
    pub description: ProductDescription,
    pub price: BTreeMap<String, Decimal>,
    pub tag: String,
    pub is_active: bool,
}

// =============================================================================
// Subscription plans
// =============================================================================

/// A plan as returned by `GET /subscription-plans`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanRecord {
    pub plan_id: PlanId,
    #[serde(default)]
    pub userid: UserId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default)]
    pub product_id: ProductId,
    /// Variation label to linked prices. The editor writes `Standard`.
    #[serde(default)]
    pub price: BTreeMap<String, PriceVariation>,
    #[serde(default)]
    pub duration_days: u32,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl PlanRecord {
    /// Name of the variation written by the plan editor.
    pub const STANDARD_VARIATION: &'static str = "Standard";

    /// The `Standard` variation, else the first one.
    #[must_use]
    pub fn primary_price(&self) -> Option<&PriceVariation> {
        self.price
            .get(Self::STANDARD_VARIATION)
            .or_else(|| self.price.values().next())
    }
}

/// Body of `POST /subscription-plans` and `PUT /subscription-plans/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanPayload {
    pub userid: String,
    pub product_id: String,
    pub name: String,
    pub price: BTreeMap<String, PriceVariation>,
    pub duration_days: u32,
    pub features: Vec<String>,
    pub is_active: bool,
}

// =============================================================================
// Orders
// =============================================================================

/// An order as returned by `GET /orders`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub order_id: OrderId,
    #[serde(default)]
    pub userid: Option<String>,
    #[serde(default)]
    pub mobile: Option<String>,
    #[serde(default)]
    pub delivery_address: Option<String>,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub quantities: u32,
    #[serde(default)]
    pub total_amount: Decimal,
    #[serde(default)]
    pub payment_mode: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

// =============================================================================
// Users
// =============================================================================

/// One postal address of a user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressRecord {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

/// Accept `addresses` as a list, a single object, or `null`.
fn addresses_lenient<'de, D>(deserializer: D) -> Result<Vec<AddressRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        Many(Vec<AddressRecord>),
        One(AddressRecord),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        Some(OneOrMany::Many(list)) => list,
        Some(OneOrMany::One(address)) => vec![address],
        None => Vec::new(),
    })
}

/// A user as returned by `GET /users` and `GET /users/{identifier}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(default)]
    pub userid: UserId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub mobile: String,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default, deserialize_with = "addresses_lenient")]
    pub addresses: Vec<AddressRecord>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Address entry in a user write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddressPayload {
    pub city: String,
    pub location: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Body of `POST /users` and `PUT /users/{identifier}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserPayload {
    pub role: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub mobile: String,
    pub gender: String,
    pub addresses: Vec<AddressPayload>,
}
