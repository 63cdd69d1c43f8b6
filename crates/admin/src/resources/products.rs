//! Product catalog resource.

use std::fmt;

use async_trait::async_trait;
use rust_decimal::Decimal;
use true_harvest_core::ProductId;

use super::format::format_inr;
use crate::collection::{Mutation, ResourceSource, ResourceWriter, Searchable, contains_ci};
use crate::gateway::{ApiClient, GatewayError, ProductPayload, ProductRecord};
use crate::models::Toast;

/// Categories offered by the editor: `(tag, label)`.
pub const CATEGORIES: [(&str, &str); 3] = [
    ("Milk Products", "Milk Products"),
    ("Vegetables", "Vegetables"),
    ("fruit", "Fruits"),
];

/// Label of the "no restriction" category filter.
pub const ALL_CATEGORIES: &str = "All Products";

/// Units a variation quantity can be expressed in.
pub const UNITS: [&str; 5] = ["g", "kg", "ml", "L", "unit"];

/// Display label for a category tag.
#[must_use]
pub fn category_label(tag: &str) -> &str {
    CATEGORIES
        .iter()
        .find(|(t, _)| *t == tag)
        .map_or(tag, |(_, label)| label)
}

/// A price variation key such as `Box (500 g)` or `1 kg`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariationLabel {
    pub packaging: Option<String>,
    pub quantity: String,
    pub unit: String,
}

impl VariationLabel {
    /// Split a stored key back into its parts.
    ///
    /// `"{packaging} ({qty} {unit})"` is tried first, then `"{qty} {unit}"`
    /// split at the last space. Anything else keeps the whole key as the
    /// quantity with the `unit` unit.
    #[must_use]
    pub fn parse(key: &str) -> Self {
        let packaged = key
            .strip_suffix(')')
            .and_then(|inner| inner.split_once(" ("))
            .and_then(|(packaging, bracketed)| {
                bracketed
                    .rsplit_once(' ')
                    .map(|(quantity, unit)| (packaging, quantity, unit))
            });
        if let Some((packaging, quantity, unit)) = packaged {
            return Self {
                packaging: Some(packaging.to_string()),
                quantity: quantity.to_string(),
                unit: unit.to_string(),
            };
        }

        match key.rsplit_once(' ') {
            Some((quantity, unit)) => Self {
                packaging: None,
                quantity: quantity.to_string(),
                unit: unit.to_string(),
            },
            None => Self {
                packaging: None,
                quantity: key.to_string(),
                unit: "unit".to_string(),
            },
        }
    }
}

impl fmt::Display for VariationLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.packaging.as_deref().filter(|p| !p.is_empty()) {
            Some(packaging) => write!(f, "{packaging} ({} {})", self.quantity, self.unit),
            None => write!(f, "{} {}", self.quantity, self.unit),
        }
    }
}

impl Searchable for ProductRecord {
    fn record_id(&self) -> &str {
        self.product_id.as_str()
    }

    fn matches_search(&self, needle: &str) -> bool {
        contains_ci(&self.name, needle)
    }

    fn matches_selector(&self, selector: &str) -> bool {
        self.tag.eq_ignore_ascii_case(selector)
    }
}

/// One priced variation, ready for display.
#[derive(Debug, Clone)]
pub struct VariationView {
    pub label: String,
    pub price: String,
}

/// Product card and detail panel view.
#[derive(Debug, Clone)]
pub struct ProductView {
    pub id: String,
    pub name: String,
    pub category: String,
    pub description: String,
    pub features: Vec<String>,
    pub variations: Vec<VariationView>,
    /// Lowest variation price, for the card.
    pub starting_price: String,
    pub is_active: bool,
}

impl From<&ProductRecord> for ProductView {
    fn from(product: &ProductRecord) -> Self {
        let starting_price = product
            .price
            .values()
            .min()
            .copied()
            .map_or_else(String::new, format_inr);

        Self {
            id: product.product_id.to_string(),
            name: product.name.clone(),
            category: category_label(&product.tag).to_string(),
            description: product.description.description.clone(),
            features: product.description.ordered_features(),
            variations: product
                .price
                .iter()
                .map(|(label, price)| VariationView {
                    label: label.clone(),
                    price: format_inr(*price),
                })
                .collect(),
            starting_price,
            is_active: product.is_active,
        }
    }
}

/// Products endpoints bound to the owning user.
#[derive(Debug, Clone)]
pub struct ProductsApi {
    client: ApiClient,
    owner: String,
}

impl ProductsApi {
    #[must_use]
    pub const fn new(client: ApiClient, owner: String) -> Self {
        Self { client, owner }
    }

    /// User id products are created and deleted under.
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }
}

#[async_trait]
impl ResourceSource for ProductsApi {
    type Record = ProductRecord;

    async fn fetch_all(&self) -> Result<Vec<ProductRecord>, GatewayError> {
        self.client.list_products().await
    }
}

#[async_trait]
impl ResourceWriter for ProductsApi {
    type Payload = ProductPayload;

    async fn create(&self, payload: &ProductPayload) -> Result<(), GatewayError> {
        self.client.create_product(payload).await.map(drop)
    }

    async fn update(&self, id: &str, payload: &ProductPayload) -> Result<(), GatewayError> {
        self.client
            .update_product(&ProductId::new(id), payload)
            .await
            .map(drop)
    }

    async fn delete(&self, id: &str) -> Result<(), GatewayError> {
        self.client
            .delete_product(&ProductId::new(id), &self.owner)
            .await
            .map(drop)
    }

    fn success_toast(&self, mutation: Mutation, label: &str) -> Toast {
        match mutation {
            Mutation::Create => {
                Toast::success("Product Added", format!("{label} has been added to your inventory."))
            }
            Mutation::Update => {
                Toast::success("Product Updated", format!("{label} has been updated successfully."))
            }
            Mutation::Delete => {
                Toast::success("Product Deleted", "The product has been removed successfully.")
            }
        }
    }

    fn failure_toast(&self, mutation: Mutation, error: &GatewayError) -> Toast {
        match mutation {
            Mutation::Delete => Toast::error("Delete Failed", error.to_string()),
            Mutation::Create | Mutation::Update => {
                Toast::error("Error Saving Product", error.to_string())
            }
        }
    }
}

/// Lowest price of a product, if it has any variation.
#[must_use]
pub fn lowest_price(product: &ProductRecord) -> Option<Decimal> {
    product.price.values().min().copied()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn product(json: serde_json::Value) -> ProductRecord {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_parse_packaged_label() {
        let label = VariationLabel::parse("Glass Bottle (500 ml)");
        assert_eq!(label.packaging.as_deref(), Some("Glass Bottle"));
        assert_eq!(label.quantity, "500");
        assert_eq!(label.unit, "ml");
        assert_eq!(label.to_string(), "Glass Bottle (500 ml)");
    }

    #[test]
    fn test_parse_simple_label() {
        let label = VariationLabel::parse("1.5 kg");
        assert_eq!(label.packaging, None);
        assert_eq!(label.quantity, "1.5");
        assert_eq!(label.unit, "kg");
        assert_eq!(label.to_string(), "1.5 kg");
    }

    #[test]
    fn test_parse_bare_label() {
        let label = VariationLabel::parse("Dozen");
        assert_eq!(label.quantity, "Dozen");
        assert_eq!(label.unit, "unit");
    }

    #[test]
    fn test_empty_packaging_is_omitted() {
        let label = VariationLabel {
            packaging: Some(String::new()),
            quantity: "2".to_string(),
            unit: "L".to_string(),
        };
        assert_eq!(label.to_string(), "2 L");
    }

    #[test]
    fn test_category_label() {
        assert_eq!(category_label("fruit"), "Fruits");
        assert_eq!(category_label("Vegetables"), "Vegetables");
        assert_eq!(category_label("Grains"), "Grains");
    }

    #[test]
    fn test_search_and_category() {
        let p = product(serde_json::json!({
            "product_id": "p1",
            "name": "Organic Mangoes",
            "tag": "fruit",
            "price": {"1 kg": 180}
        }));
        assert!(p.matches_search("mango"));
        assert!(!p.matches_search("milk"));
        assert!(p.matches_selector("fruit"));
        assert!(!p.matches_selector("Vegetables"));
    }

    #[test]
    fn test_view_prices() {
        let p = product(serde_json::json!({
            "product_id": 7,
            "name": "Paneer",
            "tag": "Milk Products",
            "price": {"200 g": 95, "1 kg": 420}
        }));
        let view = ProductView::from(&p);
        assert_eq!(view.id, "7");
        assert_eq!(view.starting_price, "₹95");
        assert_eq!(view.variations.len(), 2);
        assert_eq!(lowest_price(&p), Some(Decimal::new(95, 0)));
    }
}
