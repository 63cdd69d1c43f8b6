//! Product editor draft.

use std::collections::BTreeMap;
use std::str::FromStr;

use rust_decimal::Decimal;

use super::{FieldErrors, FormPairs};
use crate::gateway::{ProductDescription, ProductPayload, ProductRecord};
use crate::resources::VariationLabel;

/// Message shown when any variation row is incomplete.
pub const VARIATION_ERROR: &str = "Please enter valid quantity and price for all variations";

/// One row of the variation table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariationDraft {
    pub quantity: String,
    pub unit: String,
    pub price: String,
}

impl Default for VariationDraft {
    fn default() -> Self {
        Self {
            quantity: String::new(),
            unit: "unit".to_string(),
            price: String::new(),
        }
    }
}

impl VariationDraft {
    #[must_use]
    pub fn has_unit(&self, unit: &str) -> bool {
        self.unit == unit
    }

    fn parsed_price(&self) -> Option<Decimal> {
        Decimal::from_str(self.price.trim())
            .ok()
            .filter(|p| *p > Decimal::ZERO)
    }
}

/// Row edits that re-render the editor without saving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowEdit {
    AddVariation,
    RemoveVariation(usize),
    AddFeature,
    RemoveFeature(usize),
}

impl RowEdit {
    /// Parse the `intent` button value; `save` and unknown values are `None`.
    #[must_use]
    pub fn parse(intent: &str) -> Option<Self> {
        let (action, index) = intent.split_once(':').unwrap_or((intent, ""));
        let index = index.parse::<usize>().ok();
        match (action, index) {
            ("add_variation", _) => Some(Self::AddVariation),
            ("remove_variation", Some(i)) => Some(Self::RemoveVariation(i)),
            ("add_feature", _) => Some(Self::AddFeature),
            ("remove_feature", Some(i)) => Some(Self::RemoveFeature(i)),
            _ => None,
        }
    }
}

/// Editable product fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDraft {
    /// Owning user id; kept from the record when editing.
    pub userid: String,
    pub name: String,
    pub tag: String,
    /// Packaging label shared by every variation.
    pub packaging: String,
    pub description: String,
    pub features: Vec<String>,
    pub variations: Vec<VariationDraft>,
    pub is_active: bool,
}

impl ProductDraft {
    /// Defaults for a new product.
    #[must_use]
    pub fn new(owner: &str) -> Self {
        Self {
            userid: owner.to_string(),
            name: String::new(),
            tag: "fruit".to_string(),
            packaging: String::new(),
            description: String::new(),
            features: vec![String::new()],
            variations: vec![VariationDraft::default()],
            is_active: true,
        }
    }

    /// Seed from a loaded product.
    #[must_use]
    pub fn from_record(product: &ProductRecord) -> Self {
        let mut packaging = String::new();
        let variations: Vec<VariationDraft> = product
            .price
            .iter()
            .map(|(key, price)| {
                let label = VariationLabel::parse(key);
                if packaging.is_empty() {
                    if let Some(p) = &label.packaging {
                        packaging.clone_from(p);
                    }
                }
                VariationDraft {
                    quantity: label.quantity,
                    unit: label.unit,
                    price: price.normalize().to_string(),
                }
            })
            .collect();

        let mut features = product.description.ordered_features();
        if features.is_empty() {
            features.push(String::new());
        }

        Self {
            userid: product.userid.to_string(),
            name: product.name.clone(),
            tag: product.tag.clone(),
            packaging,
            description: product.description.description.clone(),
            features,
            variations: if variations.is_empty() {
                vec![VariationDraft::default()]
            } else {
                variations
            },
            is_active: product.is_active,
        }
    }

    /// Rebuild from a submitted form. Variation columns are zipped by
    /// position.
    #[must_use]
    pub fn from_form(form: &FormPairs, owner: &str) -> Self {
        let quantities = form.all("qty");
        let units = form.all("unit");
        let prices = form.all("price");
        let rows = quantities.len().max(prices.len());

        let variations: Vec<VariationDraft> = (0..rows)
            .map(|i| VariationDraft {
                quantity: quantities.get(i).copied().unwrap_or_default().to_string(),
                unit: units.get(i).copied().unwrap_or("unit").to_string(),
                price: prices.get(i).copied().unwrap_or_default().to_string(),
            })
            .collect();

        let mut features: Vec<String> = form.all("feature").into_iter().map(str::to_string).collect();
        if features.is_empty() {
            features.push(String::new());
        }

        let userid = form.first("userid");
        Self {
            userid: if userid.is_empty() { owner } else { userid }.to_string(),
            name: form.first("name").to_string(),
            tag: form.first("tag").to_string(),
            packaging: form.first("packaging").to_string(),
            description: form.first("description").to_string(),
            features,
            variations: if variations.is_empty() {
                vec![VariationDraft::default()]
            } else {
                variations
            },
            is_active: form.has("is_active"),
        }
    }

    /// Whether `tag` is the selected category.
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tag == tag
    }

    /// Apply a row edit. New rows go on top; the last row of a table is
    /// never removed.
    pub fn apply(&mut self, edit: RowEdit) {
        match edit {
            RowEdit::AddVariation => self.variations.insert(0, VariationDraft::default()),
            RowEdit::RemoveVariation(i) => {
                if self.variations.len() > 1 && i < self.variations.len() {
                    self.variations.remove(i);
                }
            }
            RowEdit::AddFeature => self.features.insert(0, String::new()),
            RowEdit::RemoveFeature(i) => {
                if self.features.len() > 1 && i < self.features.len() {
                    self.features.remove(i);
                }
            }
        }
    }

    /// Field-local checks: a name, and a quantity plus positive price on
    /// every variation row.
    #[must_use]
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if self.name.trim().is_empty() {
            errors.insert("name", "Product name is required");
        }
        let rows_ok = self
            .variations
            .iter()
            .all(|v| !v.quantity.trim().is_empty() && v.parsed_price().is_some());
        if !rows_ok {
            errors.insert("variations", VARIATION_ERROR);
        }
        errors
    }

    /// Variation label of a row under this draft's packaging.
    fn label(&self, row: &VariationDraft) -> String {
        VariationLabel {
            packaging: Some(self.packaging.trim().to_string()),
            quantity: row.quantity.trim().to_string(),
            unit: row.unit.clone(),
        }
        .to_string()
    }

    /// Build the API body. Call only after `validate` passed.
    #[must_use]
    pub fn to_payload(&self) -> ProductPayload {
        let features = self
            .features
            .iter()
            .enumerate()
            .filter(|(_, f)| !f.trim().is_empty())
            .map(|(i, f)| (format!("key{}", i + 1), f.clone()))
            .collect();

        let price: BTreeMap<String, Decimal> = self
            .variations
            .iter()
            .filter_map(|v| v.parsed_price().map(|p| (self.label(v), p)))
            .collect();

        ProductPayload {
            userid: self.userid.clone(),
            name: self.name.trim().to_string(),
            description: ProductDescription {
                description: self.description.clone(),
                features,
            },
            price,
            tag: self.tag.clone(),
            is_active: self.is_active,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn pairs(items: &[(&str, &str)]) -> FormPairs {
        FormPairs::new(
            items
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_defaults() {
        let draft = ProductDraft::new("owner-1");
        assert_eq!(draft.tag, "fruit");
        assert_eq!(draft.variations, vec![VariationDraft::default()]);
        assert_eq!(draft.features, vec![String::new()]);
        assert!(draft.is_active);
    }

    #[test]
    fn test_empty_name_is_rejected() {
        let form = pairs(&[("name", "  "), ("qty", "1"), ("unit", "kg"), ("price", "90")]);
        let errors = ProductDraft::from_form(&form, "owner-1").validate();
        assert_eq!(errors.get("name"), "Product name is required");
        assert!(!errors.has("variations"));
    }

    #[test]
    fn test_incomplete_variation_is_rejected() {
        let form = pairs(&[
            ("name", "Ghee"),
            ("qty", "1"), ("unit", "kg"), ("price", "abc"),
            ("qty", ""), ("unit", "g"), ("price", "40"),
        ]);
        let errors = ProductDraft::from_form(&form, "owner-1").validate();
        assert_eq!(errors.get("variations"), VARIATION_ERROR);
    }

    #[test]
    fn test_payload_labels_and_features() {
        let form = pairs(&[
            ("name", "Ghee"),
            ("tag", "Milk Products"),
            ("packaging", "Jar"),
            ("description", "Bilona"),
            ("feature", "Hand churned"),
            ("feature", " "),
            ("feature", "A2"),
            ("qty", "500"), ("unit", "ml"), ("price", "650"),
            ("qty", "1"), ("unit", "L"), ("price", "1200.50"),
            ("is_active", "on"),
        ]);
        let draft = ProductDraft::from_form(&form, "owner-1");
        assert!(draft.validate().is_empty());

        let payload = serde_json::to_value(draft.to_payload()).unwrap();
        assert_eq!(payload["userid"], "owner-1");
        assert_eq!(payload["price"]["Jar (500 ml)"], json!(650.0));
        assert_eq!(payload["price"]["Jar (1 L)"], json!(1200.5));
        assert_eq!(
            payload["description"],
            json!({"Description": "Bilona", "Features": {"key1": "Hand churned", "key3": "A2"}})
        );
        assert_eq!(payload["is_active"], true);
    }

    #[test]
    fn test_seed_from_record() {
        let record: ProductRecord = serde_json::from_value(json!({
            "product_id": "p1",
            "userid": "seller-9",
            "name": "Curd",
            "tag": "Milk Products",
            "price": {"Cup (200 g)": 35, "Cup (400 g)": 60},
            "description": {"Description": "Set curd", "Features": {}}
        }))
        .unwrap();

        let draft = ProductDraft::from_record(&record);
        assert_eq!(draft.userid, "seller-9");
        assert_eq!(draft.packaging, "Cup");
        assert_eq!(draft.variations.len(), 2);
        assert_eq!(draft.variations[0].quantity, "200");
        assert_eq!(draft.variations[0].unit, "g");
        assert_eq!(draft.variations[0].price, "35");
        assert_eq!(draft.features, vec![String::new()]);
    }

    #[test]
    fn test_row_edits() {
        let mut draft = ProductDraft::new("o");
        draft.apply(RowEdit::RemoveVariation(0));
        assert_eq!(draft.variations.len(), 1);

        draft.variations[0].quantity = "1".to_string();
        draft.apply(RowEdit::AddVariation);
        assert_eq!(draft.variations.len(), 2);
        assert_eq!(draft.variations[0].quantity, "");

        draft.apply(RowEdit::RemoveVariation(0));
        assert_eq!(draft.variations[0].quantity, "1");

        assert_eq!(RowEdit::parse("remove_feature:2"), Some(RowEdit::RemoveFeature(2)));
        assert_eq!(RowEdit::parse("save"), None);
        assert_eq!(RowEdit::parse("remove_variation"), None);
    }
}
