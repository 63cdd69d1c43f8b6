//! Subscription plan editor draft.
//!
//! The three price inputs are linked. Whichever one the user edited last
//! (posted as `price_anchor`) is kept and the others are recomputed before
//! validation, so the saved prices are always consistent.

use std::collections::BTreeMap;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Deserialize;
use true_harvest_core::{PriceDerivation, PriceField, PriceVariation};

use super::FieldErrors;
use crate::gateway::{PlanPayload, PlanRecord};

/// Default plan length.
pub const DEFAULT_DURATION_DAYS: u32 = 30;

/// Editable plan fields, as posted by the plan form.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlanDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub product_id: String,
    #[serde(default)]
    pub duration_days: String,
    /// Comma-separated feature list.
    #[serde(default)]
    pub features: String,
    #[serde(default)]
    pub actual_price: String,
    #[serde(default)]
    pub discounted_price: String,
    #[serde(default)]
    pub discount_percent: String,
    /// Name of the price input edited last.
    #[serde(default)]
    pub price_anchor: String,
}

/// Lenient number parse: blank or garbage reads as zero.
fn number(raw: &str) -> Decimal {
    Decimal::from_str(raw.trim()).unwrap_or(Decimal::ZERO)
}

fn text(value: Decimal) -> String {
    value.normalize().to_string()
}

impl PlanDraft {
    /// Defaults for a new plan linked to `first_product`.
    #[must_use]
    pub fn new(first_product: Option<&str>) -> Self {
        let prices = PriceDerivation::default();
        Self {
            name: String::new(),
            product_id: first_product.unwrap_or_default().to_string(),
            duration_days: DEFAULT_DURATION_DAYS.to_string(),
            features: String::new(),
            actual_price: text(prices.actual_price),
            discounted_price: text(prices.discounted_price),
            discount_percent: text(prices.discount_percent),
            price_anchor: String::new(),
        }
    }

    /// Seed from a loaded plan.
    #[must_use]
    pub fn from_record(plan: &PlanRecord) -> Self {
        let price = plan.primary_price().copied().unwrap_or_default();
        Self {
            name: plan.name.clone(),
            product_id: plan.product_id.to_string(),
            duration_days: plan.duration_days.to_string(),
            features: plan.features.join(", "),
            actual_price: text(price.actual_price),
            discounted_price: text(price.discounted_price),
            discount_percent: text(price.discounted_percentage),
            price_anchor: String::new(),
        }
    }

    /// Whether the plan is linked to product `id`.
    #[must_use]
    pub fn links_product(&self, id: &str) -> bool {
        self.product_id == id
    }

    /// The edited price field, defaulting to the actual price.
    #[must_use]
    pub fn anchor(&self) -> PriceField {
        PriceField::from_str(&self.price_anchor).unwrap_or(PriceField::ActualPrice)
    }

    /// Current price inputs as numbers.
    #[must_use]
    pub fn prices(&self) -> PriceDerivation {
        PriceDerivation {
            actual_price: number(&self.actual_price),
            discounted_price: number(&self.discounted_price),
            discount_percent: number(&self.discount_percent),
        }
    }

    /// Recompute the linked prices from the anchor field.
    ///
    /// Inputs outside the accepted ranges are left as typed for
    /// [`validate`](Self::validate) to report.
    pub fn derive_prices(&mut self) {
        let prices = self.prices();
        if prices.check_range().is_err() {
            return;
        }
        let Ok(derived) = prices.derive(self.anchor()) else {
            return;
        };
        match self.anchor() {
            PriceField::ActualPrice | PriceField::DiscountPercent => {
                self.discounted_price = text(derived.discounted_price);
            }
            PriceField::DiscountedPrice => {
                self.discount_percent = text(derived.discount_percent);
            }
        }
    }

    /// Features split on commas, trimmed, blanks dropped.
    #[must_use]
    pub fn feature_list(&self) -> Vec<String> {
        self.features
            .split(',')
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(str::to_string)
            .collect()
    }

    fn duration(&self) -> Option<u32> {
        self.duration_days.trim().parse::<u32>().ok().filter(|d| *d > 0)
    }

    #[must_use]
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if self.name.trim().is_empty() {
            errors.insert("name", "Plan name is required");
        }
        if self.product_id.trim().is_empty() {
            errors.insert("product_id", "Select a product");
        }
        if self.duration().is_none() {
            errors.insert("duration_days", "Duration must be a positive number of days");
        }
        if self.feature_list().is_empty() {
            errors.insert("features", "Add at least one feature");
        }
        if self.discounted_price.trim().is_empty() {
            errors.insert("discounted_price", "Offer price is required");
        }
        for problem in self.prices().problems() {
            errors.insert(problem.field().as_str(), problem.to_string());
        }
        errors
    }

    /// Build the API body under `owner`. Call only after `validate` passed.
    #[must_use]
    pub fn to_payload(&self, owner: &str) -> PlanPayload {
        let mut price = BTreeMap::new();
        price.insert(
            PlanRecord::STANDARD_VARIATION.to_string(),
            PriceVariation::from(self.prices()),
        );

        PlanPayload {
            userid: owner.to_string(),
            product_id: self.product_id.clone(),
            name: self.name.trim().to_string(),
            price,
            duration_days: self.duration().unwrap_or(DEFAULT_DURATION_DAYS),
            features: self.feature_list(),
            is_active: true,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn filled() -> PlanDraft {
        PlanDraft {
            name: "Daily Milk".to_string(),
            features: "Morning delivery, , Pause anytime".to_string(),
            ..PlanDraft::new(Some("p1"))
        }
    }

    #[test]
    fn test_defaults() {
        let draft = PlanDraft::new(Some("p1"));
        assert_eq!(draft.product_id, "p1");
        assert_eq!(draft.duration_days, "30");
        assert_eq!(draft.actual_price, "1000");
        assert_eq!(draft.discounted_price, "800");
        assert_eq!(draft.discount_percent, "20");
    }

    #[test]
    fn test_discounted_price_anchor() {
        let mut draft = PlanDraft {
            discounted_price: "750".to_string(),
            price_anchor: "discounted_price".to_string(),
            ..filled()
        };
        draft.derive_prices();
        assert_eq!(draft.discount_percent, "25");
        assert_eq!(draft.discounted_price, "750");
    }

    #[test]
    fn test_percent_anchor() {
        let mut draft = PlanDraft {
            discount_percent: "15".to_string(),
            price_anchor: "discount_percent".to_string(),
            ..filled()
        };
        draft.derive_prices();
        assert_eq!(draft.discounted_price, "850");
    }

    #[test]
    fn test_validation() {
        let errors = PlanDraft {
            duration_days: "0".to_string(),
            actual_price: "0".to_string(),
            features: " , ".to_string(),
            ..PlanDraft::new(None)
        }
        .validate();

        for field in ["name", "product_id", "duration_days", "features", "actual_price"] {
            assert!(errors.has(field), "{field}");
        }
        assert!(filled().validate().is_empty());
    }

    fn derived(discount_percent: &str) -> PlanDraft {
        let mut draft = PlanDraft {
            discount_percent: discount_percent.to_string(),
            price_anchor: "discount_percent".to_string(),
            ..filled()
        };
        draft.derive_prices();
        draft
    }

    #[test]
    fn test_discount_over_hundred_rejected() {
        let draft = derived("150");
        // left as typed, never derived to a negative offer
        assert_eq!(draft.discounted_price, "800");
        let errors = draft.validate();
        assert_eq!(errors.get("discount_percent"), "Discount must be between 0 and 100");
    }

    #[test]
    fn test_negative_discount_rejected() {
        let errors = derived("-10").validate();
        assert!(errors.has("discount_percent"));
    }

    #[test]
    fn test_full_discount_leaves_no_offer_price() {
        let draft = derived("100");
        assert_eq!(draft.discounted_price, "0");
        assert_eq!(
            draft.validate().get("discounted_price"),
            "Offer price must be greater than zero"
        );
    }

    #[test]
    fn test_offer_above_actual_rejected() {
        let mut draft = PlanDraft {
            discounted_price: "1200".to_string(),
            price_anchor: "discounted_price".to_string(),
            ..filled()
        };
        draft.derive_prices();
        assert_eq!(
            draft.validate().get("discounted_price"),
            "Offer price cannot exceed the actual price"
        );
    }

    #[test]
    fn test_oversized_price_is_a_field_error() {
        let mut draft = PlanDraft {
            actual_price: "79228162514264337593543950335".to_string(),
            discount_percent: "-100".to_string(),
            price_anchor: "actual_price".to_string(),
            ..filled()
        };
        draft.derive_prices();
        let errors = draft.validate();
        assert!(errors.get("actual_price").starts_with("Price must be between 0 and"));
    }

    #[test]
    fn test_payload() {
        let payload = serde_json::to_value(filled().to_payload("owner-1")).unwrap();
        assert_eq!(
            payload,
            json!({
                "userid": "owner-1",
                "product_id": "p1",
                "name": "Daily Milk",
                "price": {"Standard": {"actualPrice": 1000.0, "discountedPrice": 800.0, "discountedPercentage": 20.0}},
                "duration_days": 30,
                "features": ["Morning delivery", "Pause anytime"],
                "is_active": true
            })
        );
    }
}
