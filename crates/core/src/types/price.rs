//! Subscription pricing: the three linked numbers on a plan variation and
//! the rules that keep them consistent while an admin edits one of them.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Largest accepted actual or discounted price, in rupees.
pub const MAX_PRICE: i64 = 10_000_000;

/// One priced variation of a subscription plan, as stored by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PriceVariation {
    /// List price before discount.
    #[serde(default)]
    pub actual_price: Decimal,
    /// Price the subscriber pays.
    #[serde(default)]
    pub discounted_price: Decimal,
    /// Whole-number discount percentage.
    #[serde(default)]
    pub discounted_percentage: Decimal,
}

impl PriceVariation {
    /// Amount saved per billing cycle.
    #[must_use]
    pub fn savings(&self) -> Decimal {
        self.actual_price
            .checked_sub(self.discounted_price)
            .map_or(Decimal::ZERO, |s| s.max(Decimal::ZERO))
    }
}

impl From<PriceDerivation> for PriceVariation {
    fn from(d: PriceDerivation) -> Self {
        Self {
            actual_price: d.actual_price,
            discounted_price: d.discounted_price,
            discounted_percentage: round_half_up(d.discount_percent),
        }
    }
}

/// Which price input the admin touched last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PriceField {
    /// The list price.
    #[default]
    ActualPrice,
    /// The discounted price.
    DiscountedPrice,
    /// The discount percentage.
    DiscountPercent,
}

/// A price input that cannot be saved or derived.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceError {
    #[error("Price must be between 0 and {MAX_PRICE}")]
    PriceOutOfRange(PriceField),
    #[error("Discount must be between 0 and 100")]
    DiscountOutOfRange,
    #[error("Price must be greater than zero")]
    ActualNotPositive,
    #[error("Offer price must be greater than zero")]
    OfferNotPositive,
    #[error("Offer price cannot exceed the actual price")]
    OfferAboveActual,
    #[error("Price is too large to calculate")]
    Overflow,
}

impl PriceError {
    /// Input the error belongs to.
    #[must_use]
    pub const fn field(&self) -> PriceField {
        match self {
            Self::PriceOutOfRange(field) => *field,
            Self::DiscountOutOfRange => PriceField::DiscountPercent,
            Self::OfferNotPositive | Self::OfferAboveActual => PriceField::DiscountedPrice,
            Self::ActualNotPositive | Self::Overflow => PriceField::ActualPrice,
        }
    }
}

impl PriceField {
    /// Form field name for this input.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ActualPrice => "actual_price",
            Self::DiscountedPrice => "discounted_price",
            Self::DiscountPercent => "discount_percent",
        }
    }
}

impl std::str::FromStr for PriceField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "actual_price" => Ok(Self::ActualPrice),
            "discounted_price" => Ok(Self::DiscountedPrice),
            "discount_percent" => Ok(Self::DiscountPercent),
            _ => Err(format!("invalid price field: {s}")),
        }
    }
}

/// The three linked price inputs of the plan editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceDerivation {
    /// List price.
    pub actual_price: Decimal,
    /// Price after discount.
    pub discounted_price: Decimal,
    /// Discount, may be fractional while editing.
    pub discount_percent: Decimal,
}

impl Default for PriceDerivation {
    /// Editor defaults for a new plan: 1000 at 20% off.
    fn default() -> Self {
        Self {
            actual_price: Decimal::new(1000, 0),
            discounted_price: Decimal::new(800, 0),
            discount_percent: Decimal::new(20, 0),
        }
    }
}

impl PriceDerivation {
    /// First input outside the representable ranges: prices within
    /// `0..=MAX_PRICE`, discount within `0..=100`.
    ///
    /// # Errors
    ///
    /// Returns the offending input as a `PriceError`.
    pub fn check_range(&self) -> Result<(), PriceError> {
        let max = Decimal::from(MAX_PRICE);
        for (field, value) in [
            (PriceField::ActualPrice, self.actual_price),
            (PriceField::DiscountedPrice, self.discounted_price),
        ] {
            if value < Decimal::ZERO || value > max {
                return Err(PriceError::PriceOutOfRange(field));
            }
        }
        if self.discount_percent < Decimal::ZERO || self.discount_percent > Decimal::ONE_HUNDRED {
            return Err(PriceError::DiscountOutOfRange);
        }
        Ok(())
    }

    /// Every reason these prices cannot be saved, at most one per input.
    #[must_use]
    pub fn problems(&self) -> Vec<PriceError> {
        let mut problems = Vec::new();
        if let Err(e) = self.check_range() {
            problems.push(e);
        }
        let flagged = |problems: &[PriceError], field: PriceField| problems.iter().any(|p| p.field() == field);

        if !flagged(&problems, PriceField::ActualPrice) && self.actual_price <= Decimal::ZERO {
            problems.push(PriceError::ActualNotPositive);
        }
        if !flagged(&problems, PriceField::DiscountedPrice) {
            if self.discounted_price <= Decimal::ZERO {
                problems.push(PriceError::OfferNotPositive);
            } else if self.discounted_price > self.actual_price {
                problems.push(PriceError::OfferAboveActual);
            }
        }
        problems
    }

    /// Recompute the dependent value after `edited` changed.
    ///
    /// Editing the actual price or the discount keeps the discount and
    /// recomputes the discounted price. Editing the discounted price keeps it
    /// and recomputes the discount. The edited value itself is never touched.
    ///
    /// # Errors
    ///
    /// Returns `PriceError::Overflow` when the result is not representable.
    pub fn derive(self, edited: PriceField) -> Result<Self, PriceError> {
        Ok(match edited {
            PriceField::ActualPrice | PriceField::DiscountPercent => Self {
                discounted_price: discounted_price(self.actual_price, self.discount_percent)
                    .ok_or(PriceError::Overflow)?,
                ..self
            },
            PriceField::DiscountedPrice => Self {
                discount_percent: discount_percent(self.actual_price, self.discounted_price)
                    .ok_or(PriceError::Overflow)?,
                ..self
            },
        })
    }
}

/// Round halves toward positive infinity, matching `Math.round` in browsers.
fn round_half_up(value: Decimal) -> Decimal {
    let strategy = if value.is_sign_negative() {
        RoundingStrategy::MidpointTowardZero
    } else {
        RoundingStrategy::MidpointAwayFromZero
    };
    value.round_dp_with_strategy(0, strategy)
}

/// `round(actual * (1 - discount / 100))`, or `None` on overflow.
///
/// ```
/// use rust_decimal::Decimal;
/// use true_harvest_core::discounted_price;
///
/// assert_eq!(discounted_price(Decimal::from(1000), Decimal::from(20)), Some(Decimal::from(800)));
/// assert_eq!(discounted_price(Decimal::MAX, Decimal::from(-100)), None);
/// ```
#[must_use]
pub fn discounted_price(actual: Decimal, discount_percent: Decimal) -> Option<Decimal> {
    let factor = Decimal::ONE.checked_sub(discount_percent.checked_div(Decimal::ONE_HUNDRED)?)?;
    actual.checked_mul(factor).map(round_half_up)
}

/// `round((actual - discounted) / actual * 100)`, 0 when `actual` is 0, or
/// `None` on overflow.
///
/// ```
/// use rust_decimal::Decimal;
/// use true_harvest_core::discount_percent;
///
/// assert_eq!(discount_percent(Decimal::from(1000), Decimal::from(750)), Some(Decimal::from(25)));
/// assert_eq!(discount_percent(Decimal::ZERO, Decimal::from(10)), Some(Decimal::ZERO));
/// ```
#[must_use]
pub fn discount_percent(actual: Decimal, discounted: Decimal) -> Option<Decimal> {
    if actual.is_zero() {
        return Some(Decimal::ZERO);
    }
    actual
        .checked_sub(discounted)?
        .checked_div(actual)?
        .checked_mul(Decimal::ONE_HUNDRED)
        .map(round_half_up)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn dec(n: i64) -> Decimal {
        Decimal::from(n)
    }

    #[test]
    fn test_discount_gives_discounted_price() {
        assert_eq!(discounted_price(dec(1000), dec(20)), Some(dec(800)));
        assert_eq!(discounted_price(dec(499), dec(10)), Some(dec(449)));
    }

    #[test]
    fn test_discounted_price_gives_discount() {
        assert_eq!(discount_percent(dec(1000), dec(750)), Some(dec(25)));
        assert_eq!(discount_percent(dec(0), dec(750)), Some(dec(0)));
    }

    #[test]
    fn test_half_rounds_up() {
        assert_eq!(discounted_price(dec(999), dec(15)), Some(dec(849)));
        // 3 * 0.5 = 1.5
        assert_eq!(discounted_price(dec(3), dec(50)), Some(dec(2)));
        // (200 - 195) / 200 = 2.5%
        assert_eq!(discount_percent(dec(200), Decimal::new(1950, 1)), Some(dec(3)));
        assert_eq!(round_half_up(Decimal::new(-25, 1)), dec(-2));
    }

    #[test]
    fn test_round_trip_within_rounding() {
        for actual in [100_i64, 250, 999, 1000, 1499] {
            for discount in [0_i64, 5, 12, 20, 33, 50, 90] {
                let offer = discounted_price(dec(actual), dec(discount)).unwrap();
                let back = discount_percent(dec(actual), offer).unwrap();
                assert!(
                    (back - dec(discount)).abs() <= Decimal::ONE,
                    "actual {actual} discount {discount} came back as {back}"
                );
            }
        }
    }

    #[test]
    fn test_derive_last_edited_wins() {
        let start = PriceDerivation::default();

        let after_actual = PriceDerivation {
            actual_price: dec(2000),
            ..start
        }
        .derive(PriceField::ActualPrice)
        .unwrap();
        assert_eq!(after_actual.discounted_price, dec(1600));
        assert_eq!(after_actual.discount_percent, dec(20));

        let after_offer = PriceDerivation {
            discounted_price: dec(750),
            ..start
        }
        .derive(PriceField::DiscountedPrice)
        .unwrap();
        assert_eq!(after_offer.discount_percent, dec(25));
        assert_eq!(after_offer.discounted_price, dec(750));

        let after_discount = PriceDerivation {
            discount_percent: dec(10),
            ..start
        }
        .derive(PriceField::DiscountPercent)
        .unwrap();
        assert_eq!(after_discount.discounted_price, dec(900));
    }

    #[test]
    fn test_extreme_inputs_do_not_panic() {
        assert_eq!(discounted_price(Decimal::MAX, dec(-100)), None);
        assert_eq!(discounted_price(Decimal::MAX, Decimal::ZERO), Some(Decimal::MAX));
        assert_eq!(discount_percent(Decimal::MAX, Decimal::MIN), None);
        assert_eq!(discount_percent(Decimal::MIN, Decimal::MAX), None);

        let huge = PriceDerivation {
            actual_price: Decimal::MAX,
            discounted_price: Decimal::MIN,
            discount_percent: dec(-100),
        };
        assert_eq!(huge.derive(PriceField::DiscountPercent), Err(PriceError::Overflow));
        assert_eq!(huge.derive(PriceField::DiscountedPrice), Err(PriceError::Overflow));
        assert_eq!(
            huge.check_range(),
            Err(PriceError::PriceOutOfRange(PriceField::ActualPrice))
        );

        let variation = PriceVariation {
            actual_price: Decimal::MAX,
            discounted_price: Decimal::MIN,
            discounted_percentage: Decimal::ZERO,
        };
        assert_eq!(variation.savings(), Decimal::ZERO);
    }

    #[test]
    fn test_range_limits() {
        let base = PriceDerivation::default();
        assert_eq!(base.check_range(), Ok(()));

        let over = PriceDerivation { actual_price: dec(MAX_PRICE + 1), ..base };
        assert_eq!(over.check_range(), Err(PriceError::PriceOutOfRange(PriceField::ActualPrice)));

        let negative = PriceDerivation { discounted_price: dec(-1), ..base };
        assert_eq!(
            negative.check_range(),
            Err(PriceError::PriceOutOfRange(PriceField::DiscountedPrice))
        );

        for percent in [-1, 101, 150] {
            let discount = PriceDerivation { discount_percent: dec(percent), ..base };
            assert_eq!(discount.check_range(), Err(PriceError::DiscountOutOfRange), "{percent}");
        }
        let full = PriceDerivation { discount_percent: dec(100), ..base };
        assert_eq!(full.check_range(), Ok(()));
    }

    #[test]
    fn test_problems() {
        assert!(PriceDerivation::default().problems().is_empty());

        let free = PriceDerivation {
            discounted_price: Decimal::ZERO,
            discount_percent: dec(100),
            ..PriceDerivation::default()
        };
        assert_eq!(free.problems(), vec![PriceError::OfferNotPositive]);

        let above = PriceDerivation {
            discounted_price: dec(1200),
            ..PriceDerivation::default()
        };
        assert_eq!(above.problems(), vec![PriceError::OfferAboveActual]);

        let unpriced = PriceDerivation {
            actual_price: Decimal::ZERO,
            discounted_price: Decimal::ZERO,
            discount_percent: Decimal::ZERO,
        };
        assert_eq!(
            unpriced.problems(),
            vec![PriceError::ActualNotPositive, PriceError::OfferNotPositive]
        );

        let wild = PriceDerivation {
            discount_percent: dec(150),
            discounted_price: dec(-500),
            ..PriceDerivation::default()
        };
        let problems = wild.problems();
        assert!(problems.contains(&PriceError::PriceOutOfRange(PriceField::DiscountedPrice)));
        assert_eq!(PriceError::OfferAboveActual.field(), PriceField::DiscountedPrice);
    }

    #[test]
    fn test_variation_wire_format() {
        let variation = PriceVariation::from(PriceDerivation::default());
        let json = serde_json::to_value(variation).unwrap();
        assert_eq!(json["actualPrice"], serde_json::json!(1000.0));
        assert_eq!(json["discountedPrice"], serde_json::json!(800.0));
        assert_eq!(json["discountedPercentage"], serde_json::json!(20.0));
    }

    #[test]
    fn test_price_field_parse() {
        assert_eq!(
            "discounted_price".parse::<PriceField>().unwrap(),
            PriceField::DiscountedPrice
        );
        assert!("bogus".parse::<PriceField>().is_err());
    }
}
