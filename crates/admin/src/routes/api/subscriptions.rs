//! Live price derivation for the plan editor.
//!
//! The editor posts its three price inputs and the one just edited; the
//! answer carries the recomputed set. Saving derives the prices again on
//! the server, so this endpoint only drives the display.

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use true_harvest_core::{PriceDerivation, PriceError, PriceField, PriceVariation};

use crate::{middleware::RequireAdminAuth, state::AppState};

/// Build the subscriptions API router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/subscriptions/price", post(derive_price))
}

/// Price inputs as the editor holds them.
#[derive(Debug, Deserialize)]
pub struct PriceRequest {
    #[serde(default)]
    pub actual_price: Decimal,
    #[serde(default)]
    pub discounted_price: Decimal,
    #[serde(default)]
    pub discount_percent: Decimal,
    #[serde(default)]
    pub edited: PriceField,
}

/// Recomputed inputs plus the values a save would store.
#[derive(Debug, Serialize)]
pub struct PriceResponse {
    pub actual_price: Decimal,
    pub discounted_price: Decimal,
    pub discount_percent: Decimal,
    /// Whole-number percentage and savings, as shown on the plan card.
    pub stored_percent: Decimal,
    pub savings: Decimal,
}

/// Prices that cannot be derived, answered as 422 with the offending field.
#[derive(Debug)]
pub struct PriceRejection(pub PriceError);

impl IntoResponse for PriceRejection {
    fn into_response(self) -> Response {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({
                "detail": self.0.to_string(),
                "field": self.0.field().as_str(),
            })),
        )
            .into_response()
    }
}

impl PriceRequest {
    /// Derive the dependent price and the stored values.
    ///
    /// # Errors
    ///
    /// Returns a `PriceError` for out-of-range inputs or an overflowing result.
    pub fn derive(&self) -> Result<PriceResponse, PriceError> {
        let prices = PriceDerivation {
            actual_price: self.actual_price,
            discounted_price: self.discounted_price,
            discount_percent: self.discount_percent,
        };
        prices.check_range()?;
        let derived = prices.derive(self.edited)?;
        let stored = PriceVariation::from(derived);

        Ok(PriceResponse {
            actual_price: derived.actual_price,
            discounted_price: derived.discounted_price,
            discount_percent: derived.discount_percent,
            stored_percent: stored.discounted_percentage,
            savings: stored.savings(),
        })
    }
}

/// Derive the dependent price.
///
/// POST /api/subscriptions/price
pub async fn derive_price(
    RequireAdminAuth(_admin): RequireAdminAuth,
    Json(body): Json<PriceRequest>,
) -> Result<Json<PriceResponse>, PriceRejection> {
    body.derive().map(Json).map_err(|e| {
        tracing::debug!(error = %e, "Price derivation rejected");
        PriceRejection(e)
    })
}
