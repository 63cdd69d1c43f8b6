//! Orders route handlers.
//!
//! Orders are read-only: the API has no write endpoint for them. The list
//! can be exported as CSV and each order opens a detail panel that lists
//! the statuses it could move to next.

mod detail;
mod export;
mod list;

pub use detail::show;
pub use export::export_csv;
pub use list::{OrdersTemplate, index};

use axum::{Router, routing::get};

use crate::state::AppState;

/// Build the orders router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/orders", get(index))
        .route("/orders/export.csv", get(export_csv))
        .route("/orders/{id}", get(show))
}
