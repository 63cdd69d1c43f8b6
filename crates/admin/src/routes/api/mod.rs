//! JSON endpoints used by the page script.

pub mod subscriptions;

use axum::Router;

use crate::state::AppState;

/// Build the complete API router.
pub fn router() -> Router<AppState> {
    Router::new().merge(subscriptions::router())
}
