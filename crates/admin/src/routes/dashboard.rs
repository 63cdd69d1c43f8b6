//! Dashboard route handler.

use askama::Template;
use axum::{Router, extract::State, response::Html, routing::get};
use tower_sessions::Session;
use tracing::instrument;

use super::{Layout, render};
use crate::{
    collection::RemoteCollection,
    filters,
    middleware::RequireAdminAuth,
    resources::{
        CustomersApi, DashboardMetrics, Order, OrdersApi, dashboard::RECENT_ORDERS, recent_orders,
    },
    state::AppState,
};

/// Dashboard template.
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub layout: Layout,
    pub metrics: DashboardMetrics,
    pub recent_orders: Vec<Order>,
    /// Message of a failed orders load.
    pub load_error: Option<String>,
}

/// Build the dashboard router.
pub fn router() -> Router<AppState> {
    Router::new().route("/dashboard", get(dashboard))
}

/// Dashboard page handler.
#[instrument(skip(admin, state, session))]
pub async fn dashboard(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
) -> Html<String> {
    let client = state.client_for(&admin);

    // Fetch orders and customers in parallel
    let (orders, customers) = tokio::join!(
        RemoteCollection::fetch(OrdersApi::new(client.clone())),
        RemoteCollection::fetch(CustomersApi::new(client)),
    );

    if let Some(e) = customers.error() {
        tracing::warn!("Dashboard customers unavailable: {e}");
    }

    let template = DashboardTemplate {
        layout: Layout::new(&session, Some(&admin), "/dashboard", vec![]).await,
        metrics: DashboardMetrics::compute(orders.items(), customers.items()),
        recent_orders: recent_orders(orders.items(), RECENT_ORDERS),
        load_error: orders.error().map(str::to_string),
    };

    render(&template)
}
