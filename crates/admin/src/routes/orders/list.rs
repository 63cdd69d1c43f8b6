//! Orders list page handler.

use askama::Template;
use axum::{
    extract::{Query, State},
    response::Html,
};
use tower_sessions::Session;
use tracing::instrument;
use true_harvest_core::Page;

use super::super::{Layout, render};
use crate::{
    collection::{ListLinks, ListQuery, Pager, RemoteCollection},
    components::{DataTableConfig, orders_table_config},
    filters,
    middleware::RequireAdminAuth,
    models::{CurrentAdmin, Toast},
    resources::{Order, OrdersApi},
    state::AppState,
};

/// Orders list page template.
#[derive(Template)]
#[template(path = "orders/index.html")]
pub struct OrdersTemplate {
    pub layout: Layout,
    pub table: DataTableConfig,
    pub links: ListLinks,
    pub search: String,
    pub page: Page<Order>,
    pub pager: Pager,
    /// Message of a failed load, shown above the empty table.
    pub load_error: Option<String>,
    pub detail: Option<Order>,
}

pub(super) fn api(state: &AppState, admin: &CurrentAdmin) -> OrdersApi {
    OrdersApi::new(state.client_for(admin))
}

pub(super) async fn page(
    session: &Session,
    admin: &CurrentAdmin,
    query: &ListQuery,
    collection: &RemoteCollection<OrdersApi>,
    detail: Option<Order>,
    toasts: Vec<Toast>,
) -> Html<String> {
    let links = ListLinks::new("/orders", "status", query);
    let page = collection.view(query);
    render(&OrdersTemplate {
        layout: Layout::new(session, Some(admin), "/orders", toasts).await,
        table: orders_table_config(),
        pager: links.pager(&page),
        links,
        search: query.search().to_string(),
        page,
        load_error: collection.error().map(str::to_string),
        detail,
    })
}

/// Orders list page handler.
///
/// GET /orders
#[instrument(skip(admin, state, session))]
pub async fn index(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<ListQuery>,
) -> Html<String> {
    let collection = RemoteCollection::fetch(api(&state, &admin)).await;
    page(&session, &admin, &query, &collection, None, vec![]).await
}
