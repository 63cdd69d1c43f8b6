//! Order detail panel handler.

use axum::{
    extract::{Path, Query, State},
    response::Html,
};
use tower_sessions::Session;
use tracing::instrument;

use super::list::{api, page};
use crate::{
    collection::{ListQuery, RemoteCollection},
    middleware::RequireAdminAuth,
    models::Toast,
    state::AppState,
};

/// Orders list with one order's detail panel open.
///
/// GET /orders/{id}
#[instrument(skip(admin, state, session))]
pub async fn show(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
    Query(query): Query<ListQuery>,
) -> Html<String> {
    let collection = RemoteCollection::fetch(api(&state, &admin)).await;
    let detail = collection.find(&id).cloned();

    let toasts = if detail.is_none() && collection.error().is_none() {
        vec![Toast::error("Order not found", format!("No order with id {id} is loaded."))]
    } else {
        vec![]
    };
    page(&session, &admin, &query, &collection, detail, toasts).await
}
