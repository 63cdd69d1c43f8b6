//! CSV export of the filtered orders list.

use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;
use tracing::instrument;

use super::list::api;
use crate::{
    collection::{ListLinks, ListQuery, RemoteCollection},
    middleware::{RequireAdminAuth, push_toast},
    models::{Toast, ToastKind},
    resources::{export_filename, orders_csv},
    state::AppState,
};

/// Download every order matching the current search and status filter.
///
/// An empty result sends the browser back to the list with an error toast.
///
/// GET /orders/export.csv
#[instrument(skip(admin, state, session))]
pub async fn export_csv(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<ListQuery>,
) -> Response {
    let collection = RemoteCollection::fetch(api(&state, &admin)).await;
    let orders = collection.filter(&query);

    let Some(csv) = orders_csv(&orders) else {
        push_toast(&session, Toast::titled(ToastKind::Error, "No orders to export")).await;
        let back = ListLinks::new("/orders", "status", &query).current();
        return Redirect::to(&back).into_response();
    };

    let filename = export_filename(chrono::Local::now().date_naive());
    tracing::info!(rows = orders.len(), %filename, "Orders exported");
    push_toast(
        &session,
        Toast::titled(ToastKind::Success, "Orders exported successfully"),
    )
    .await;

    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        csv,
    )
        .into_response()
}
