//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                               - Redirect to /dashboard
//! GET  /dashboard                      - Summary cards and recent orders
//!
//! # Auth
//! GET  /auth/login                     - Login page
//! POST /auth/login                     - Submit credentials
//! POST /auth/logout                    - Logout
//!
//! # Products
//! GET  /products                       - Card grid (?q=&category=&page=)
//! GET  /products/new                   - Grid with the create editor open
//! POST /products                       - Create
//! GET  /products/{id}                  - Grid with the detail panel open
//! GET  /products/{id}/edit             - Grid with the edit editor open
//! POST /products/{id}                  - Update
//! POST /products/{id}/delete           - Delete
//!
//! # Orders (read-only)
//! GET  /orders                         - Table (?q=&status=&page=)
//! GET  /orders/export.csv              - CSV of the filtered table
//! GET  /orders/{id}                    - Detail panel
//!
//! # Customers
//! GET  /customers                      - Table (?q=&status=&page=)
//! GET  /customers/new                  - Create editor
//! POST /customers                      - Create
//! GET  /customers/{id}                 - Detail panel
//! GET  /customers/{id}/edit            - Edit editor (re-fetches the user)
//! POST /customers/{id}                 - Update
//!
//! # Subscriptions
//! GET  /subscriptions                  - Plan grid
//! GET  /subscriptions/new              - Create editor
//! POST /subscriptions                  - Create
//! GET  /subscriptions/{id}             - Detail panel
//! GET  /subscriptions/{id}/edit        - Edit editor
//! POST /subscriptions/{id}             - Update
//! POST /subscriptions/{id}/delete      - Delete
//! POST /api/subscriptions/price        - Live price derivation (JSON)
//!
//! # Public pages (sidebar only when logged in)
//! GET  /deactivate-user                - Account deletion
//! POST /deactivate-user                - Delete account by mobile number
//! GET  /privacy-policy                 - Privacy policy
//! ```
//!
//! Every list screen renders its editor or detail panel on top of the list
//! itself, so a POST handler answers with the refreshed list page directly.

pub mod account;
pub mod api;
pub mod auth;
pub mod customers;
pub mod dashboard;
pub mod orders;
pub mod products;
pub mod subscriptions;

use askama::Template;
use axum::{
    Router,
    response::{Html, Redirect},
    routing::get,
};
use tower_sessions::Session;

use crate::{middleware::take_toasts, models::CurrentAdmin, models::Toast, state::AppState};

/// Admin user view for templates.
#[derive(Debug, Clone)]
pub struct AdminUserView {
    pub name: String,
    pub role: String,
    pub initial: String,
}

impl From<&CurrentAdmin> for AdminUserView {
    fn from(admin: &CurrentAdmin) -> Self {
        Self {
            name: admin.username.clone(),
            role: admin.role.clone(),
            initial: admin.initial(),
        }
    }
}

/// Page chrome shared by every template.
#[derive(Debug, Clone)]
pub struct Layout {
    /// Logged-in admin; `None` renders the bare public layout.
    pub admin_user: Option<AdminUserView>,
    /// Path of the active sidebar entry.
    pub current_path: String,
    /// Toasts to show on this page.
    pub toasts: Vec<Toast>,
}

impl Layout {
    /// Chrome for a page, draining the session's queued toasts first and
    /// appending `toasts` after them.
    pub async fn new(
        session: &Session,
        admin: Option<&CurrentAdmin>,
        current_path: &str,
        toasts: Vec<Toast>,
    ) -> Self {
        let mut pending = take_toasts(session).await;
        pending.extend(toasts);
        Self {
            admin_user: admin.map(AdminUserView::from),
            current_path: current_path.to_string(),
            toasts: pending,
        }
    }

    /// Whether `path` is the active sidebar entry.
    #[must_use]
    pub fn is_active(&self, path: &str) -> bool {
        self.current_path == path
    }
}

/// Render a template, logging failures.
pub fn render(template: &impl Template) -> Html<String> {
    Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {}", e);
        "Internal Server Error".to_string()
    }))
}

/// Build the complete admin router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { Redirect::to("/dashboard") }))
        .merge(auth::router())
        .merge(dashboard::router())
        .merge(products::router())
        .merge(orders::router())
        .merge(customers::router())
        .merge(subscriptions::router())
        .merge(account::router())
        .merge(api::router())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_user_view() {
        let admin = CurrentAdmin {
            username: "meera".to_string(),
            role: "admin".to_string(),
            token: "t".to_string(),
        };
        let view = AdminUserView::from(&admin);
        assert_eq!(view.name, "meera");
        assert_eq!(view.initial, "M");
    }
}
