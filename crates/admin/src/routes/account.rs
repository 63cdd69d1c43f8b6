//! Public account pages: self-service deletion and the privacy policy.
//!
//! These pages are reachable without a session. When an admin happens to be
//! logged in the sidebar is shown and the delete call carries their token.

use askama::Template;
use axum::{Form, Router, extract::State, response::Html, routing::get};
use tower_sessions::Session;
use tracing::instrument;

use super::{Layout, render};
use crate::{
    filters,
    forms::{AccountDeletion, FieldErrors},
    middleware::OptionalAdminAuth,
    models::{CurrentAdmin, Toast},
    state::AppState,
};

/// Account deletion page.
#[derive(Template)]
#[template(path = "account/deactivate.html")]
pub struct DeactivateTemplate {
    pub layout: Layout,
    /// Sanitized mobile input.
    pub mobile: String,
    /// True once the number passed validation and awaits confirmation.
    pub confirming: bool,
    pub errors: FieldErrors,
}

/// Privacy policy page.
#[derive(Template)]
#[template(path = "privacy.html")]
pub struct PrivacyTemplate {
    pub layout: Layout,
}

/// Build the account router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/deactivate-user", get(deactivate_page).post(deactivate))
        .route("/privacy-policy", get(privacy_policy))
}

async fn deactivate_form(
    session: &Session,
    admin: Option<&CurrentAdmin>,
    mobile: String,
    confirming: bool,
    errors: FieldErrors,
    toasts: Vec<Toast>,
) -> Html<String> {
    render(&DeactivateTemplate {
        layout: Layout::new(session, admin, "/deactivate-user", toasts).await,
        mobile,
        confirming,
        errors,
    })
}

/// Empty deletion form.
///
/// GET /deactivate-user
pub async fn deactivate_page(
    OptionalAdminAuth(admin): OptionalAdminAuth,
    session: Session,
) -> Html<String> {
    deactivate_form(&session, admin.as_ref(), String::new(), false, FieldErrors::new(), vec![]).await
}

/// Two-step deletion.
///
/// The first post validates and asks for confirmation. The confirmed post
/// deletes the user and clears the form; a failure keeps the number.
///
/// POST /deactivate-user
#[instrument(skip(admin, state, session, form))]
pub async fn deactivate(
    OptionalAdminAuth(admin): OptionalAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AccountDeletion>,
) -> Html<String> {
    let mobile = match form.validate() {
        Ok(mobile) => mobile,
        Err(errors) => {
            return deactivate_form(&session, admin.as_ref(), form.sanitized(), false, errors, vec![])
                .await;
        }
    };

    if !form.is_confirmed() {
        return deactivate_form(
            &session,
            admin.as_ref(),
            mobile.to_string(),
            true,
            FieldErrors::new(),
            vec![],
        )
        .await;
    }

    let client = match &admin {
        Some(admin) => state.client_for(admin),
        None => state.api().clone(),
    };

    match client.delete_user(mobile.as_str()).await {
        Ok(_) => {
            tracing::info!("User account deleted");
            let toast = Toast::success(
                "Account Deleted",
                format!("Successfully deleted account for +91 {mobile}"),
            );
            deactivate_form(&session, admin.as_ref(), String::new(), false, FieldErrors::new(), vec![toast])
                .await
        }
        Err(e) => {
            tracing::warn!(error = %e, "Account deletion failed");
            let description = if e.to_string().trim().is_empty() {
                "Could not find a user with this mobile number.".to_string()
            } else {
                e.to_string()
            };
            let toast = Toast::error("Deletion Failed", description);
            deactivate_form(
                &session,
                admin.as_ref(),
                mobile.to_string(),
                false,
                FieldErrors::new(),
                vec![toast],
            )
            .await
        }
    }
}

/// Static privacy policy.
///
/// GET /privacy-policy
pub async fn privacy_policy(
    OptionalAdminAuth(admin): OptionalAdminAuth,
    session: Session,
) -> Html<String> {
    render(&PrivacyTemplate {
        layout: Layout::new(&session, admin.as_ref(), "/privacy-policy", vec![]).await,
    })
}
