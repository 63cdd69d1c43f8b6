//! Authentication route handlers for admin.
//!
//! Login hands the form to the configured [`AuthPolicy`](crate::services::AuthPolicy);
//! logout drops the identity from the session.

use askama::Template;
use axum::{
    Form, Router,
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use super::{Layout, render};
use crate::error::{AppError, clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::{OptionalAdminAuth, clear_current_admin, push_toast, set_current_admin};
use crate::models::Toast;
use crate::state::AppState;

/// Login page template.
#[derive(Template)]
#[template(path = "auth/login.html")]
struct LoginPageTemplate {
    layout: Layout,
    username: String,
}

/// Login form input.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Build the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/login", get(login_page).post(login))
        .route("/auth/logout", post(logout))
}

/// Render the login page.
///
/// GET /auth/login
async fn login_page(OptionalAdminAuth(admin): OptionalAdminAuth, session: Session) -> Response {
    if admin.is_some() {
        return Redirect::to("/dashboard").into_response();
    }
    login_form(&session, String::new(), vec![]).await.into_response()
}

async fn login_form(session: &Session, username: String, toasts: Vec<Toast>) -> Html<String> {
    render(&LoginPageTemplate {
        layout: Layout::new(session, None, "/auth/login", toasts).await,
        username,
    })
}

/// Check credentials and start the session.
///
/// POST /auth/login
#[instrument(skip(state, session, form), fields(username = %form.username))]
async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    match state
        .auth_policy()
        .authenticate(&form.username, &form.password)
        .await
    {
        Ok(admin) => {
            set_current_admin(&session, &admin).await?;
            set_sentry_user(&admin.username);
            tracing::info!(policy = state.auth_policy().name(), "Admin logged in");
            push_toast(
                &session,
                Toast::success("Login Successful", "Welcome back to True Harvest Admin Panel"),
            )
            .await;
            Ok(Redirect::to("/dashboard").into_response())
        }
        Err(e) => {
            tracing::warn!(error = %e, "Login rejected");
            let toast = Toast::error("Invalid Credentials", e.to_string());
            Ok(login_form(&session, form.username, vec![toast])
                .await
                .into_response())
        }
    }
}

/// Logout and clear session.
///
/// POST /auth/logout
async fn logout(session: Session) -> Result<Redirect, AppError> {
    clear_current_admin(&session).await?;
    clear_sentry_user();
    push_toast(&session, Toast::info("Logged out")).await;
    Ok(Redirect::to("/auth/login"))
}
