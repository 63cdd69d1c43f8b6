//! Unified error handling for admin.
//!
//! Most failures never get here: list and editor handlers turn gateway
//! errors into toasts. `AppError` covers what is left, such as a broken
//! session store.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::gateway::GatewayError;

/// Application-level error type for the admin panel.
#[derive(Debug, Error)]
pub enum AppError {
    /// True Harvest API call failed.
    #[error("API error: {0}")]
    Gateway(#[from] GatewayError),

    /// Session store operation failed.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let event_id = sentry::capture_error(&self);
        tracing::error!(
            error = %self,
            sentry_event_id = %event_id,
            "Admin request error"
        );

        // Don't expose internal error details to clients
        let (status, message) = match &self {
            Self::Gateway(_) => (StatusCode::BAD_GATEWAY, "External service error"),
            Self::Session(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
        };

        (status, message).into_response()
    }
}

/// Set the Sentry user context from the logged-in admin.
pub fn set_sentry_user(username: &str) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            username: Some(username.to_string()),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::Gateway(GatewayError::Api {
            status: 409,
            message: "Mobile already registered".to_string(),
        });
        assert_eq!(err.to_string(), "API error: Mobile already registered");
    }

    #[test]
    fn test_gateway_error_is_bad_gateway() {
        let response = AppError::Gateway(GatewayError::Api {
            status: 500,
            message: "down".to_string(),
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
