//! True Harvest REST API gateway.
//!
//! One configured client for every resource endpoint. It attaches the
//! bearer token of the logged-in admin and folds every failure into a
//! single [`GatewayError`] whose `Display` is the message shown to the user.
//!
//! # Example
//!
//! ```rust,ignore
//! use true_harvest_admin::gateway::ApiClient;
//!
//! let client = ApiClient::new(&config.api)?.with_bearer(&admin.token);
//!
//! let products = client.list_products().await?;
//! client.delete_product(&products[0].product_id, "owner-1").await?;
//! ```

mod auth;
mod client;
mod orders;
mod products;
mod subscriptions;
pub mod types;
mod users;

pub use auth::LoginResponse;
pub use client::{ApiClient, normalize_error_body};
pub use types::*;

use thiserror::Error;

/// Errors that can occur when calling the True Harvest API.
///
/// The `Display` text of each variant is user-facing: it ends up in the
/// error toast as the description.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The request never produced a response (DNS, connect, timeout, TLS).
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("{message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Normalized server message.
        message: String,
    },

    /// The response body did not match the expected shape.
    #[error("Unexpected response from server: {0}")]
    Decode(#[from] serde_json::Error),

    /// An endpoint path could not be joined onto the base URL.
    #[error("Invalid request URL: {0}")]
    Url(#[from] url::ParseError),
}

impl GatewayError {
    /// HTTP status for server-reported errors.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the server reported the resource as missing.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { status: 404, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display_is_message() {
        let err = GatewayError::Api {
            status: 422,
            message: "Mobile already registered".to_string(),
        };
        assert_eq!(err.to_string(), "Mobile already registered");
        assert_eq!(err.status(), Some(422));
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_not_found() {
        let err = GatewayError::Api {
            status: 404,
            message: "User not found".to_string(),
        };
        assert!(err.is_not_found());
    }
}
