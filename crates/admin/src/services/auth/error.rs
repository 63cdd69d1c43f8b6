//! Admin authentication error types.

use thiserror::Error;

use crate::gateway::GatewayError;

/// Errors that can occur while logging an admin in.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Username or password left blank.
    #[error("Please enter both username and password")]
    MissingCredentials,

    /// The credentials did not match.
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// The login endpoint answered without a token.
    #[error("Login response did not include a token")]
    MissingToken,

    /// The login endpoint could not be reached or refused the request.
    #[error("{0}")]
    Gateway(#[from] GatewayError),
}
