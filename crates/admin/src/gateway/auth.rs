//! Login endpoint.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::instrument;

use super::{ApiClient, GatewayError};

#[derive(Serialize)]
struct LoginRequest<'a> {
    mobile: &'a str,
    password: &'a str,
}

/// Reply of `POST /auth/login`. The token may come under either name.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub user: Option<Value>,
}

impl LoginResponse {
    /// The session token, preferring `token` over `access_token`.
    #[must_use]
    pub fn session_token(&self) -> Option<&str> {
        self.token
            .as_deref()
            .or(self.access_token.as_deref())
            .filter(|t| !t.is_empty())
    }
}

impl ApiClient {
    /// Exchange a mobile number and password for a session token.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the credentials are rejected.
    #[instrument(skip(self, password))]
    pub async fn login(&self, mobile: &str, password: &str) -> Result<LoginResponse, GatewayError> {
        self.send_json(
            Method::POST,
            &["auth", "login"],
            &LoginRequest { mobile, password },
        )
        .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_session_token_fallback() {
        let response: LoginResponse =
            serde_json::from_str(r#"{"access_token":"at-1","user":{"name":"Ops"}}"#).unwrap();
        assert_eq!(response.session_token(), Some("at-1"));

        let response: LoginResponse =
            serde_json::from_str(r#"{"token":"t-1","access_token":"at-1"}"#).unwrap();
        assert_eq!(response.session_token(), Some("t-1"));

        let response: LoginResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(response.session_token(), None);
    }
}
