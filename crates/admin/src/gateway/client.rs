//! HTTP client plumbing shared by every endpoint module.

use std::sync::Arc;

use reqwest::{Method, RequestBuilder, StatusCode, header::CONTENT_TYPE};
use secrecy::{ExposeSecret, SecretString};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::instrument;
use url::Url;

use super::GatewayError;
use crate::config::ApiConfig;

/// True Harvest REST API client.
///
/// Cheap to clone. The base client is shared; [`with_bearer`](Self::with_bearer)
/// returns a copy that authenticates as a particular admin.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
    token: Option<SecretString>,
}

struct ApiClientInner {
    http: reqwest::Client,
    base_url: Url,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl ApiClient {
    /// Create a client for the configured API.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Transport` if the underlying HTTP client
    /// cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("true-harvest-admin/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                http,
                base_url: config.base_url.clone(),
            }),
            token: None,
        })
    }

    /// A copy of this client that sends `Authorization: Bearer <token>`.
    ///
    /// An empty token produces an unauthenticated client.
    #[must_use]
    pub fn with_bearer(&self, token: &str) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            token: (!token.is_empty()).then(|| SecretString::from(token.to_owned())),
        }
    }

    /// Base URL every endpoint is resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Whether requests carry a bearer token.
    #[must_use]
    pub const fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Build the URL for a sequence of path segments. Segments are
    /// percent-encoded, so ids may contain any character.
    pub(super) fn endpoint(&self, segments: &[&str]) -> Result<Url, GatewayError> {
        let mut url = self.inner.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| GatewayError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder, GatewayError> {
        let builder = self
            .inner
            .http
            .request(method, self.endpoint(segments)?)
            .header(CONTENT_TYPE, "application/json");

        Ok(match &self.token {
            Some(token) => builder.bearer_auth(token.expose_secret()),
            None => builder,
        })
    }

    /// `GET` and decode the JSON body.
    pub(super) async fn get_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
    ) -> Result<T, GatewayError> {
        let builder = self.request(Method::GET, segments)?;
        Self::execute(builder).await
    }

    /// Send a JSON body with `method` and decode the JSON reply.
    pub(super) async fn send_json<B, T>(
        &self,
        method: Method,
        segments: &[&str],
        body: &B,
    ) -> Result<T, GatewayError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.request(method, segments)?.json(body);
        Self::execute(builder).await
    }

    /// `DELETE` with optional query parameters. The reply body is returned
    /// as loose JSON (`null` when empty).
    pub(super) async fn delete(
        &self,
        segments: &[&str],
        query: &[(&str, &str)],
    ) -> Result<Value, GatewayError> {
        let mut builder = self.request(Method::DELETE, segments)?;
        if !query.is_empty() {
            builder = builder.query(query);
        }
        Self::execute(builder).await
    }

    #[instrument(skip(builder), level = "debug")]
    async fn execute<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T, GatewayError> {
        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = normalize_error_body(status, &body);
            tracing::warn!(status = status.as_u16(), %message, "API request failed");
            return Err(GatewayError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = body.trim();
        let body = if body.is_empty() { "null" } else { body };
        Ok(serde_json::from_str(body)?)
    }
}

/// Reduce an error response to one human-readable message.
///
/// Precedence: `detail` (JSON-encoded when structured), then `message`,
/// then `error`, then the raw body, then the HTTP reason phrase.
#[must_use]
pub fn normalize_error_body(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => {
            for key in ["detail", "message", "error"] {
                match map.get(key) {
                    Some(Value::String(s)) if !s.trim().is_empty() => return s.clone(),
                    Some(Value::Null | Value::String(_)) | None => {}
                    Some(other) => return other.to_string(),
                }
            }
        }
        Ok(Value::String(s)) if !s.trim().is_empty() => return s,
        _ => {}
    }

    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }

    status
        .canonical_reason()
        .map_or_else(|| format!("HTTP {}", status.as_u16()), str::to_string)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::config::parse_base_url;

    fn client(base: &str) -> ApiClient {
        ApiClient::new(&ApiConfig {
            base_url: parse_base_url(base).unwrap(),
            timeout: Duration::from_secs(5),
            default_user_id: "owner".to_string(),
        })
        .unwrap()
    }

    #[test]
    fn test_detail_string_wins() {
        let body = r#"{"detail":"Product not found","message":"ignored"}"#;
        assert_eq!(
            normalize_error_body(StatusCode::NOT_FOUND, body),
            "Product not found"
        );
    }

    #[test]
    fn test_structured_detail_is_json_encoded() {
        let body = r#"{"detail":[{"loc":["body","name"],"msg":"field required"}]}"#;
        let message = normalize_error_body(StatusCode::UNPROCESSABLE_ENTITY, body);
        assert_eq!(
            message,
            r#"[{"loc":["body","name"],"msg":"field required"}]"#
        );
    }

    #[test]
    fn test_message_then_error() {
        assert_eq!(
            normalize_error_body(StatusCode::BAD_REQUEST, r#"{"message":"Bad mobile"}"#),
            "Bad mobile"
        );
        assert_eq!(
            normalize_error_body(StatusCode::BAD_REQUEST, r#"{"error":"Duplicate"}"#),
            "Duplicate"
        );
    }

    #[test]
    fn test_raw_body_then_reason() {
        assert_eq!(
            normalize_error_body(StatusCode::BAD_GATEWAY, "upstream timed out"),
            "upstream timed out"
        );
        assert_eq!(
            normalize_error_body(StatusCode::SERVICE_UNAVAILABLE, ""),
            "Service Unavailable"
        );
        assert_eq!(
            normalize_error_body(StatusCode::INTERNAL_SERVER_ERROR, r#"{"status":"fail"}"#),
            r#"{"status":"fail"}"#
        );
    }

    #[test]
    fn test_endpoint_encodes_segments() {
        let client = client("http://localhost:8000/api");
        let url = client.endpoint(&["users", "98765 43210"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/users/98765%2043210");

        let url = client.endpoint(&["products"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/products");
    }

    #[test]
    fn test_with_bearer() {
        let base = client("http://localhost:8000");
        assert!(!base.has_token());
        assert!(base.with_bearer("abc").has_token());
        assert!(!base.with_bearer("").has_token());

        let debug = format!("{:?}", base.with_bearer("abc"));
        assert!(!debug.contains("abc"));
    }
}
