//! True Harvest Admin library.
//!
//! The admin panel for the True Harvest dairy and grocery storefront. It
//! renders server-side pages over the True Harvest REST API; it keeps no
//! database of its own, only an in-memory session per browser.
//!
//! The crate is a library so the binary, the CLI and the integration tests
//! share one router and one API client.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod collection;
pub mod components;
pub mod config;
pub mod error;
pub mod filters;
pub mod forms;
pub mod gateway;
pub mod middleware;
pub mod models;
pub mod resources;
pub mod routes;
pub mod services;
pub mod state;

use axum::{Router, response::Redirect, routing::get};
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use middleware::create_session_layer;
use state::AppState;

/// Directory the stylesheet and page script are served from.
pub const STATIC_DIR: &str = "crates/admin/static";

/// Build the full application: pages, static files, sessions and tracing.
///
/// Sentry layers are added by the binary, outside this router.
pub fn app(state: AppState) -> Router {
    let session_layer = create_session_layer(state.config());

    Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .fallback(|| async { Redirect::to("/dashboard") })
        .nest_service("/static", ServeDir::new(STATIC_DIR))
        .layer(session_layer)
        .layer(axum::middleware::from_fn(middleware::request_id))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}

/// Liveness check. Does not touch the API.
async fn health() -> &'static str {
    "ok"
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use axum::{body::Body, http::Request, http::StatusCode};
    use secrecy::SecretString;
    use tower::ServiceExt;

    use super::*;
    use crate::config::{AdminConfig, ApiConfig, AuthMode};

    fn test_app() -> Router {
        let config = AdminConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3001,
            base_url: "http://localhost:3001".to_string(),
            api: ApiConfig {
                base_url: url::Url::parse("http://127.0.0.1:9/").unwrap(),
                timeout: Duration::from_secs(1),
                default_user_id: "owner-1".to_string(),
            },
            auth: AuthMode::Static {
                username: "ops".to_string(),
                password: SecretString::from("s3cr3t-Harvest!"),
            },
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 1.0,
        };
        app(AppState::new(config).unwrap())
    }

    async fn send(uri: &str) -> axum::response::Response {
        test_app()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_is_public() {
        let response = send("/health").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn test_pages_require_login() {
        let response = send("/orders").await;
        assert!(response.status().is_redirection());
        assert_eq!(response.headers()["location"], "/auth/login");
    }

    #[tokio::test]
    async fn test_unknown_path_redirects_to_dashboard() {
        let response = send("/reports").await;
        assert!(response.status().is_redirection());
        assert_eq!(response.headers()["location"], "/dashboard");
    }
}
