//! Test harness for the True Harvest admin panel.
//!
//! [`FakeApi`] stands in for the True Harvest REST API: an axum server on an
//! ephemeral port holding products, plans, users and orders in memory and
//! counting every request by method and path. [`TestApp`] serves the real
//! admin router against it and drives it with a cookie-keeping client that
//! does not follow redirects, so tests can assert on `Location` headers.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p true-harvest-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
};
use secrecy::SecretString;
use serde_json::{Value, json};
use true_harvest_admin::{
    config::{AdminConfig, ApiConfig, AuthMode},
    state::AppState,
};

/// Login accepted by every [`TestApp`].
pub const ADMIN_USERNAME: &str = "ops";
pub const ADMIN_PASSWORD: &str = "harvest-test-password";
/// Owner of seeded products and plans.
pub const OWNER: &str = "owner-1";

#[derive(Default)]
struct FakeData {
    products: Vec<Value>,
    plans: Vec<Value>,
    users: Vec<Value>,
    orders: Vec<Value>,
    /// `"METHOD /path"` to hit count.
    hits: BTreeMap<String, usize>,
    next_id: usize,
}

/// In-memory stand-in for the REST API.
#[derive(Clone, Default)]
pub struct FakeApi {
    data: Arc<Mutex<FakeData>>,
}

impl FakeApi {
    fn with<T>(&self, f: impl FnOnce(&mut FakeData) -> T) -> T {
        let mut data = self.data.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut data)
    }

    /// Seed a product.
    pub fn add_product(&self, id: &str, name: &str, tag: &str, price: u32) {
        self.with(|d| {
            d.products.push(json!({
                "product_id": id,
                "userid": OWNER,
                "name": name,
                "description": {"Description": format!("Fresh {name}"), "Features": {"key1": "Farm fresh"}},
                "price": {"500 g": price},
                "tag": tag,
                "is_active": true,
            }));
        });
    }

    /// Seed an order.
    pub fn add_order(&self, id: &str, name: &str, mobile: &str, status: &str, total: u32) {
        self.with(|d| {
            d.orders.push(json!({
                "order_id": id,
                "userid": format!("user-{mobile}"),
                "mobile": mobile,
                "delivery_address": "12 Market Road, Pune",
                "product_name": name,
                "quantities": 2,
                "total_amount": total,
                "payment_mode": "UPI",
                "status": status,
                "created_at": "2024-03-01T10:00:00Z",
            }));
        });
    }

    /// Seed a user.
    pub fn add_user(&self, mobile: &str, name: &str) {
        self.with(|d| {
            d.users.push(json!({
                "userid": format!("user-{mobile}"),
                "name": name,
                "email": format!("{}@example.com", name.to_lowercase()),
                "mobile": mobile,
                "gender": "Female",
                "role": "REALUSER",
                "addresses": [{"city": "Pune", "location": "12 Market Road", "type": "home"}],
                "is_active": true,
            }));
        });
    }

    /// Number of requests seen for `method` on `path`.
    pub fn hits(&self, method: &str, path: &str) -> usize {
        self.with(|d| d.hits.get(&format!("{method} {path}")).copied().unwrap_or(0))
    }

    /// Number of POST, PUT and DELETE requests under `prefix`.
    pub fn writes(&self, prefix: &str) -> usize {
        self.with(|d| {
            d.hits
                .iter()
                .filter(|(key, _)| {
                    let (method, path) = key.split_once(' ').unwrap_or_default();
                    method != "GET" && path.starts_with(prefix)
                })
                .map(|(_, n)| n)
                .sum()
        })
    }

    /// Forget every counted request.
    pub fn reset_hits(&self) {
        self.with(|d| d.hits.clear());
    }

    /// Names of the stored products.
    pub fn product_names(&self) -> Vec<String> {
        self.with(|d| {
            d.products
                .iter()
                .filter_map(|p| p["name"].as_str().map(str::to_string))
                .collect()
        })
    }

    fn record(&self, method: &Method, uri: &Uri) {
        self.with(|d| *d.hits.entry(format!("{method} {}", uri.path())).or_default() += 1);
    }

    fn router(&self) -> Router {
        Router::new()
            .route("/products", get(list_products).post(create_product))
            .route("/products/{id}", axum::routing::put(update_product).delete(delete_product))
            .route("/subscription-plans", get(list_plans))
            .route("/users", get(list_users))
            .route("/users/{mobile}", get(get_user).delete(delete_user))
            .route("/orders", get(list_orders))
            .layer(axum::middleware::from_fn_with_state(self.clone(), count_request))
            .with_state(self.clone())
    }

    /// Serve on an ephemeral port; returns the base URL.
    pub async fn spawn(&self) -> String {
        let addr = serve(self.router()).await;
        format!("http://{addr}/")
    }
}

async fn count_request(
    State(api): State<FakeApi>,
    request: axum::extract::Request,
    next: axum::middleware::Next,
) -> Response {
    api.record(request.method(), request.uri());
    next.run(request).await
}

async fn list_products(State(api): State<FakeApi>) -> Json<Value> {
    Json(Value::Array(api.with(|d| d.products.clone())))
}

async fn create_product(State(api): State<FakeApi>, Json(mut body): Json<Value>) -> Json<Value> {
    let id = api.with(|d| {
        d.next_id += 1;
        let id = format!("new-{}", d.next_id);
        body["product_id"] = json!(id);
        d.products.push(body);
        id
    });
    Json(json!({"product_id": id}))
}

async fn update_product(
    State(api): State<FakeApi>,
    Path(id): Path<String>,
    Json(mut body): Json<Value>,
) -> Response {
    api.with(|d| {
        let Some(slot) = d.products.iter_mut().find(|p| p["product_id"] == id) else {
            return (StatusCode::NOT_FOUND, Json(json!({"detail": "Product not found"}))).into_response();
        };
        body["product_id"] = json!(id);
        *slot = body;
        Json(json!({"ok": true})).into_response()
    })
}

async fn delete_product(State(api): State<FakeApi>, Path(id): Path<String>) -> StatusCode {
    api.with(|d| {
        let before = d.products.len();
        d.products.retain(|p| p["product_id"] != id);
        if d.products.len() < before { StatusCode::NO_CONTENT } else { StatusCode::NOT_FOUND }
    })
}

async fn list_plans(State(api): State<FakeApi>) -> Json<Value> {
    Json(Value::Array(api.with(|d| d.plans.clone())))
}

async fn list_users(State(api): State<FakeApi>) -> Json<Value> {
    Json(Value::Array(api.with(|d| d.users.clone())))
}

async fn get_user(State(api): State<FakeApi>, Path(mobile): Path<String>) -> Response {
    api.with(|d| match d.users.iter().find(|u| u["mobile"] == mobile) {
        Some(user) => Json(user.clone()).into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({"detail": "User not found"}))).into_response(),
    })
}

async fn delete_user(State(api): State<FakeApi>, Path(mobile): Path<String>) -> Response {
    api.with(|d| {
        let before = d.users.len();
        d.users.retain(|u| u["mobile"] != mobile);
        if d.users.len() < before {
            StatusCode::NO_CONTENT.into_response()
        } else {
            (StatusCode::NOT_FOUND, Json(json!({"detail": "User not found"}))).into_response()
        }
    })
}

async fn list_orders(State(api): State<FakeApi>) -> Json<Value> {
    Json(Value::Array(api.with(|d| d.orders.clone())))
}

async fn serve(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve");
    });
    addr
}

/// The admin panel running against a [`FakeApi`].
pub struct TestApp {
    pub api: FakeApi,
    pub base_url: String,
    pub client: reqwest::Client,
}

impl TestApp {
    /// Start a fake API and the admin panel in front of it.
    pub async fn start(api: FakeApi) -> Self {
        let api_url = api.spawn().await;
        let config = AdminConfig {
            host: "127.0.0.1".parse().expect("ip"),
            port: 0,
            base_url: "http://127.0.0.1".to_string(),
            api: ApiConfig {
                base_url: url::Url::parse(&api_url).expect("api url"),
                timeout: Duration::from_secs(5),
                default_user_id: OWNER.to_string(),
            },
            auth: AuthMode::Static {
                username: ADMIN_USERNAME.to_string(),
                password: SecretString::from(ADMIN_PASSWORD),
            },
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 1.0,
        };
        let state = AppState::new(config).expect("app state");
        let addr = serve(true_harvest_admin::app(state)).await;

        let client = reqwest::Client::builder()
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .expect("client");

        Self {
            api,
            base_url: format!("http://{addr}"),
            client,
        }
    }

    /// Start and log in.
    pub async fn logged_in(api: FakeApi) -> Self {
        let app = Self::start(api).await;
        let response = app
            .post_form("/auth/login", &[("username", ADMIN_USERNAME), ("password", ADMIN_PASSWORD)])
            .await;
        assert!(response.status().is_redirection(), "login should redirect");
        assert_eq!(location(&response), "/dashboard");
        app
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client.get(self.url(path)).send().await.expect("GET")
    }

    pub async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .form(form)
            .send()
            .await
            .expect("POST")
    }

    /// GET and return the body, asserting a 200.
    pub async fn page(&self, path: &str) -> String {
        let response = self.get(path).await;
        assert_eq!(response.status(), 200, "GET {path}");
        response.text().await.expect("body")
    }
}

/// `Location` header of a redirect, or an empty string.
pub fn location(response: &reqwest::Response) -> String {
    response
        .headers()
        .get(reqwest::header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}
