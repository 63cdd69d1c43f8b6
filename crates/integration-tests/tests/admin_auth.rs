//! Login, logout and route protection.

#![allow(clippy::unwrap_used)]

use true_harvest_integration_tests::{ADMIN_USERNAME, FakeApi, TestApp, location};

#[tokio::test]
async fn test_protected_page_redirects_to_login() {
    let app = TestApp::start(FakeApi::default()).await;

    let response = app.get("/products").await;
    assert!(response.status().is_redirection());
    assert_eq!(location(&response), "/auth/login");
}

#[tokio::test]
async fn test_api_route_answers_unauthorized() {
    let app = TestApp::start(FakeApi::default()).await;

    let response = app
        .client
        .post(app.url("/api/subscriptions/price"))
        .json(&serde_json::json!({"actual_price": 100, "discounted_price": 80}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn test_wrong_password_stays_on_login() {
    let app = TestApp::start(FakeApi::default()).await;

    let response = app
        .post_form("/auth/login", &[("username", ADMIN_USERNAME), ("password", "nope")])
        .await;
    assert_eq!(response.status(), 200);
    let body = response.text().await.unwrap();
    assert!(body.contains("Invalid Credentials"));

    let response = app.get("/dashboard").await;
    assert_eq!(location(&response), "/auth/login");
}

#[tokio::test]
async fn test_login_then_logout() {
    let app = TestApp::logged_in(FakeApi::default()).await;

    let body = app.page("/dashboard").await;
    assert!(body.contains("Login Successful"));

    let response = app.get("/auth/login").await;
    assert_eq!(location(&response), "/dashboard");

    let response = app.post_form("/auth/logout", &[]).await;
    assert_eq!(location(&response), "/auth/login");

    let response = app.get("/products").await;
    assert_eq!(location(&response), "/auth/login");
}

#[tokio::test]
async fn test_unknown_path_falls_back_to_dashboard() {
    let app = TestApp::start(FakeApi::default()).await;

    let response = app.get("/no-such-page").await;
    assert!(response.status().is_redirection());
    assert_eq!(location(&response), "/dashboard");
}
