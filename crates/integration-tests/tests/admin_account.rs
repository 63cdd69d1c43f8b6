//! Public account deletion page.

#![allow(clippy::unwrap_used)]

use true_harvest_integration_tests::{FakeApi, TestApp};

#[tokio::test]
async fn test_short_number_is_rejected_without_request() {
    let api = FakeApi::default();
    api.add_user("9876543210", "Asha");
    let app = TestApp::start(api).await;

    let body = app
        .post_form("/deactivate-user", &[("mobile", "98765")])
        .await
        .text()
        .await
        .unwrap();

    assert!(body.contains("Enter a 10-digit mobile number"));
    assert_eq!(app.api.writes("/users"), 0);
}

#[tokio::test]
async fn test_confirmed_deletion_removes_user() {
    let api = FakeApi::default();
    api.add_user("9876543210", "Asha");
    let app = TestApp::start(api).await;

    let body = app
        .post_form("/deactivate-user", &[("mobile", "98765 43210")])
        .await
        .text()
        .await
        .unwrap();
    assert_eq!(app.api.writes("/users"), 0);
    assert!(body.contains("9876543210"));

    let body = app
        .post_form(
            "/deactivate-user",
            &[("mobile", "9876543210"), ("confirmed", "yes")],
        )
        .await
        .text()
        .await
        .unwrap();
    assert_eq!(app.api.hits("DELETE", "/users/9876543210"), 1);
    assert!(body.contains("Account Deleted"));
    assert!(body.contains("Successfully deleted account for +91 9876543210"));
}

#[tokio::test]
async fn test_unknown_number_reports_api_detail() {
    let app = TestApp::start(FakeApi::default()).await;

    let body = app
        .post_form(
            "/deactivate-user",
            &[("mobile", "9000000000"), ("confirmed", "yes")],
        )
        .await
        .text()
        .await
        .unwrap();
    assert!(body.contains("Deletion Failed"));
    assert!(body.contains("User not found"));
}

#[tokio::test]
async fn test_privacy_policy_is_public() {
    let app = TestApp::start(FakeApi::default()).await;

    let response = app.get("/privacy-policy").await;
    assert_eq!(response.status(), 200);
}
