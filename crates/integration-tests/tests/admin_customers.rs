//! Customer table and editor.

#![allow(clippy::unwrap_used)]

use true_harvest_integration_tests::{FakeApi, TestApp};

fn seeded() -> FakeApi {
    let api = FakeApi::default();
    api.add_user("9876543210", "Asha");
    api.add_user("9123456780", "Ravi");
    api.add_order("o1", "Buffalo Milk", "9876543210", "Delivered", 120);
    api
}

#[tokio::test]
async fn test_search_by_phone() {
    let app = TestApp::logged_in(seeded()).await;

    let body = app.page("/customers?q=91234").await;
    assert!(body.contains("Ravi"));
    assert!(!body.contains("Asha"));
}

#[tokio::test]
async fn test_edit_refetches_user_details() {
    let app = TestApp::logged_in(seeded()).await;
    app.api.reset_hits();

    let body = app.page("/customers/user-9876543210/edit").await;

    assert_eq!(app.api.hits("GET", "/users/9876543210"), 1);
    assert!(body.contains("Edit Customer"));
    assert!(body.contains("asha@example.com"));
}

#[tokio::test]
async fn test_invalid_mobile_blocks_create() {
    let app = TestApp::logged_in(seeded()).await;
    app.api.reset_hits();

    let body = app
        .post_form(
            "/customers",
            &[
                ("name", "Meera"),
                ("mobile", "12345"),
                ("email", "meera@example.com"),
                ("gender", "Female"),
                ("role", "REALUSER"),
            ],
        )
        .await
        .text()
        .await
        .unwrap();

    assert_eq!(app.api.writes("/users"), 0);
    assert!(body.contains("Add New Customer"));
    assert!(body.contains("Mobile number must be exactly 10 digits"));
}
