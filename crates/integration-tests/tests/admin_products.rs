//! Product editor flows against the fake API.

#![allow(clippy::unwrap_used)]

use true_harvest_integration_tests::{FakeApi, TestApp};

fn seeded() -> FakeApi {
    let api = FakeApi::default();
    api.add_product("p1", "Buffalo Milk", "Milk Products", 60);
    api.add_product("p2", "Tomatoes", "Vegetables", 40);
    api
}

const NEW_PRODUCT: &[(&str, &str)] = &[
    ("name", "Paneer"),
    ("tag", "Milk Products"),
    ("description", "Soft paneer"),
    ("feature", "Made today"),
    ("qty", "200"),
    ("unit", "g"),
    ("price", "90"),
    ("is_active", "on"),
];

#[tokio::test]
async fn test_grid_lists_products() {
    let app = TestApp::logged_in(seeded()).await;

    let body = app.page("/products").await;
    assert!(body.contains("Buffalo Milk"));
    assert!(body.contains("Tomatoes"));
}

#[tokio::test]
async fn test_category_filter_narrows_grid() {
    let app = TestApp::logged_in(seeded()).await;

    let body = app.page("/products?category=Vegetables").await;
    assert!(body.contains("Tomatoes"));
    assert!(!body.contains("Buffalo Milk"));
}

#[tokio::test]
async fn test_create_writes_once_and_reloads_once() {
    let app = TestApp::logged_in(seeded()).await;
    app.api.reset_hits();

    let response = app.post_form("/products", NEW_PRODUCT).await;
    assert_eq!(response.status(), 200);
    let body = response.text().await.unwrap();

    assert_eq!(app.api.hits("POST", "/products"), 1);
    assert_eq!(app.api.hits("GET", "/products"), 1);
    assert!(body.contains("Product Added"));
    assert!(body.contains("Paneer"));
    assert!(app.api.product_names().contains(&"Paneer".to_string()));
}

#[tokio::test]
async fn test_update_writes_once_and_reloads_once() {
    let app = TestApp::logged_in(seeded()).await;
    app.api.reset_hits();

    let mut form = NEW_PRODUCT.to_vec();
    form[0] = ("name", "Buffalo Milk Full Cream");
    let response = app.post_form("/products/p1", &form).await;
    let body = response.text().await.unwrap();

    assert_eq!(app.api.hits("PUT", "/products/p1"), 1);
    assert_eq!(app.api.hits("GET", "/products"), 1);
    assert!(body.contains("Product Updated"));
    assert!(app.api.product_names().contains(&"Buffalo Milk Full Cream".to_string()));
}

#[tokio::test]
async fn test_delete_removes_card() {
    let app = TestApp::logged_in(seeded()).await;
    app.api.reset_hits();

    let response = app
        .post_form("/products/p2/delete", &[("name", "Tomatoes")])
        .await;
    let body = response.text().await.unwrap();

    assert_eq!(app.api.hits("DELETE", "/products/p2"), 1);
    assert_eq!(app.api.hits("GET", "/products"), 1);
    assert!(body.contains("Product Deleted"));
    assert!(!body.contains("Tomatoes"));
    assert!(body.contains("Buffalo Milk"));
}

#[tokio::test]
async fn test_delete_of_missing_product_reports_failure() {
    let app = TestApp::logged_in(seeded()).await;

    let body = app
        .post_form("/products/gone/delete", &[("name", "Ghost")])
        .await
        .text()
        .await
        .unwrap();

    assert!(body.contains("Delete Failed"));
    assert_eq!(app.api.product_names().len(), 2);
}

#[tokio::test]
async fn test_blank_name_makes_no_write() {
    let app = TestApp::logged_in(seeded()).await;
    app.api.reset_hits();

    let mut form = NEW_PRODUCT.to_vec();
    form[0] = ("name", "  ");
    let body = app.post_form("/products", &form).await.text().await.unwrap();

    assert_eq!(app.api.writes("/products"), 0);
    assert!(body.contains("Product name is required"));
}

#[tokio::test]
async fn test_blank_name_on_edit_makes_no_write() {
    let app = TestApp::logged_in(seeded()).await;
    app.api.reset_hits();

    let mut form = NEW_PRODUCT.to_vec();
    form[0] = ("name", "");
    let body = app.post_form("/products/p1", &form).await.text().await.unwrap();

    assert_eq!(app.api.hits("PUT", "/products/p1"), 0);
    assert_eq!(app.api.writes("/products"), 0);
    assert!(body.contains("Product name is required"));
    assert!(app.api.product_names().contains(&"Buffalo Milk".to_string()));
}

#[tokio::test]
async fn test_row_intent_only_rerenders_editor() {
    let app = TestApp::logged_in(seeded()).await;
    app.api.reset_hits();

    let mut form = NEW_PRODUCT.to_vec();
    form.push(("intent", "add_variation"));
    let body = app.post_form("/products", &form).await.text().await.unwrap();

    assert_eq!(app.api.writes("/products"), 0);
    assert_eq!(body.matches("name=\"qty\"").count(), 2);
}
