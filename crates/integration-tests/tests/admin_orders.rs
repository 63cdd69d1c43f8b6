//! Order list and CSV export.

#![allow(clippy::unwrap_used)]

use true_harvest_admin::resources::export::CSV_HEADER;
use true_harvest_integration_tests::{FakeApi, TestApp, location};

fn seeded() -> FakeApi {
    let api = FakeApi::default();
    api.add_user("9876543210", "Asha");
    api.add_order("o1", "Buffalo Milk", "9876543210", "Pending", 120);
    api.add_order("o2", "Tomatoes", "9876543210", "Delivered", 80);
    api
}

#[tokio::test]
async fn test_status_filter_narrows_list() {
    let app = TestApp::logged_in(seeded()).await;

    let body = app.page("/orders?status=Delivered").await;
    assert!(body.contains("Tomatoes"));
    assert!(!body.contains("Buffalo Milk"));
}

#[tokio::test]
async fn test_export_downloads_filtered_csv() {
    let app = TestApp::logged_in(seeded()).await;

    let response = app.get("/orders/export.csv?status=Pending").await;
    assert_eq!(response.status(), 200);
    let disposition = response
        .headers()
        .get("content-disposition")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.contains("orders_export_"));

    let csv = response.text().await.unwrap();
    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some(CSV_HEADER));
    assert_eq!(lines.count(), 1);
}

#[tokio::test]
async fn test_empty_export_redirects_back_with_toast() {
    let app = TestApp::logged_in(seeded()).await;

    let response = app.get("/orders/export.csv?status=Cancelled").await;
    assert!(response.status().is_redirection());
    let back = location(&response);
    assert!(back.starts_with("/orders"));

    let body = app.page(&back).await;
    assert!(body.contains("No orders to export"));
}
