//! Orders resource (read-only).

use async_trait::async_trait;
use rust_decimal::Decimal;
use true_harvest_core::{OrderStatus, PaymentStatus};

use super::format::{NOT_AVAILABLE, format_datetime, format_inr, or_fallback};
use crate::collection::{ResourceSource, Searchable, contains_ci};
use crate::gateway::{ApiClient, GatewayError, OrderRecord};

/// Customer name shown when an order carries no user id.
pub const UNKNOWN_CUSTOMER: &str = "Unknown Customer";

/// Customer details captured on an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderCustomer {
    pub name: String,
    pub phone: String,
    pub address: String,
}

/// One ordered line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItem {
    pub name: String,
    pub quantity: u32,
    pub unit_price: Decimal,
}

impl OrderItem {
    /// Unit price as display text.
    #[must_use]
    pub fn unit_price_display(&self) -> String {
        format_inr(self.unit_price)
    }
}

/// An order mapped from its wire record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub id: String,
    /// `#<order_id>`.
    pub number: String,
    /// The user id the order was placed under, if any.
    pub userid: Option<String>,
    pub customer: OrderCustomer,
    pub items: Vec<OrderItem>,
    pub total: Decimal,
    pub payment_method: String,
    pub payment_status: PaymentStatus,
    pub status: OrderStatus,
    /// Raw `created_at`.
    pub placed_at: Option<String>,
    /// Raw `updated_at`, shown as the delivery date.
    pub delivered_at: Option<String>,
}

impl From<OrderRecord> for Order {
    fn from(record: OrderRecord) -> Self {
        let quantity = record.quantities;
        let unit_price = if quantity > 0 {
            record.total_amount / Decimal::from(quantity)
        } else {
            Decimal::ZERO
        };
        let userid = record.userid.filter(|u| !u.trim().is_empty());

        Self {
            id: record.order_id.to_string(),
            number: format!("#{}", record.order_id),
            customer: OrderCustomer {
                name: userid.clone().unwrap_or_else(|| UNKNOWN_CUSTOMER.to_string()),
                phone: record.mobile.unwrap_or_default(),
                address: record.delivery_address.unwrap_or_default(),
            },
            userid,
            items: vec![OrderItem {
                name: record.product_name.unwrap_or_default(),
                quantity,
                unit_price,
            }],
            total: record.total_amount,
            payment_method: or_fallback(record.payment_mode.as_deref(), NOT_AVAILABLE),
            // The API carries no payment status.
            payment_status: PaymentStatus::Pending,
            status: record
                .status
                .as_deref()
                .map(OrderStatus::normalize)
                .unwrap_or_default(),
            placed_at: record.created_at,
            delivered_at: record.updated_at,
        }
    }
}

impl Order {
    /// Items as `"{qty}x {name}"` joined by `; `.
    #[must_use]
    pub fn items_summary(&self) -> String {
        self.items
            .iter()
            .map(|i| format!("{}x {}", i.quantity, i.name))
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Order date as display text.
    #[must_use]
    pub fn order_date(&self) -> String {
        format_datetime(self.placed_at.as_deref())
    }

    /// Delivery date as display text, if the order has been touched since.
    #[must_use]
    pub fn delivery_date(&self) -> Option<String> {
        self.delivered_at
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .map(|d| format_datetime(Some(d)))
    }

    /// Total as display text.
    #[must_use]
    pub fn total_display(&self) -> String {
        format_inr(self.total)
    }

    /// Statuses the order may move to next.
    #[must_use]
    pub fn next_states(&self) -> &'static [OrderStatus] {
        self.status.next_states()
    }
}

impl Searchable for Order {
    fn record_id(&self) -> &str {
        &self.id
    }

    fn matches_search(&self, needle: &str) -> bool {
        contains_ci(&self.number, needle)
            || contains_ci(&self.customer.name, needle)
            || self.customer.phone.contains(needle)
    }

    fn matches_selector(&self, selector: &str) -> bool {
        self.status.as_str().eq_ignore_ascii_case(selector)
    }
}

/// `GET /orders`, mapped.
#[derive(Debug, Clone)]
pub struct OrdersApi {
    client: ApiClient,
}

impl OrdersApi {
    #[must_use]
    pub const fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ResourceSource for OrdersApi {
    type Record = Order;

    async fn fetch_all(&self) -> Result<Vec<Order>, GatewayError> {
        let records = self.client.list_orders().await?;
        Ok(records.into_iter().map(Order::from).collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn order(value: serde_json::Value) -> Order {
        Order::from(serde_json::from_value::<OrderRecord>(value).unwrap())
    }

    #[test]
    fn test_mapping() {
        let o = order(json!({
            "order_id": 42,
            "userid": "u-9",
            "mobile": "9876543210",
            "delivery_address": "Banjara Hills",
            "product_name": "A2 Milk",
            "quantities": 4,
            "total_amount": 200,
            "payment_mode": "UPI",
            "status": "shipped",
            "created_at": "2026-03-01T08:00:00",
            "updated_at": "2026-03-02T09:30:00"
        }));

        assert_eq!(o.number, "#42");
        assert_eq!(o.customer.name, "u-9");
        assert_eq!(o.items[0].unit_price, Decimal::new(50, 0));
        assert_eq!(o.status, OrderStatus::Shipped);
        assert_eq!(o.payment_status, PaymentStatus::Pending);
        assert_eq!(o.items_summary(), "4x A2 Milk");
        assert_eq!(o.delivery_date().as_deref(), Some("02 Mar 2026, 09:30"));
        assert_eq!(o.next_states(), &[OrderStatus::Delivered]);
    }

    #[test]
    fn test_missing_fields() {
        let o = order(json!({"order_id": "x1", "status": "lost", "quantities": 0, "total_amount": 90}));

        assert_eq!(o.customer.name, UNKNOWN_CUSTOMER);
        assert_eq!(o.items[0].unit_price, Decimal::ZERO);
        assert_eq!(o.status, OrderStatus::Pending);
        assert_eq!(o.payment_method, "N/A");
        assert_eq!(o.delivery_date(), None);
    }

    #[test]
    fn test_search_fields() {
        let o = order(json!({"order_id": 1017, "userid": "Lakshmi", "mobile": "9000012345"}));

        assert!(o.matches_search("#101"));
        assert!(o.matches_search("lakSHMI"));
        assert!(o.matches_search("00012"));
        assert!(!o.matches_search("ravi"));
        assert!(o.matches_selector("pending"));
        assert!(!o.matches_selector("Delivered"));
    }
}
