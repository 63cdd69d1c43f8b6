//! Customers resource, backed by the users endpoints.
//!
//! Order statistics are aggregated from the live orders collection: an order
//! belongs to a customer when its `userid` equals the customer id or its
//! `mobile` equals the customer phone.

use async_trait::async_trait;
use rust_decimal::{Decimal, RoundingStrategy};
use true_harvest_core::CustomerStatus;

use super::format::{format_date, format_inr, or_fallback, parse_timestamp};
use super::orders::Order;
use crate::collection::{Mutation, ResourceSource, ResourceWriter, Searchable, contains_ci};
use crate::gateway::{ApiClient, GatewayError, UserPayload, UserRecord};
use crate::models::Toast;

pub const DEFAULT_CITY: &str = "Hyderabad";
pub const DEFAULT_STATE: &str = "Telangana";

/// Order totals for one customer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerStats {
    pub total_orders: usize,
    pub total_spent: Decimal,
    /// `total_spent / total_orders`, rounded half-up to whole rupees.
    pub average_order_value: Decimal,
    /// Raw `created_at` of the most recent order.
    pub last_order_at: Option<String>,
}

impl CustomerStats {
    /// Aggregate the orders belonging to `(id, phone)`.
    #[must_use]
    pub fn aggregate(id: &str, phone: &str, orders: &[Order]) -> Self {
        let mine: Vec<&Order> = orders
            .iter()
            .filter(|o| {
                o.userid.as_deref().is_some_and(|u| !id.is_empty() && u == id)
                    || (!phone.is_empty() && o.customer.phone == phone)
            })
            .collect();

        let total_orders = mine.len();
        let total_spent: Decimal = mine.iter().map(|o| o.total).sum();
        let average_order_value = if total_orders == 0 {
            Decimal::ZERO
        } else {
            (total_spent / Decimal::from(total_orders))
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        };
        let last_order_at = mine
            .iter()
            .filter_map(|o| o.placed_at.as_deref())
            .max_by_key(|raw| parse_timestamp(raw))
            .map(str::to_string);

        Self {
            total_orders,
            total_spent,
            average_order_value,
            last_order_at,
        }
    }
}

/// A customer mapped from a user record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub status: CustomerStatus,
    /// Raw `created_at`.
    pub joined_at: Option<String>,
    /// Raw `updated_at`.
    pub last_active_at: Option<String>,
    pub stats: CustomerStats,
}

impl Customer {
    /// Map a user record, aggregating its stats over `orders`.
    #[must_use]
    pub fn from_record(record: UserRecord, orders: &[Order]) -> Self {
        let address = record.addresses.first().cloned().unwrap_or_default();
        let city = or_fallback(address.city.as_deref(), DEFAULT_CITY);
        let state = or_fallback(address.state.as_deref(), DEFAULT_STATE);

        let location = address.location.as_deref().map(str::trim).filter(|s| !s.is_empty());
        let raw_city = address.city.as_deref().map(str::trim).filter(|s| !s.is_empty());
        let street = address.street.as_deref().map(str::trim).filter(|s| !s.is_empty());
        let address_line = match (location, raw_city, street) {
            (Some(location), _, _) => location.to_string(),
            (None, Some(city), Some(street)) => format!("{street}, {city}"),
            (None, Some(city), None) => city.to_string(),
            (None, None, _) => "Not provided".to_string(),
        };

        let id = if record.userid.is_empty() {
            record.mobile.clone()
        } else {
            record.userid.to_string()
        };
        let stats = CustomerStats::aggregate(record.userid.as_str(), &record.mobile, orders);

        Self {
            id,
            name: or_fallback(record.name.as_deref(), "Anonymous"),
            email: or_fallback(record.email.as_deref(), "No Email"),
            phone: record.mobile,
            address: address_line,
            city,
            state,
            status: CustomerStatus::from(record.is_active),
            joined_at: record.created_at,
            last_active_at: record.updated_at,
            stats,
        }
    }

    #[must_use]
    pub fn join_date(&self) -> String {
        format_date(self.joined_at.as_deref())
    }

    #[must_use]
    pub fn last_active(&self) -> String {
        format_date(self.last_active_at.as_deref())
    }

    #[must_use]
    pub fn last_order(&self) -> String {
        format_date(self.stats.last_order_at.as_deref())
    }

    #[must_use]
    pub fn total_spent(&self) -> String {
        format_inr(self.stats.total_spent)
    }

    #[must_use]
    pub fn average_order_value(&self) -> String {
        format_inr(self.stats.average_order_value)
    }
}

impl Searchable for Customer {
    fn record_id(&self) -> &str {
        &self.id
    }

    fn matches_search(&self, needle: &str) -> bool {
        contains_ci(&self.name, needle)
            || contains_ci(&self.email, needle)
            || contains_ci(&self.city, needle)
            || self.phone.contains(needle)
    }

    fn matches_selector(&self, selector: &str) -> bool {
        self.status.as_str().eq_ignore_ascii_case(selector)
    }
}

/// Summary cards above the customer table.
#[derive(Debug, Clone, Default)]
pub struct CustomerSummary {
    pub total: usize,
    pub active: usize,
    pub revenue: String,
    pub average_order_value: String,
}

impl CustomerSummary {
    #[must_use]
    pub fn from_customers(customers: &[Customer]) -> Self {
        let revenue: Decimal = customers.iter().map(|c| c.stats.total_spent).sum();
        let average = if customers.is_empty() {
            Decimal::ZERO
        } else {
            let sum: Decimal = customers.iter().map(|c| c.stats.average_order_value).sum();
            (sum / Decimal::from(customers.len()))
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        };

        Self {
            total: customers.len(),
            active: customers
                .iter()
                .filter(|c| c.status == CustomerStatus::Active)
                .count(),
            revenue: format_inr(revenue),
            average_order_value: format_inr(average),
        }
    }
}

/// Users endpoints, joined with orders for statistics.
#[derive(Debug, Clone)]
pub struct CustomersApi {
    client: ApiClient,
}

impl CustomersApi {
    #[must_use]
    pub const fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Fresh copy of one user, by mobile number.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the user does not exist.
    pub async fn details(&self, mobile: &str) -> Result<UserRecord, GatewayError> {
        self.client.get_user(mobile).await
    }
}

#[async_trait]
impl ResourceSource for CustomersApi {
    type Record = Customer;

    async fn fetch_all(&self) -> Result<Vec<Customer>, GatewayError> {
        let (users, orders) = tokio::join!(self.client.list_users(), self.client.list_orders());
        let users = users?;
        let orders: Vec<Order> = match orders {
            Ok(records) => records.into_iter().map(Order::from).collect(),
            Err(e) => {
                tracing::warn!(error = %e, "Orders unavailable, customer stats left at zero");
                Vec::new()
            }
        };

        Ok(users
            .into_iter()
            .map(|u| Customer::from_record(u, &orders))
            .collect())
    }
}

#[async_trait]
impl ResourceWriter for CustomersApi {
    type Payload = UserPayload;

    async fn create(&self, payload: &UserPayload) -> Result<(), GatewayError> {
        self.client.create_user(payload).await.map(drop)
    }

    /// `id` is the mobile number the user was loaded under.
    async fn update(&self, id: &str, payload: &UserPayload) -> Result<(), GatewayError> {
        self.client.update_user(id, payload).await.map(drop)
    }

    fn success_toast(&self, mutation: Mutation, label: &str) -> Toast {
        match mutation {
            Mutation::Update => Toast::success(
                "Customer Updated Successfully",
                format!("{label} has been updated in your customer list."),
            ),
            Mutation::Create | Mutation::Delete => Toast::success(
                "Customer Added Successfully",
                format!("{label} has been added to your customer list."),
            ),
        }
    }

    fn failure_toast(&self, mutation: Mutation, error: &GatewayError) -> Toast {
        let title = match mutation {
            Mutation::Create => "Could not add customer",
            Mutation::Update => "Could not update customer",
            Mutation::Delete => "Could not delete customer",
        };
        Toast::error(title, error.to_string())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::gateway::OrderRecord;

    fn user(value: serde_json::Value) -> UserRecord {
        serde_json::from_value(value).unwrap()
    }

    fn orders() -> Vec<Order> {
        let records: Vec<OrderRecord> = serde_json::from_value(json!([
            {"order_id": 1, "userid": "u1", "total_amount": 300, "created_at": "2026-01-10T10:00:00"},
            {"order_id": 2, "mobile": "9876543210", "total_amount": 151, "created_at": "2026-02-01T10:00:00"},
            {"order_id": 3, "userid": "u2", "mobile": "9000000000", "total_amount": 999}
        ]))
        .unwrap();
        records.into_iter().map(Order::from).collect()
    }

    #[test]
    fn test_mapping_defaults() {
        let c = Customer::from_record(
            user(json!({"userid": "u9", "name": " ", "mobile": "9123456789", "addresses": []})),
            &[],
        );
        assert_eq!(c.name, "Anonymous");
        assert_eq!(c.email, "No Email");
        assert_eq!(c.address, "Not provided");
        assert_eq!(c.city, DEFAULT_CITY);
        assert_eq!(c.state, DEFAULT_STATE);
        assert_eq!(c.status, CustomerStatus::Inactive);
        assert_eq!(c.stats, CustomerStats::default());
    }

    #[test]
    fn test_address_line() {
        let located = Customer::from_record(
            user(json!({"userid": "a", "mobile": "1", "addresses": [{"location": "Road 12", "city": "Pune"}]})),
            &[],
        );
        assert_eq!(located.address, "Road 12");
        assert_eq!(located.city, "Pune");

        let street = Customer::from_record(
            user(json!({"userid": "b", "mobile": "2", "addresses": {"street": "MG Road", "city": "Pune"}})),
            &[],
        );
        assert_eq!(street.address, "MG Road, Pune");
    }

    #[test]
    fn test_stats_match_by_id_or_phone() {
        let stats = CustomerStats::aggregate("u1", "9876543210", &orders());
        assert_eq!(stats.total_orders, 2);
        assert_eq!(stats.total_spent, Decimal::new(451, 0));
        // 225.5 rounds half-up
        assert_eq!(stats.average_order_value, Decimal::new(226, 0));
        assert_eq!(stats.last_order_at.as_deref(), Some("2026-02-01T10:00:00"));
    }

    #[test]
    fn test_stats_empty_id_does_not_match_anonymous_orders() {
        let stats = CustomerStats::aggregate("", "", &orders());
        assert_eq!(stats.total_orders, 0);
        assert_eq!(stats.average_order_value, Decimal::ZERO);
    }

    #[test]
    fn test_search_and_status() {
        let c = Customer::from_record(
            user(json!({
                "userid": "u1", "name": "Ravi Kumar", "email": "ravi@example.com",
                "mobile": "9876543210", "is_active": true,
                "addresses": [{"city": "Warangal"}]
            })),
            &[],
        );
        assert!(c.matches_search("KUMAR"));
        assert!(c.matches_search("example.COM"));
        assert!(c.matches_search("waran"));
        assert!(c.matches_search("543"));
        assert!(c.matches_selector("Active"));
        assert!(!c.matches_selector("Inactive"));
    }

    #[test]
    fn test_summary() {
        let list: Vec<Customer> = ["u1", "u2"]
            .iter()
            .map(|id| {
                Customer::from_record(
                    user(json!({"userid": id, "mobile": "", "is_active": *id == "u1"})),
                    &orders(),
                )
            })
            .collect();
        let summary = CustomerSummary::from_customers(&list);
        assert_eq!(summary.total, 2);
        assert_eq!(summary.active, 1);
        assert_eq!(summary.revenue, "₹1,299");
    }
}
