//! Dashboard summary computed from the live collections.

use rust_decimal::Decimal;

use super::customers::Customer;
use super::format::{format_inr, parse_timestamp};
use super::orders::Order;
use true_harvest_core::CustomerStatus;

/// How many orders the recent-orders table shows.
pub const RECENT_ORDERS: usize = 5;

/// The four summary cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardMetrics {
    pub revenue: String,
    pub orders: usize,
    pub products_sold: u64,
    pub active_customers: usize,
}

impl DashboardMetrics {
    #[must_use]
    pub fn compute(orders: &[Order], customers: &[Customer]) -> Self {
        let revenue: Decimal = orders.iter().map(|o| o.total).sum();
        let products_sold = orders
            .iter()
            .flat_map(|o| o.items.iter())
            .map(|i| u64::from(i.quantity))
            .sum();

        Self {
            revenue: format_inr(revenue),
            orders: orders.len(),
            products_sold,
            active_customers: customers
                .iter()
                .filter(|c| c.status == CustomerStatus::Active)
                .count(),
        }
    }
}

/// The most recent orders, newest first.
#[must_use]
pub fn recent_orders(orders: &[Order], limit: usize) -> Vec<Order> {
    let mut sorted: Vec<&Order> = orders.iter().collect();
    sorted.sort_by_key(|o| std::cmp::Reverse(o.placed_at.as_deref().and_then(parse_timestamp)));
    sorted.into_iter().take(limit).cloned().collect()
}
