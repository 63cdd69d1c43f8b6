//! CSV export of the orders list.

use chrono::NaiveDate;

use super::orders::Order;

/// Header row of the export.
pub const CSV_HEADER: &str = "Order ID,Customer Name,Phone,Items,Total Amount,Payment Method,Payment Status,Order Status,Order Date";

/// Download name for an export taken on `date`.
#[must_use]
pub fn export_filename(date: NaiveDate) -> String {
    format!("orders_export_{}.csv", date.format("%Y-%m-%d"))
}

/// Double-quote a field, doubling embedded quotes.
fn quoted(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Quote a free-text field only when it holds a separator, quote or line break.
fn escaped(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        quoted(value)
    } else {
        value.to_string()
    }
}

/// Render `orders` as CSV, one row per order.
///
/// Returns `None` for an empty list: there is nothing to export.
#[must_use]
pub fn orders_csv(orders: &[Order]) -> Option<String> {
    if orders.is_empty() {
        return None;
    }

    let mut lines = Vec::with_capacity(orders.len() + 1);
    lines.push(CSV_HEADER.to_string());
    for order in orders {
        lines.push(
            [
                escaped(&order.number),
                quoted(&order.customer.name),
                escaped(&order.customer.phone),
                quoted(&order.items_summary()),
                order.total.normalize().to_string(),
                escaped(&order.payment_method),
                order.payment_status.as_str().to_string(),
                order.status.as_str().to_string(),
                quoted(&order.order_date()),
            ]
            .join(","),
        );
    }
    Some(lines.join("\n"))
}
