//! Data table component types.
//!
//! Every list screen shares one toolbar (search box plus a single selector)
//! and one empty state. These types describe that toolbar per screen.

use serde::Serialize;
use true_harvest_core::{CustomerStatus, OrderStatus};

use crate::resources::products::{ALL_CATEGORIES, CATEGORIES};

/// Column definition for a data table.
#[derive(Debug, Clone, Serialize)]
pub struct TableColumn {
    /// Unique key for the column.
    pub key: String,
    /// Display label for the column header.
    pub label: String,
    /// Right-aligned numeric column.
    pub numeric: bool,
}

impl TableColumn {
    #[must_use]
    pub fn new(key: &str, label: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            numeric: false,
        }
    }

    /// Mark the column as numeric.
    #[must_use]
    pub const fn numeric(mut self) -> Self {
        self.numeric = true;
        self
    }
}

/// Option for the selector dropdown.
#[derive(Debug, Clone, Serialize)]
pub struct FilterOption {
    /// Option value. Empty means "no restriction".
    pub value: String,
    /// Display label.
    pub label: String,
}

impl FilterOption {
    /// Create a new filter option.
    #[must_use]
    pub fn new(value: &str, label: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
        }
    }
}

/// The selector dropdown next to the search box.
#[derive(Debug, Clone, Serialize)]
pub struct TableFilter {
    /// Query parameter key (`category`, `status`).
    pub key: String,
    /// Display label.
    pub label: String,
    /// Available options, the "all" option first.
    pub options: Vec<FilterOption>,
}

impl TableFilter {
    /// Create a select filter.
    #[must_use]
    pub fn select(key: &str, label: &str, options: Vec<FilterOption>) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            options,
        }
    }
}

/// Configuration for a list screen.
#[derive(Debug, Clone, Serialize)]
pub struct DataTableConfig {
    /// Unique table identifier.
    pub table_id: String,
    /// Column definitions. Card grids leave this empty.
    pub columns: Vec<TableColumn>,
    /// The single selector filter.
    pub filter: Option<TableFilter>,
    /// Search placeholder text.
    pub search_placeholder: String,
    /// Title for empty state.
    pub empty_title: String,
    /// Description for empty state.
    pub empty_description: Option<String>,
}

impl DataTableConfig {
    /// Create a new data table configuration.
    #[must_use]
    pub fn new(table_id: &str) -> Self {
        Self {
            table_id: table_id.to_string(),
            columns: vec![],
            filter: None,
            search_placeholder: "Search...".to_string(),
            empty_title: "No items found".to_string(),
            empty_description: None,
        }
    }

    /// Add a column.
    #[must_use]
    pub fn column(mut self, column: TableColumn) -> Self {
        self.columns.push(column);
        self
    }

    /// Set the selector filter.
    #[must_use]
    pub fn filter(mut self, filter: TableFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Set search placeholder.
    #[must_use]
    pub fn search_placeholder(mut self, placeholder: &str) -> Self {
        self.search_placeholder = placeholder.to_string();
        self
    }

    /// Set empty state configuration.
    #[must_use]
    pub fn empty_state(mut self, title: &str, description: Option<&str>) -> Self {
        self.empty_title = title.to_string();
        self.empty_description = description.map(ToString::to_string);
        self
    }

    /// Query key of the selector, if the screen has one.
    #[must_use]
    pub fn filter_key(&self) -> &str {
        self.filter.as_ref().map_or("", |f| f.key.as_str())
    }
}

/// Products card grid.
#[must_use]
pub fn products_table_config() -> DataTableConfig {
    let mut options = vec![FilterOption::new("", ALL_CATEGORIES)];
    options.extend(
        CATEGORIES
            .iter()
            .map(|(tag, label)| FilterOption::new(tag, label)),
    );

    DataTableConfig::new("products")
        .filter(TableFilter::select("category", "Category", options))
        .search_placeholder("Search products...")
        .empty_state(
            "No products found",
            Some("Try adjusting your search or add a new product"),
        )
}

/// Orders table.
#[must_use]
pub fn orders_table_config() -> DataTableConfig {
    let mut options = vec![FilterOption::new("", "All")];
    options.extend(
        OrderStatus::ALL
            .iter()
            .map(|s| FilterOption::new(s.as_str(), s.as_str())),
    );

    DataTableConfig::new("orders")
        .column(TableColumn::new("number", "Order ID"))
        .column(TableColumn::new("customer", "Customer"))
        .column(TableColumn::new("items", "Items"))
        .column(TableColumn::new("total", "Total").numeric())
        .column(TableColumn::new("payment", "Payment"))
        .column(TableColumn::new("status", "Status"))
        .column(TableColumn::new("date", "Order Date"))
        .filter(TableFilter::select("status", "Status", options))
        .search_placeholder("Search by order ID, customer name or phone...")
        .empty_state("No orders found", Some("Try adjusting your search or filters"))
}

/// Customers table.
#[must_use]
pub fn customers_table_config() -> DataTableConfig {
    let options = vec![
        FilterOption::new("", "All"),
        FilterOption::new(CustomerStatus::Active.as_str(), CustomerStatus::Active.as_str()),
        FilterOption::new(
            CustomerStatus::Inactive.as_str(),
            CustomerStatus::Inactive.as_str(),
        ),
    ];

    DataTableConfig::new("customers")
        .column(TableColumn::new("name", "Customer"))
        .column(TableColumn::new("contact", "Contact"))
        .column(TableColumn::new("location", "Location"))
        .column(TableColumn::new("orders", "Orders").numeric())
        .column(TableColumn::new("spent", "Total Spent").numeric())
        .column(TableColumn::new("status", "Status"))
        .column(TableColumn::new("joined", "Joined"))
        .filter(TableFilter::select("status", "Status", options))
        .search_placeholder("Search customers by name, email, phone or city...")
        .empty_state("No customers found", Some("Try adjusting your search or filters"))
}

/// Subscription plan grid.
#[must_use]
pub fn plans_table_config() -> DataTableConfig {
    DataTableConfig::new("subscriptions")
        .filter(TableFilter::select(
            "status",
            "Status",
            vec![
                FilterOption::new("", "All"),
                FilterOption::new("Active", "Active"),
                FilterOption::new("Inactive", "Inactive"),
            ],
        ))
        .search_placeholder("Search plans or products...")
        .empty_state(
            "No subscription plans found",
            Some("Create your first plan to get started"),
        )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_lists_all_first() {
        let config = orders_table_config();
        let options = &config.filter.as_ref().unwrap().options;
        assert_eq!(options.len(), OrderStatus::ALL.len() + 1);
        assert!(options[0].value.is_empty());
        assert_eq!(config.filter_key(), "status");
    }

    #[test]
    fn test_products_filter_uses_tags() {
        let config = products_table_config();
        assert_eq!(config.filter_key(), "category");
        let values: Vec<&str> = config
            .filter
            .iter()
            .flat_map(|f| f.options.iter().map(|o| o.value.as_str()))
            .collect();
        assert_eq!(values, vec!["", "Milk Products", "Vegetables", "fruit"]);
        assert!(config.columns.is_empty());
    }

    #[test]
    fn test_customers_columns() {
        let config = customers_table_config();
        assert_eq!(config.columns.len(), 7);
        assert!(config.columns.iter().any(|c| c.key == "spent" && c.numeric));
    }
}
