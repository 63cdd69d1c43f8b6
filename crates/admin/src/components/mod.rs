//! Reusable view components.

pub mod data_table;

pub use data_table::{
    DataTableConfig, FilterOption, TableColumn, TableFilter, customers_table_config,
    orders_table_config, plans_table_config, products_table_config,
};
