//! The resources behind each list screen.
//!
//! Each submodule maps wire records to display records, says how they are
//! searched and filtered, and binds the gateway calls a
//! [`RemoteCollection`](crate::collection::RemoteCollection) needs.

pub mod customers;
pub mod dashboard;
pub mod export;
pub mod format;
pub mod orders;
pub mod products;
pub mod subscriptions;

pub use customers::{Customer, CustomerStats, CustomerSummary, CustomersApi};
pub use dashboard::{DashboardMetrics, recent_orders};
pub use export::{export_filename, orders_csv};
pub use orders::{Order, OrdersApi};
pub use products::{ProductView, ProductsApi, VariationLabel};
pub use subscriptions::{PlanRow, PlansApi, ProductOption};
