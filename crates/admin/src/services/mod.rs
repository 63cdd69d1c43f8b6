//! Business logic services for admin.
//!
//! # Services
//!
//! - `auth` - Pluggable login policies (static credentials or API login)

pub mod auth;

pub use auth::{ApiLoginPolicy, AuthError, AuthPolicy, StaticCredentialPolicy, policy_from_config};
