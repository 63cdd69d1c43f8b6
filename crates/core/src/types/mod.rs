//! Core types for True Harvest.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod mobile;
pub mod name;
pub mod page;
pub mod price;
pub mod status;

pub use email::{Email, EmailError};
pub use id::*;
pub use mobile::{MobileError, MobileNumber};
pub use name::{PersonName, PersonNameError};
pub use page::{DEFAULT_PAGE_SIZE, Page};
pub use price::{
    MAX_PRICE, PriceDerivation, PriceError, PriceField, PriceVariation, discount_percent,
    discounted_price,
};
pub use status::*;
