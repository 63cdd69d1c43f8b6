//! True Harvest Core - Shared domain types.
//!
//! This crate provides the types shared by the True Harvest components:
//! - `admin` - The admin dashboard (server-rendered, talks to the REST API)
//! - `cli` - Operator command-line tools
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients. Everything here can be unit tested without a network.
//!
//! # Modules
//!
//! - [`types`] - Validated input newtypes, order/customer statuses, subscription
//!   price derivation, and list pagination

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
