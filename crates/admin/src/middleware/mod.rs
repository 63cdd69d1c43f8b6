//! HTTP middleware stack for admin.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (request span with status and latency)
//! 3. Request ID (`x-request-id`, recorded on the span)
//! 4. Session layer (tower-sessions, in-memory store)
//! 5. Auth extractors on protected handlers

pub mod auth;
pub mod flash;
pub mod request_id;
pub mod session;

pub use auth::{OptionalAdminAuth, RequireAdminAuth, clear_current_admin, set_current_admin};
pub use flash::{push_toast, take_toasts};
pub use request_id::request_id;
pub use session::{SESSION_COOKIE_NAME, create_session_layer};
