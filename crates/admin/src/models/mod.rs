//! Domain models for admin.

pub mod session;
pub mod toast;

pub use session::{CurrentAdmin, keys as session_keys};
pub use toast::{Toast, ToastKind};
