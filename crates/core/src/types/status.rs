//! Status enums for orders and customers.
//!
//! Order status carries a transition table. The REST API exposes no endpoint
//! to change an order's status, so the table only drives what the admin UI
//! offers as next steps.

use serde::{Deserialize, Serialize};

/// Error returned when an order status change is not allowed.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("cannot move order from {from} to {to}")]
pub struct StatusTransitionError {
    /// Current status.
    pub from: OrderStatus,
    /// Requested status.
    pub to: OrderStatus,
}

/// Order lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::Processing,
        Self::Shipped,
        Self::Delivered,
        Self::Cancelled,
    ];

    /// Map a raw API status, case-insensitively. Unknown values become
    /// `Pending`.
    #[must_use]
    pub fn normalize(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "PROCESSING" => Self::Processing,
            "SHIPPED" => Self::Shipped,
            "DELIVERED" => Self::Delivered,
            "CANCELLED" => Self::Cancelled,
            _ => Self::Pending,
        }
    }

    /// Display label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Processing => "Processing",
            Self::Shipped => "Shipped",
            Self::Delivered => "Delivered",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Statuses reachable in one step.
    #[must_use]
    pub const fn next_states(&self) -> &'static [Self] {
        match self {
            Self::Pending => &[Self::Processing, Self::Cancelled],
            Self::Processing => &[Self::Shipped, Self::Cancelled],
            Self::Shipped => &[Self::Delivered],
            Self::Delivered | Self::Cancelled => &[],
        }
    }

    /// Whether no further transition is possible.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        self.next_states().is_empty()
    }

    /// Validate a single-step transition.
    ///
    /// # Errors
    ///
    /// Returns `StatusTransitionError` when `to` is not in
    /// [`next_states`](Self::next_states).
    pub fn transition(self, to: Self) -> Result<Self, StatusTransitionError> {
        if self.next_states().contains(&to) {
            Ok(to)
        } else {
            Err(StatusTransitionError { from: self, to })
        }
    }

    /// CSS modifier used by the status badge.
    #[must_use]
    pub const fn badge_class(&self) -> &'static str {
        match self {
            Self::Pending => "badge-orange",
            Self::Processing => "badge-yellow",
            Self::Shipped => "badge-blue",
            Self::Delivered => "badge-green",
            Self::Cancelled => "badge-red",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    /// Strict parse of a display label, used for filter selectors.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("invalid order status: {s}"))
    }
}

/// Payment status shown on orders.
///
/// The API reports no payment state, so mapped orders are always `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PaymentStatus {
    Paid,
    #[default]
    Pending,
    Failed,
}

impl PaymentStatus {
    /// Display label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Paid => "Paid",
            Self::Pending => "Pending",
            Self::Failed => "Failed",
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Customer account status derived from `is_active`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CustomerStatus {
    #[default]
    Active,
    Inactive,
}

impl CustomerStatus {
    /// Display label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
        }
    }
}

impl From<bool> for CustomerStatus {
    fn from(is_active: bool) -> Self {
        if is_active {
            Self::Active
        } else {
            Self::Inactive
        }
    }
}

impl std::fmt::Display for CustomerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CustomerStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            _ => Err(format!("invalid customer status: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_case_insensitive() {
        assert_eq!(OrderStatus::normalize("DELIVERED"), OrderStatus::Delivered);
        assert_eq!(OrderStatus::normalize("shipped"), OrderStatus::Shipped);
        assert_eq!(OrderStatus::normalize("Processing"), OrderStatus::Processing);
        assert_eq!(OrderStatus::normalize("cancelled"), OrderStatus::Cancelled);
    }

    #[test]
    fn test_normalize_unknown_is_pending() {
        assert_eq!(OrderStatus::normalize("on-hold"), OrderStatus::Pending);
        assert_eq!(OrderStatus::normalize(""), OrderStatus::Pending);
    }

    #[test]
    fn test_allowed_transitions() {
        use OrderStatus::*;
        assert_eq!(Pending.transition(Processing), Ok(Processing));
        assert_eq!(Pending.transition(Cancelled), Ok(Cancelled));
        assert_eq!(Processing.transition(Shipped), Ok(Shipped));
        assert_eq!(Processing.transition(Cancelled), Ok(Cancelled));
        assert_eq!(Shipped.transition(Delivered), Ok(Delivered));
    }

    #[test]
    fn test_rejected_transitions() {
        use OrderStatus::*;
        assert!(Pending.transition(Delivered).is_err());
        assert!(Shipped.transition(Cancelled).is_err());
        assert!(Processing.transition(Pending).is_err());
        let err = Delivered.transition(Pending).unwrap_err();
        assert_eq!(err.to_string(), "cannot move order from Delivered to Pending");
    }

    #[test]
    fn test_terminal_states() {
        assert!(OrderStatus::Delivered.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
        assert!(!OrderStatus::Shipped.is_terminal());
    }

    #[test]
    fn test_customer_status() {
        assert_eq!(CustomerStatus::from(false), CustomerStatus::Inactive);
        assert_eq!(
            "inactive".parse::<CustomerStatus>().unwrap(),
            CustomerStatus::Inactive
        );
        assert!("All".parse::<CustomerStatus>().is_err());
    }

    #[test]
    fn test_order_status_from_str() {
        assert_eq!("shipped".parse::<OrderStatus>().unwrap(), OrderStatus::Shipped);
        assert!("All".parse::<OrderStatus>().is_err());
    }
}
