//! Account deletion form.

use serde::Deserialize;
use true_harvest_core::MobileNumber;

use super::FieldErrors;

/// Posted by the account deletion page.
///
/// The first post (without `confirmed`) only asks for confirmation; the
/// second one deletes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccountDeletion {
    #[serde(default)]
    pub mobile: String,
    #[serde(default)]
    pub confirmed: Option<String>,
}

impl AccountDeletion {
    /// The input as the page keeps it: digits only, at most ten.
    #[must_use]
    pub fn sanitized(&self) -> String {
        MobileNumber::sanitize_input(&self.mobile)
    }

    #[must_use]
    pub fn is_confirmed(&self) -> bool {
        self.confirmed.as_deref().is_some_and(|c| !c.is_empty())
    }

    /// A parsed mobile number, or the field error to show.
    ///
    /// # Errors
    ///
    /// Returns the field errors when the sanitized input is not ten digits.
    pub fn validate(&self) -> Result<MobileNumber, FieldErrors> {
        MobileNumber::parse(&self.sanitized()).map_err(|_| {
            let mut errors = FieldErrors::new();
            errors.insert("mobile", "Enter a 10-digit mobile number");
            errors
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn form(mobile: &str, confirmed: Option<&str>) -> AccountDeletion {
        AccountDeletion {
            mobile: mobile.to_string(),
            confirmed: confirmed.map(str::to_string),
        }
    }

    #[test]
    fn test_sanitizes_before_validating() {
        let parsed = form("+91 98765-43210", None).validate();
        // "+91" contributes digits too, so the first ten digits are kept
        assert_eq!(parsed.unwrap().as_str(), "9198765432");

        assert_eq!(form("98765 43210", None).validate().unwrap().as_str(), "9876543210");
    }

    #[test]
    fn test_short_number_rejected() {
        let errors = form("12345", None).validate().unwrap_err();
        assert!(errors.has("mobile"));
    }

    #[test]
    fn test_confirmation_flag() {
        assert!(!form("9876543210", None).is_confirmed());
        assert!(!form("9876543210", Some("")).is_confirmed());
        assert!(form("9876543210", Some("yes")).is_confirmed());
    }
}
