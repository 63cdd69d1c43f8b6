//! Customer editor draft.

use serde::Deserialize;
use true_harvest_core::{Email, MobileError, MobileNumber, PersonName, PersonNameError};

use super::FieldErrors;
use crate::gateway::{AddressPayload, UserPayload, UserRecord};
use crate::resources::customers::DEFAULT_CITY;

/// Genders offered by the editor.
pub const GENDERS: [&str; 3] = ["Male", "Female", "Other"];

/// Roles offered by the editor: `(value, label)`.
pub const ROLES: [(&str, &str); 4] = [
    ("REALUSER", "Real User"),
    ("TESTUSER", "Test User"),
    ("EMPLOYEE", "Employee"),
    ("ADMIN", "Admin"),
];

/// Editable customer fields, as posted by the customer form.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CustomerDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub mobile: String,
    #[serde(default = "default_gender")]
    pub gender: String,
    #[serde(default = "default_role")]
    pub role: String,
    #[serde(default = "default_city")]
    pub city: String,
    #[serde(default)]
    pub location: String,
    /// Mobile number the record was loaded under. Updates are addressed by
    /// it, so changing the number still hits the right user.
    #[serde(default)]
    pub original_mobile: String,
}

fn default_gender() -> String {
    "Male".to_string()
}

fn default_role() -> String {
    "REALUSER".to_string()
}

fn default_city() -> String {
    DEFAULT_CITY.to_string()
}

impl Default for CustomerDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            mobile: String::new(),
            gender: default_gender(),
            role: default_role(),
            city: default_city(),
            location: String::new(),
            original_mobile: String::new(),
        }
    }
}

impl CustomerDraft {
    /// Seed from a freshly fetched user; `fallback_mobile` covers records
    /// that come back without one.
    #[must_use]
    pub fn from_record(user: &UserRecord, fallback_mobile: &str) -> Self {
        let address = user.addresses.first().cloned().unwrap_or_default();
        let mobile = if user.mobile.is_empty() {
            fallback_mobile.to_string()
        } else {
            user.mobile.clone()
        };
        let non_blank = |v: &Option<String>| v.clone().filter(|s| !s.trim().is_empty());

        Self {
            name: user.name.clone().unwrap_or_default(),
            email: user.email.clone().unwrap_or_default(),
            original_mobile: mobile.clone(),
            mobile,
            gender: non_blank(&user.gender).unwrap_or_else(default_gender),
            role: non_blank(&user.role).unwrap_or_else(default_role),
            city: non_blank(&address.city).unwrap_or_else(default_city),
            location: address.location.unwrap_or_default(),
        }
    }

    #[must_use]
    pub fn has_gender(&self, gender: &str) -> bool {
        self.gender.eq_ignore_ascii_case(gender)
    }

    #[must_use]
    pub fn has_role(&self, role: &str) -> bool {
        self.role == role
    }

    /// Whether this draft edits an existing user.
    #[must_use]
    pub fn is_edit(&self) -> bool {
        !self.original_mobile.is_empty()
    }

    /// Identifier the update is sent to.
    #[must_use]
    pub fn target(&self) -> &str {
        if self.original_mobile.is_empty() {
            &self.mobile
        } else {
            &self.original_mobile
        }
    }

    #[must_use]
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();

        match PersonName::parse(&self.name) {
            Ok(_) => {}
            Err(PersonNameError::Empty) => errors.insert("name", "Full name is required"),
            Err(PersonNameError::InvalidCharacters) => {
                errors.insert("name", "Please enter a valid full name (letters only)");
            }
        }

        match MobileNumber::parse(&self.mobile) {
            Ok(_) => {}
            Err(MobileError::Empty) => errors.insert("mobile", "Mobile number is required"),
            Err(_) => errors.insert("mobile", "Mobile number must be exactly 10 digits"),
        }

        if self.email.trim().is_empty() {
            errors.insert("email", "Email address is required");
        } else if Email::parse(&self.email).is_err() {
            errors.insert("email", "Please enter a valid email address");
        }

        errors
    }

    /// Build the API body. Blank name/email are sent as `null`.
    #[must_use]
    pub fn to_payload(&self) -> UserPayload {
        let non_empty = |s: &str| (!s.is_empty()).then(|| s.to_string());
        UserPayload {
            role: self.role.clone(),
            name: non_empty(&self.name),
            email: non_empty(&self.email),
            mobile: self.mobile.clone(),
            gender: self.gender.clone(),
            addresses: vec![AddressPayload {
                city: self.city.clone(),
                location: self.location.clone(),
                kind: "home".to_string(),
            }],
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn valid() -> CustomerDraft {
        CustomerDraft {
            name: "Asha Rao".to_string(),
            email: "asha@example.com".to_string(),
            mobile: "9876543210".to_string(),
            ..CustomerDraft::default()
        }
    }

    #[test]
    fn test_valid_draft() {
        assert!(valid().validate().is_empty());
    }

    #[test]
    fn test_required_fields() {
        let errors = CustomerDraft::default().validate();
        assert_eq!(errors.get("name"), "Full name is required");
        assert_eq!(errors.get("mobile"), "Mobile number is required");
        assert_eq!(errors.get("email"), "Email address is required");
    }

    #[test]
    fn test_format_rules() {
        for mobile in ["123456789", "12345678901", "12345abcde"] {
            let draft = CustomerDraft {
                mobile: mobile.to_string(),
                ..valid()
            };
            assert_eq!(
                draft.validate().get("mobile"),
                "Mobile number must be exactly 10 digits",
                "{mobile}"
            );
        }

        let draft = CustomerDraft {
            name: "Asha 2".to_string(),
            email: "a@b".to_string(),
            ..valid()
        };
        let errors = draft.validate();
        assert_eq!(errors.get("name"), "Please enter a valid full name (letters only)");
        assert_eq!(errors.get("email"), "Please enter a valid email address");
    }

    #[test]
    fn test_payload() {
        let draft = CustomerDraft {
            email: String::new(),
            location: "Jubilee Hills".to_string(),
            ..valid()
        };
        let payload = serde_json::to_value(draft.to_payload()).unwrap();
        assert_eq!(
            payload,
            json!({
                "role": "REALUSER",
                "name": "Asha Rao",
                "email": null,
                "mobile": "9876543210",
                "gender": "Male",
                "addresses": [{"city": "Hyderabad", "location": "Jubilee Hills", "type": "home"}]
            })
        );
    }

    #[test]
    fn test_seed_keeps_original_mobile() {
        let user: UserRecord = serde_json::from_value(json!({
            "userid": "u1",
            "name": "Asha",
            "mobile": "9876543210",
            "role": "",
            "addresses": {"city": "Vizag", "location": "Beach Road"}
        }))
        .unwrap();

        let mut draft = CustomerDraft::from_record(&user, "0000000000");
        assert_eq!(draft.role, "REALUSER");
        assert_eq!(draft.city, "Vizag");
        assert!(draft.is_edit());

        draft.mobile = "9999999999".to_string();
        assert_eq!(draft.target(), "9876543210");
    }
}
