//! Person name type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`PersonName`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PersonNameError {
    /// The input is empty or only whitespace.
    #[error("name cannot be empty")]
    Empty,
    /// The input contains characters other than ASCII letters and whitespace.
    #[error("name may contain letters and spaces only")]
    InvalidCharacters,
}

/// A customer's full name: ASCII letters and whitespace only.
///
/// ```
/// use true_harvest_core::PersonName;
///
/// assert!(PersonName::parse("Asha Rao").is_ok());
/// assert!(PersonName::parse("R2D2").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct PersonName(String);

impl PersonName {
    /// Parse a `PersonName` from a string.
    ///
    /// # Errors
    ///
    /// Returns `Empty` for blank input and `InvalidCharacters` for anything
    /// outside `[a-zA-Z\s]`.
    pub fn parse(s: &str) -> Result<Self, PersonNameError> {
        if s.trim().is_empty() {
            return Err(PersonNameError::Empty);
        }

        if !s
            .chars()
            .all(|c| c.is_ascii_alphabetic() || c.is_whitespace())
        {
            return Err(PersonNameError::InvalidCharacters);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
