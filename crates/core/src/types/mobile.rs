//! Indian mobile number type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`MobileNumber`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MobileError {
    /// The input string is empty.
    #[error("mobile number cannot be empty")]
    Empty,
    /// The input contains something other than ASCII digits.
    #[error("mobile number must contain digits only")]
    NonDigit,
    /// The input does not have exactly ten digits.
    #[error("mobile number must be exactly {expected} digits (got {actual})")]
    WrongLength {
        /// Required digit count.
        expected: usize,
        /// Digit count supplied.
        actual: usize,
    },
}

/// A ten-digit mobile number, without country prefix.
///
/// Mobile numbers double as the user identifier on the REST API
/// (`/users/{mobile}`), so the type is used for both form validation and
/// path building.
///
/// ```
/// use true_harvest_core::MobileNumber;
///
/// assert!(MobileNumber::parse("1234567890").is_ok());
/// assert!(MobileNumber::parse("123456789").is_err());
/// assert!(MobileNumber::parse("12345678901").is_err());
/// assert!(MobileNumber::parse("12345abcde").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct MobileNumber(String);

impl MobileNumber {
    /// Number of digits in a mobile number.
    pub const DIGITS: usize = 10;

    /// Parse a `MobileNumber` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, contains a non-digit, or is
    /// not exactly ten digits long.
    pub fn parse(s: &str) -> Result<Self, MobileError> {
        if s.is_empty() {
            return Err(MobileError::Empty);
        }

        if !s.chars().all(|c| c.is_ascii_digit()) {
            return Err(MobileError::NonDigit);
        }

        if s.len() != Self::DIGITS {
            return Err(MobileError::WrongLength {
                expected: Self::DIGITS,
                actual: s.len(),
            });
        }

        Ok(Self(s.to_owned()))
    }

    /// Strip everything but digits and keep at most ten of them.
    ///
    /// Mirrors what the account deletion input does while typing.
    #[must_use]
    pub fn sanitize_input(raw: &str) -> String {
        raw.chars()
            .filter(char::is_ascii_digit)
            .take(Self::DIGITS)
            .collect()
    }

    /// Returns the number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `MobileNumber` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for MobileNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for MobileNumber {
    type Err = MobileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for MobileNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
