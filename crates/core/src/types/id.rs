//! Newtype IDs for type-safe entity references.
//!
//! The True Harvest API hands out opaque identifiers. Most arrive as JSON
//! strings, but order ids have been observed as bare numbers, so every id
//! accepts either on the way in and always serializes as a string.

/// Macro to define a type-safe, string-backed ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize` as a plain string
/// - `Deserialize` from either a JSON string or a JSON number
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `Default`
/// - `new()`, `as_str()`, `Display`, `From<String>`, `From<&str>`
///
/// # Example
///
/// ```rust
/// # use true_harvest_core::define_id;
/// define_id!(PlanId);
/// define_id!(OrderId);
///
/// let plan_id = PlanId::new("p-1");
/// let order_id = OrderId::new("p-1");
///
/// // These are different types, so this won't compile:
/// // let _: PlanId = order_id;
/// assert_eq!(plan_id.as_str(), order_id.as_str());
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Default, ::serde::Serialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from anything string-like.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Whether the id is blank.
            #[must_use]
            pub fn is_empty(&self) -> bool {
                self.0.trim().is_empty()
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::core::result::Result<Self, D::Error>
            where
                D: ::serde::Deserializer<'de>,
            {
                match ::serde_json::Value::deserialize(deserializer)? {
                    ::serde_json::Value::String(s) => Ok(Self(s)),
                    ::serde_json::Value::Number(n) => Ok(Self(n.to_string())),
                    ::serde_json::Value::Null => Ok(Self::default()),
                    other => Err(<D::Error as ::serde::de::Error>::custom(format!(
                        "expected string or number id, got {other}"
                    ))),
                }
            }
        }
    };
}

define_id!(ProductId);
define_id!(PlanId);
define_id!(OrderId);
define_id!(UserId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_string_and_number() {
        let from_string: OrderId = serde_json::from_str("\"ord-9\"").unwrap();
        assert_eq!(from_string.as_str(), "ord-9");

        let from_number: OrderId = serde_json::from_str("42").unwrap();
        assert_eq!(from_number.as_str(), "42");

        let from_null: UserId = serde_json::from_str("null").unwrap();
        assert!(from_null.is_empty());
    }

    #[test]
    fn test_rejects_structured_values() {
        assert!(serde_json::from_str::<ProductId>("{\"id\":1}").is_err());
    }

    #[test]
    fn test_serializes_as_string() {
        let id = PlanId::new("plan-7");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"plan-7\"");
        assert_eq!(id.to_string(), "plan-7");
    }
}
