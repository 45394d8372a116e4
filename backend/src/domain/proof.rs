//! Proof-of-attendance records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::attendance_code::ContentHash;
use super::event::EventId;

/// Longest wallet address accepted at the boundary.
pub const USER_ADDRESS_MAX: usize = 128;

/// Validation errors for [`UserAddress`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserAddressValidationError {
    /// The address was empty.
    #[error("user address must not be empty")]
    Empty,
    /// The address contained whitespace.
    #[error("user address must not contain whitespace")]
    Whitespace,
    /// The address exceeded [`USER_ADDRESS_MAX`].
    #[error("user address must be at most {max} characters")]
    TooLong {
        /// Maximum permitted length.
        max: usize,
    },
}

/// Wallet address a proof is credited to.
///
/// Addresses are stored verbatim; lookups are case sensitive.
///
/// # Examples
/// ```
/// use culture_proof::domain::UserAddress;
///
/// assert!(UserAddress::new("0xABC").is_ok());
/// assert!(UserAddress::new("0x ABC").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
#[schema(value_type = String, example = "0xABC")]
pub struct UserAddress(String);

impl UserAddress {
    /// Validate and construct an address.
    pub fn new(value: impl Into<String>) -> Result<Self, UserAddressValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(UserAddressValidationError::Empty);
        }
        if value.chars().any(char::is_whitespace) {
            return Err(UserAddressValidationError::Whitespace);
        }
        if value.chars().count() > USER_ADDRESS_MAX {
            return Err(UserAddressValidationError::TooLong {
                max: USER_ADDRESS_MAX,
            });
        }
        Ok(Self(value))
    }
}

impl AsRef<str> for UserAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for UserAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for UserAddress {
    type Error = UserAddressValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserAddress> for String {
    fn from(value: UserAddress) -> Self {
        value.0
    }
}

/// Reference to the minting transaction backing a proof.
///
/// Either a transaction hash returned by the minting gateway or a locally
/// generated placeholder of the same shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = String, example = "0x4f3c2a9e0b1d4c7e8f6a5b3c2d1e0f9a")]
pub struct ExternalReference(String);

impl ExternalReference {
    /// Wrap a reference returned by the minting gateway.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// `0x` followed by 32 random lowercase hex characters.
    #[must_use]
    pub fn placeholder() -> Self {
        Self(format!("0x{}", Uuid::new_v4().simple()))
    }
}

impl AsRef<str> for ExternalReference {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Persisted proof that a user attended an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Proof {
    /// Hash of the code that was redeemed. At most one proof per hash.
    pub content_hash: ContentHash,
    /// Wallet credited with the proof.
    pub user_address: UserAddress,
    /// Event embedded in the redeemed code.
    pub event_id: EventId,
    /// When the proof was stored.
    pub recorded_at: DateTime<Utc>,
    /// Minting transaction or placeholder.
    pub external_reference: ExternalReference,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", UserAddressValidationError::Empty)]
    #[case("0x A", UserAddressValidationError::Whitespace)]
    #[case("0x\tA", UserAddressValidationError::Whitespace)]
    fn rejects_bad_addresses(#[case] raw: &str, #[case] expected: UserAddressValidationError) {
        assert_eq!(UserAddress::new(raw), Err(expected));
    }

    #[test]
    fn rejects_overlong_addresses() {
        let raw = "a".repeat(USER_ADDRESS_MAX + 1);
        assert_eq!(
            UserAddress::new(raw),
            Err(UserAddressValidationError::TooLong {
                max: USER_ADDRESS_MAX
            })
        );
    }

    #[test]
    fn placeholder_has_transaction_shape() {
        let reference = ExternalReference::placeholder();
        let raw = reference.as_ref();
        assert_eq!(raw.len(), 34);
        assert!(raw.starts_with("0x"));
        assert!(raw.chars().skip(2).all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn placeholders_are_unique() {
        assert_ne!(ExternalReference::placeholder(), ExternalReference::placeholder());
    }
}
