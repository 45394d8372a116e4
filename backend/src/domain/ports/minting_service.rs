//! Port for the external minting gateway.
//!
//! Minting anchors a proof as an on-chain transaction. The core treats the
//! gateway as a black box that either returns a transaction reference or
//! fails; what happens on failure is decided by [`MintFailurePolicy`].

use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{ExternalReference, UserAddress};

use super::define_port_error;

define_port_error! {
    /// Errors raised by minting adapters.
    pub enum MintingError {
        /// No gateway is configured.
        NotConfigured => "minting gateway is not configured",
        /// The request could not be delivered or timed out.
        Transport { message: String } => "minting gateway transport failed: {message}",
        /// The gateway answered with a non-success status.
        Rejected { status: u16, message: String } => "minting gateway rejected request ({status}): {message}",
        /// The gateway response could not be decoded.
        Decode { message: String } => "minting gateway response invalid: {message}",
    }
}

/// Successful mint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintReceipt {
    /// Transaction hash.
    pub external_reference: ExternalReference,
    /// Token identifier, when the gateway reports one.
    pub token_id: Option<u64>,
}

/// Mints proof tokens for wallet addresses.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MintingService: Send + Sync {
    /// Mint one proof token to `user_address`.
    async fn mint(&self, user_address: &UserAddress) -> Result<MintReceipt, MintingError>;
}

/// Minting service used when no gateway is configured.
///
/// Always fails with [`MintingError::NotConfigured`], which lets the
/// configured [`MintFailurePolicy`] decide the outcome.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledMintingService;

#[async_trait]
impl MintingService for DisabledMintingService {
    async fn mint(&self, _user_address: &UserAddress) -> Result<MintReceipt, MintingError> {
        Err(MintingError::not_configured())
    }
}

/// What to do when minting fails after a code was consumed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MintFailurePolicy {
    /// Record the proof with a locally generated placeholder reference.
    #[default]
    Placeholder,
    /// Fail the request with an external service error.
    Reject,
}

/// Error returned when parsing an unknown [`MintFailurePolicy`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown mint failure policy '{0}', expected 'placeholder' or 'reject'")]
pub struct UnknownMintFailurePolicy(pub String);

impl FromStr for MintFailurePolicy {
    type Err = UnknownMintFailurePolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "placeholder" => Ok(Self::Placeholder),
            "reject" => Ok(Self::Reject),
            other => Err(UnknownMintFailurePolicy(other.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[tokio::test]
    async fn disabled_service_reports_not_configured() {
        let address = UserAddress::new("0xABC").expect("address");
        let result = DisabledMintingService.mint(&address).await;
        assert_eq!(result, Err(MintingError::NotConfigured));
    }

    #[rstest]
    #[case("placeholder", MintFailurePolicy::Placeholder)]
    #[case(" Reject ", MintFailurePolicy::Reject)]
    fn parses_policies(#[case] raw: &str, #[case] expected: MintFailurePolicy) {
        assert_eq!(raw.parse::<MintFailurePolicy>(), Ok(expected));
    }

    #[test]
    fn rejects_unknown_policy() {
        assert!("retry".parse::<MintFailurePolicy>().is_err());
    }
}
