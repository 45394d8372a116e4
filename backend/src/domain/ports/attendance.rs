//! Driving ports for the attendance proof lifecycle.
//!
//! Inbound adapters call these to issue codes, redeem them, and list proofs
//! without knowing which storage or minting adapters back the service.

use async_trait::async_trait;

use crate::domain::{Error, EventId, Proof, UserAddress};

use super::QrImage;

/// A freshly generated code together with its rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedCode {
    /// Event the code admits to.
    pub event_id: EventId,
    /// Display name of the event.
    pub event_name: String,
    /// Wire form of the code.
    pub code_string: String,
    /// QR rendering of `code_string`.
    pub image: QrImage,
    /// Issue time in Unix seconds.
    pub issued_at: i64,
    /// Last second at which the code is still accepted.
    pub expires_at: i64,
}

/// A request to redeem a code for a proof.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProofClaim {
    /// Submitted code string.
    pub code: String,
    /// Wallet to credit.
    pub user_address: UserAddress,
    /// Event the client believes the code belongs to.
    ///
    /// The proof always records the event embedded in the code; a mismatch
    /// is logged.
    pub event_id: EventId,
}

/// Result of a successful claim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimReceipt {
    /// The stored proof.
    pub proof: Proof,
    /// Token id reported by the minting gateway.
    pub token_id: Option<u64>,
    /// Whether the proof carries a placeholder reference.
    pub placeholder: bool,
}

/// Issues attendance codes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AttendanceCodeIssuer: Send + Sync {
    /// Generate a code for an existing event.
    ///
    /// Fails with a not-found error when the event is unknown.
    async fn issue(&self, event_id: &EventId) -> Result<IssuedCode, Error>;
}

/// Redeems codes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProofClaimCommand: Send + Sync {
    /// Verify the code, mint, and record a proof.
    async fn claim(&self, claim: ProofClaim) -> Result<ClaimReceipt, Error>;
}

/// Reads proofs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProofQuery: Send + Sync {
    /// Proofs credited to a wallet, oldest first.
    async fn list_for_user(&self, user_address: &UserAddress) -> Result<Vec<Proof>, Error>;
}
