//! Port for persisted proofs.

use async_trait::async_trait;

use crate::domain::{Proof, UserAddress};

use super::define_port_error;

define_port_error! {
    /// Errors raised by proof repository adapters.
    pub enum ProofRepositoryError {
        /// The backing store could not be reached.
        Connection { message: String } => "proof repository connection failed: {message}",
        /// A query or mutation failed during execution.
        Query { message: String } => "proof repository query failed: {message}",
        /// A proof for this code hash already exists.
        DuplicateProof { content_hash: String } => "proof already recorded for code {content_hash}",
    }
}

/// Storage for proofs of attendance.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProofRepository: Send + Sync {
    /// Persist a proof.
    ///
    /// Returns [`ProofRepositoryError::DuplicateProof`] when a proof for the
    /// same code hash is already stored.
    async fn insert(&self, proof: &Proof) -> Result<(), ProofRepositoryError>;

    /// All proofs credited to `user_address`, oldest first.
    async fn list_for_user(&self, user_address: &UserAddress) -> Result<Vec<Proof>, ProofRepositoryError>;
}
