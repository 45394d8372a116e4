//! Persists proofs for verified codes.

use std::sync::Arc;

use mockable::Clock;
use tracing::info;

use super::ports::{ProofRepository, ProofRepositoryError};
use super::{ContentHash, EventId, ExternalReference, Proof, UserAddress};

/// Writes and reads proofs through a [`ProofRepository`].
///
/// Callers must only record codes the verifier accepted.
#[derive(Clone)]
pub struct ProofRecorder {
    repository: Arc<dyn ProofRepository>,
    clock: Arc<dyn Clock>,
}

impl ProofRecorder {
    /// Create a recorder stamping proofs with `clock`.
    pub fn new(repository: Arc<dyn ProofRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// Store a proof for a consumed code.
    pub async fn record(
        &self,
        content_hash: ContentHash,
        user_address: UserAddress,
        event_id: EventId,
        external_reference: ExternalReference,
    ) -> Result<Proof, ProofRepositoryError> {
        let proof = Proof {
            content_hash,
            user_address,
            event_id,
            recorded_at: self.clock.utc(),
            external_reference,
        };
        self.repository.insert(&proof).await?;
        info!(
            content_hash = %proof.content_hash,
            event_id = %proof.event_id,
            user_address = %proof.user_address,
            "proof recorded"
        );
        Ok(proof)
    }

    /// Proofs credited to `user_address`, oldest first.
    pub async fn list_for_user(
        &self,
        user_address: &UserAddress,
    ) -> Result<Vec<Proof>, ProofRepositoryError> {
        self.repository.list_for_user(user_address).await
    }
}
