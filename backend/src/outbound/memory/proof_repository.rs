//! Mutex-guarded proof store.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::ports::{ProofRepository, ProofRepositoryError};
use crate::domain::{ContentHash, Proof, UserAddress};

#[derive(Debug, Default)]
struct Proofs {
    ordered: Vec<Proof>,
    hashes: HashSet<ContentHash>,
}

/// Proof store held in process memory, kept in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryProofRepository {
    proofs: Mutex<Proofs>,
}

impl InMemoryProofRepository {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Proofs>, ProofRepositoryError> {
        self.proofs
            .lock()
            .map_err(|_| ProofRepositoryError::query("in-memory proof store lock poisoned"))
    }
}

#[async_trait]
impl ProofRepository for InMemoryProofRepository {
    async fn insert(&self, proof: &Proof) -> Result<(), ProofRepositoryError> {
        let mut proofs = self.lock()?;
        if !proofs.hashes.insert(proof.content_hash) {
            return Err(ProofRepositoryError::duplicate_proof(proof.content_hash.to_hex()));
        }
        proofs.ordered.push(proof.clone());
        Ok(())
    }

    async fn list_for_user(&self, user_address: &UserAddress) -> Result<Vec<Proof>, ProofRepositoryError> {
        let proofs = self.lock()?;
        Ok(proofs
            .ordered
            .iter()
            .filter(|proof| &proof.user_address == user_address)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use chrono::Utc;

    use super::*;
    use crate::domain::{EventId, ExternalReference};

    fn proof(code: &str, user: &str, event: &str) -> Proof {
        Proof {
            content_hash: ContentHash::of(code),
            user_address: UserAddress::new(user).expect("address"),
            event_id: EventId::new(event).expect("id"),
            recorded_at: Utc::now(),
            external_reference: ExternalReference::placeholder(),
        }
    }

    #[tokio::test]
    async fn lists_user_proofs_in_insertion_order() {
        let repo = InMemoryProofRepository::new();
        repo.insert(&proof("3:1:a", "0xABC", "3")).await.expect("first");
        repo.insert(&proof("1:1:b", "0xDEF", "1")).await.expect("other user");
        repo.insert(&proof("1:2:c", "0xABC", "1")).await.expect("second");

        let address = UserAddress::new("0xABC").expect("address");
        let events: Vec<String> = repo
            .list_for_user(&address)
            .await
            .expect("list")
            .into_iter()
            .map(|p| p.event_id.to_string())
            .collect();
        assert_eq!(events, ["3", "1"]);
    }

    #[tokio::test]
    async fn rejects_second_proof_for_same_code() {
        let repo = InMemoryProofRepository::new();
        repo.insert(&proof("1:1:a", "0xABC", "1")).await.expect("first");
        let result = repo.insert(&proof("1:1:a", "0xDEF", "1")).await;
        assert!(matches!(result, Err(ProofRepositoryError::DuplicateProof { .. })));
    }

    #[tokio::test]
    async fn unknown_user_has_no_proofs() {
        let repo = InMemoryProofRepository::new();
        let address = UserAddress::new("0x0").expect("address");
        assert_eq!(repo.list_for_user(&address).await, Ok(Vec::new()));
    }
}
