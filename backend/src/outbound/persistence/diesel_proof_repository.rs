//! PostgreSQL-backed `ProofRepository`.
//!
//! The primary key on `content_hash` enforces one proof per code; a unique
//! violation surfaces as [`ProofRepositoryError::DuplicateProof`]. Listing
//! orders by the `seq` identity column to preserve insertion order.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ProofRepository, ProofRepositoryError};
use crate::domain::{ContentHash, EventId, ExternalReference, Proof, UserAddress};

use super::diesel_error_mapping::{DieselFailure, classify, map_pool_error};
use super::models::{NewProofRow, ProofRow};
use super::pool::{DbPool, PoolError};
use super::schema::proofs;

/// Diesel implementation of proof storage.
#[derive(Clone)]
pub struct DieselProofRepository {
    pool: DbPool,
}

impl DieselProofRepository {
    /// Create a repository backed by `pool`.
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> ProofRepositoryError {
    map_pool_error(error, ProofRepositoryError::connection)
}

fn diesel_error(error: &diesel::result::Error, content_hash: &ContentHash) -> ProofRepositoryError {
    match classify(error) {
        DieselFailure::UniqueViolation => ProofRepositoryError::duplicate_proof(content_hash.to_hex()),
        DieselFailure::Connection => ProofRepositoryError::connection("database connection error"),
        DieselFailure::Query => ProofRepositoryError::query("database error"),
    }
}

fn read_error(error: &diesel::result::Error) -> ProofRepositoryError {
    match classify(error) {
        DieselFailure::Connection => ProofRepositoryError::connection("database connection error"),
        DieselFailure::UniqueViolation | DieselFailure::Query => {
            ProofRepositoryError::query("database error")
        }
    }
}

fn row_to_proof(row: ProofRow) -> Result<Proof, ProofRepositoryError> {
    let content_hash = ContentHash::try_from(row.content_hash.as_slice()).map_err(|err| {
        ProofRepositoryError::query(format!("corrupted content hash in database: {err}"))
    })?;
    let user_address = UserAddress::new(row.user_address).map_err(|err| {
        ProofRepositoryError::query(format!("invalid user address in database: {err}"))
    })?;
    let event_id = EventId::new(row.event_id)
        .map_err(|err| ProofRepositoryError::query(format!("invalid event id in database: {err}")))?;
    Ok(Proof {
        content_hash,
        user_address,
        event_id,
        recorded_at: row.recorded_at,
        external_reference: ExternalReference::new(row.external_reference),
    })
}

#[async_trait]
impl ProofRepository for DieselProofRepository {
    async fn insert(&self, proof: &Proof) -> Result<(), ProofRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row = NewProofRow {
            content_hash: proof.content_hash.as_bytes().as_slice(),
            user_address: proof.user_address.as_ref(),
            event_id: proof.event_id.as_ref(),
            recorded_at: proof.recorded_at,
            external_reference: proof.external_reference.as_ref(),
        };
        diesel::insert_into(proofs::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| diesel_error(&err, &proof.content_hash))
    }

    async fn list_for_user(&self, user_address: &UserAddress) -> Result<Vec<Proof>, ProofRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let rows: Vec<ProofRow> = proofs::table
            .filter(proofs::user_address.eq(user_address.as_ref()))
            .order(proofs::seq.asc())
            .select(ProofRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| read_error(&err))?;

        rows.into_iter().map(row_to_proof).collect()
    }
}
