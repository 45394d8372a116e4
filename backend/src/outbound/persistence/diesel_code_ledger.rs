//! PostgreSQL-backed `CodeLedger`.
//!
//! The replay decision is a single `INSERT ... ON CONFLICT DO NOTHING`; the
//! affected row count tells the caller whether it won the race.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CodeLedger, CodeLedgerError};
use crate::domain::{ContentHash, EventId, LedgerInsert, UsageRecord};

use super::diesel_error_mapping::{map_basic_diesel_error, map_pool_error};
use super::models::{CodeUsageRow, NewCodeUsageRow};
use super::pool::{DbPool, PoolError};
use super::schema::code_usages;

/// Diesel implementation of the replay ledger.
#[derive(Clone)]
pub struct DieselCodeLedger {
    pool: DbPool,
}

impl DieselCodeLedger {
    /// Create a ledger backed by `pool`.
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> CodeLedgerError {
    map_pool_error(error, CodeLedgerError::connection)
}

fn diesel_error(error: diesel::result::Error) -> CodeLedgerError {
    map_basic_diesel_error(&error, CodeLedgerError::query, CodeLedgerError::connection)
}

fn row_to_record(row: CodeUsageRow) -> Result<UsageRecord, CodeLedgerError> {
    let content_hash = ContentHash::try_from(row.content_hash.as_slice())
        .map_err(|err| CodeLedgerError::query(format!("corrupted content hash in database: {err}")))?;
    let event_id = EventId::new(row.event_id)
        .map_err(|err| CodeLedgerError::query(format!("invalid event id in database: {err}")))?;
    Ok(UsageRecord {
        content_hash,
        event_id,
        verified_at: row.verified_at,
    })
}

#[async_trait]
impl CodeLedger for DieselCodeLedger {
    async fn insert_if_absent(&self, record: &UsageRecord) -> Result<LedgerInsert, CodeLedgerError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row = NewCodeUsageRow {
            content_hash: record.content_hash.as_bytes().as_slice(),
            event_id: record.event_id.as_ref(),
            verified_at: record.verified_at,
        };
        let inserted = diesel::insert_into(code_usages::table)
            .values(&row)
            .on_conflict(code_usages::content_hash)
            .do_nothing()
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;

        Ok(if inserted == 0 {
            LedgerInsert::AlreadyPresent
        } else {
            LedgerInsert::Inserted
        })
    }

    async fn find(&self, content_hash: &ContentHash) -> Result<Option<UsageRecord>, CodeLedgerError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row: Option<CodeUsageRow> = code_usages::table
            .filter(code_usages::content_hash.eq(content_hash.as_bytes().as_slice()))
            .select(CodeUsageRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;

        row.map(row_to_record).transpose()
    }
}
