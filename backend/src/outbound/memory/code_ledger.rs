//! Mutex-guarded code ledger.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::ports::{CodeLedger, CodeLedgerError};
use crate::domain::{ContentHash, LedgerInsert, UsageRecord};

/// Ledger held in process memory.
#[derive(Debug, Default)]
pub struct InMemoryCodeLedger {
    records: Mutex<HashMap<ContentHash, UsageRecord>>,
}

impl InMemoryCodeLedger {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of consumed codes.
    pub fn len(&self) -> Result<usize, CodeLedgerError> {
        Ok(self.lock()?.len())
    }

    /// Whether no code has been consumed yet.
    pub fn is_empty(&self) -> Result<bool, CodeLedgerError> {
        Ok(self.lock()?.is_empty())
    }

    fn lock(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<ContentHash, UsageRecord>>, CodeLedgerError> {
        self.records
            .lock()
            .map_err(|_| CodeLedgerError::query("in-memory ledger lock poisoned"))
    }
}

#[async_trait]
impl CodeLedger for InMemoryCodeLedger {
    async fn insert_if_absent(&self, record: &UsageRecord) -> Result<LedgerInsert, CodeLedgerError> {
        let mut records = self.lock()?;
        match records.entry(record.content_hash) {
            Entry::Occupied(_) => Ok(LedgerInsert::AlreadyPresent),
            Entry::Vacant(slot) => {
                slot.insert(record.clone());
                Ok(LedgerInsert::Inserted)
            }
        }
    }

    async fn find(&self, content_hash: &ContentHash) -> Result<Option<UsageRecord>, CodeLedgerError> {
        Ok(self.lock()?.get(content_hash).cloned())
    }
}
