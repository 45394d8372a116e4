//! Port for the replay ledger.
//!
//! The ledger is the single source of truth for whether a code has been
//! consumed. Its only mutation is [`CodeLedger::insert_if_absent`], which must
//! decide and write in one atomic step: two concurrent callers presenting the
//! same record must observe exactly one [`LedgerInsert::Inserted`].

use async_trait::async_trait;

use crate::domain::{ContentHash, LedgerInsert, UsageRecord};

use super::define_port_error;

define_port_error! {
    /// Errors raised by ledger adapters.
    pub enum CodeLedgerError {
        /// The backing store could not be reached.
        Connection { message: String } => "code ledger connection failed: {message}",
        /// A query or mutation failed during execution.
        Query { message: String } => "code ledger query failed: {message}",
    }
}

/// Storage for consumed codes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CodeLedger: Send + Sync {
    /// Store `record` unless its hash is already present.
    ///
    /// Existing records are never overwritten.
    async fn insert_if_absent(&self, record: &UsageRecord) -> Result<LedgerInsert, CodeLedgerError>;

    /// Fetch the record for a hash, if the code was consumed.
    async fn find(&self, content_hash: &ContentHash) -> Result<Option<UsageRecord>, CodeLedgerError>;
}
