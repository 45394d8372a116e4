//! Ledger entries for consumed codes.

use chrono::{DateTime, Utc};

use super::attendance_code::ContentHash;
use super::event::EventId;

/// Marks one code as consumed. Immutable once written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageRecord {
    /// Ledger key.
    pub content_hash: ContentHash,
    /// Event embedded in the consumed code.
    pub event_id: EventId,
    /// When verification accepted the code.
    pub verified_at: DateTime<Utc>,
}

/// Outcome of an atomic insert-if-absent on the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerInsert {
    /// The record was stored; the caller consumed the code.
    Inserted,
    /// A record with the same hash already existed and was left untouched.
    AlreadyPresent,
}
