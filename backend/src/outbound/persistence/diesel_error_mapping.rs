//! Shared Diesel error mapping.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Coarse classification used by every adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DieselFailure {
    /// The server dropped or refused the connection.
    Connection,
    /// A unique constraint rejected the write.
    UniqueViolation,
    /// Anything else.
    Query,
}

/// Log and classify a Diesel error.
///
/// Database messages are logged at debug and never returned, so constraint
/// names and values stay out of client responses.
pub(crate) fn classify(error: &DieselError) -> DieselFailure {
    match error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
            match kind {
                DatabaseErrorKind::UniqueViolation => DieselFailure::UniqueViolation,
                DatabaseErrorKind::ClosedConnection => DieselFailure::Connection,
                _ => DieselFailure::Query,
            }
        }
        other => {
            debug!(error = %other, "diesel operation failed");
            DieselFailure::Query
        }
    }
}

/// Map pool errors through a repository's connection constructor.
pub(crate) fn map_pool_error<E>(error: PoolError, connection: impl FnOnce(String) -> E) -> E {
    connection(error.into_message())
}

/// Map a Diesel error onto query and connection constructors.
pub(crate) fn map_basic_diesel_error<E>(
    error: &DieselError,
    query: impl FnOnce(&'static str) -> E,
    connection: impl FnOnce(&'static str) -> E,
) -> E {
    match classify(error) {
        DieselFailure::Connection => connection("database connection error"),
        DieselFailure::UniqueViolation | DieselFailure::Query => query("database error"),
    }
}
