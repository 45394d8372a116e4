//! Port for the external event store.

use async_trait::async_trait;

use crate::domain::{Event, EventId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by event store adapters.
    pub enum EventRepositoryError {
        /// The backing store could not be reached.
        Connection { message: String } => "event repository connection failed: {message}",
        /// A query failed during execution.
        Query { message: String } => "event repository query failed: {message}",
    }
}

/// Read access to events.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Look up an event by id.
    async fn find_by_id(&self, id: &EventId) -> Result<Option<Event>, EventRepositoryError>;
}
