//! PostgreSQL-backed `EventRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{EventRepository, EventRepositoryError};
use crate::domain::{Event, EventId};

use super::diesel_error_mapping::{map_basic_diesel_error, map_pool_error};
use super::models::EventRow;
use super::pool::DbPool;
use super::schema::events;

/// Diesel implementation of event lookup.
#[derive(Clone)]
pub struct DieselEventRepository {
    pool: DbPool,
}

impl DieselEventRepository {
    /// Create a repository backed by `pool`.
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_event(row: EventRow) -> Result<Event, EventRepositoryError> {
    let id = EventId::new(row.id)
        .map_err(|err| EventRepositoryError::query(format!("invalid event id in database: {err}")))?;
    let mut event = Event::new(id, row.name, row.location);
    event.description = row.description;
    event.start_time = row.start_time;
    event.end_time = row.end_time;
    event.capacity = row.capacity.and_then(|capacity| u32::try_from(capacity).ok());
    event.attendees = u32::try_from(row.attendees).unwrap_or(0);
    Ok(event)
}

#[async_trait]
impl EventRepository for DieselEventRepository {
    async fn find_by_id(&self, id: &EventId) -> Result<Option<Event>, EventRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, EventRepositoryError::connection))?;

        let row: Option<EventRow> = events::table
            .filter(events::id.eq(id.as_ref()))
            .select(EventRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| {
                map_basic_diesel_error(&err, EventRepositoryError::query, EventRepositoryError::connection)
            })?;

        row.map(row_to_event).transpose()
    }
}
