//! In-memory event store with the demo catalogue.

use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};

use crate::domain::ports::{EventRepository, EventRepositoryError};
use crate::domain::{Event, EventId};

/// Event store held in process memory.
#[derive(Debug, Default)]
pub struct InMemoryEventRepository {
    events: RwLock<BTreeMap<EventId, Event>>,
}

impl InMemoryEventRepository {
    /// Create a store holding `events`.
    pub fn with_events(events: impl IntoIterator<Item = Event>) -> Self {
        let events = events.into_iter().map(|event| (event.id.clone(), event)).collect();
        Self {
            events: RwLock::new(events),
        }
    }

    /// Add or replace an event.
    pub fn upsert(&self, event: Event) -> Result<(), EventRepositoryError> {
        let mut events = self
            .events
            .write()
            .map_err(|_| EventRepositoryError::query("in-memory event store lock poisoned"))?;
        events.insert(event.id.clone(), event);
        Ok(())
    }
}

#[async_trait]
impl EventRepository for InMemoryEventRepository {
    async fn find_by_id(&self, id: &EventId) -> Result<Option<Event>, EventRepositoryError> {
        let events = self
            .events
            .read()
            .map_err(|_| EventRepositoryError::query("in-memory event store lock poisoned"))?;
        Ok(events.get(id).cloned())
    }
}

fn at(day: u32, hour: u32) -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(2024, 2, day).and_then(|date| date.and_hms_opt(hour, 0, 0))
}

struct DemoEvent {
    id: &'static str,
    name: &'static str,
    location: &'static str,
    description: &'static str,
    day: u32,
    hours: (u32, u32),
    capacity: u32,
}

const DEMO_EVENTS: [DemoEvent; 4] = [
    DemoEvent {
        id: "1",
        name: "College Tech Fest",
        location: "Main Campus",
        description: "Annual technology festival showcasing student innovations",
        day: 1,
        hours: (9, 18),
        capacity: 500,
    },
    DemoEvent {
        id: "2",
        name: "Morning Fitness Challenge",
        location: "Hostel Ground",
        description: "Daily fitness and wellness challenge",
        day: 1,
        hours: (6, 7),
        capacity: 100,
    },
    DemoEvent {
        id: "3",
        name: "Cultural Dance Night",
        location: "Auditorium",
        description: "Celebration of diverse cultural performances",
        day: 2,
        hours: (19, 22),
        capacity: 300,
    },
    DemoEvent {
        id: "4",
        name: "Music Competition",
        location: "Amphitheater",
        description: "Inter-hostel music competition",
        day: 3,
        hours: (18, 21),
        capacity: 200,
    },
];

/// The four demo events seeded when `seed_demo_events` is on.
#[must_use]
pub fn demo_events() -> Vec<Event> {
    DEMO_EVENTS
        .iter()
        .filter_map(|demo| {
            let id = EventId::new(demo.id).ok()?;
            let mut event = Event::new(id, demo.name, demo.location);
            event.description = Some(demo.description.to_owned());
            event.start_time = at(demo.day, demo.hours.0);
            event.end_time = at(demo.day, demo.hours.1);
            event.capacity = Some(demo.capacity);
            Some(event)
        })
        .collect()
}
