//! Events that attendance codes are issued for.
//!
//! Events are owned by an external store; the core only reads them to resolve
//! a display name when generating a code.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Validation errors returned by [`EventId::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EventIdValidationError {
    /// The identifier was empty.
    #[error("event id must not be empty")]
    Empty,
    /// The identifier contained the code field delimiter.
    #[error("event id must not contain ':'")]
    ContainsDelimiter,
}

/// Opaque event identifier.
///
/// ## Invariants
/// - Non-empty. Length is not capped.
/// - Never contains `:`, which delimits attendance code fields.
///
/// # Examples
/// ```
/// use culture_proof::domain::EventId;
///
/// let id = EventId::new("1").expect("valid id");
/// assert_eq!(id.as_ref(), "1");
/// assert!(EventId::new("a:b").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
#[schema(value_type = String, example = "1")]
pub struct EventId(String);

impl EventId {
    /// Validate and construct an event identifier.
    pub fn new(value: impl Into<String>) -> Result<Self, EventIdValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(EventIdValidationError::Empty);
        }
        if value.contains(':') {
            return Err(EventIdValidationError::ContainsDelimiter);
        }
        Ok(Self(value))
    }
}

impl AsRef<str> for EventId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for EventId {
    type Error = EventIdValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EventId> for String {
    fn from(value: EventId) -> Self {
        value.0
    }
}

/// An event attendees can prove they visited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Event {
    /// Stable identifier.
    pub id: EventId,
    /// Display name shown alongside generated codes.
    pub name: String,
    /// Venue.
    pub location: String,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Local start time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, example = "2024-02-01T09:00:00")]
    pub start_time: Option<NaiveDateTime>,
    /// Local end time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, example = "2024-02-01T18:00:00")]
    pub end_time: Option<NaiveDateTime>,
    /// Advertised capacity. Informational only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    /// Attendee counter maintained by the event store.
    #[serde(default)]
    pub attendees: u32,
}

impl Event {
    /// Build an event with only the required fields set.
    pub fn new(id: EventId, name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            location: location.into(),
            description: None,
            start_time: None,
            end_time: None,
            capacity: None,
            attendees: 0,
        }
    }
}
