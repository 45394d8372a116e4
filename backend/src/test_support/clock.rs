//! Controllable clocks for unit tests.

use std::sync::Mutex;

use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;

/// Clock whose reading can be moved between calls.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    /// Start at `seconds` past the Unix epoch.
    pub fn at_unix(seconds: i64) -> Self {
        Self(Mutex::new(unix(seconds)))
    }

    /// Jump to `seconds` past the Unix epoch.
    pub fn set_unix(&self, seconds: i64) {
        *self.lock_clock() = unix(seconds);
    }

    /// Move forward by `seconds`.
    pub fn advance_seconds(&self, seconds: i64) {
        *self.lock_clock() += TimeDelta::seconds(seconds);
    }

    fn lock_clock(&self) -> std::sync::MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex"),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

fn unix(seconds: i64) -> DateTime<Utc> {
    match Utc.timestamp_opt(seconds, 0).single() {
        Some(instant) => instant,
        None => panic!("timestamp {seconds} out of range"),
    }
}
