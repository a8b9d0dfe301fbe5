//! Wall-clock abstraction.
//!
//! Scheduling works on local, timezone-naive time. Everything that needs
//! "now" takes a [`Clock`] so it can be driven to arbitrary instants in
//! tests.

use crate::schedule::Weekday;
use chrono::{Datelike, NaiveDateTime, NaiveTime};
use std::sync::Mutex;

/// Source of the current local date and time.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// The machine's local clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }
}

/// A clock that can be set by hand.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<NaiveDateTime>,
}

impl ManualClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Move the clock to `now`.
    pub fn set(&self, now: NaiveDateTime) {
        match self.now.lock() {
            Ok(mut guard) => *guard = now,
            Err(poisoned) => *poisoned.into_inner() = now,
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> NaiveDateTime {
        match self.now.lock() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}

/// Split a local timestamp into the scheduling weekday and time of day.
pub fn weekday_and_time(at: NaiveDateTime) -> (Weekday, NaiveTime) {
    (Weekday::from(at.weekday()), at.time())
}
