//! Active-duty resolution.
//!
//! Given an employee's weekly schedule, a weekday and a wall-clock instant,
//! decide which duty (if any) the employee is on. Duty kinds are checked
//! in [`DutyKind::PRECEDENCE`] order and the first window strictly
//! containing the instant wins; overlapping later windows are shadowed.

use crate::schedule::model::{DutyKind, WeeklySchedule, Weekday};
use chrono::NaiveTime;

/// Outcome of resolving one schedule at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// A duty window contains the instant.
    Active(DutyKind),
    /// The day exists but no window contains the instant.
    Idle,
    /// The schedule has no record for the weekday.
    MissingDay,
}

impl Resolution {
    /// The active duty, if any.
    pub fn duty(self) -> Option<DutyKind> {
        match self {
            Self::Active(kind) => Some(kind),
            Self::Idle | Self::MissingDay => None,
        }
    }
}

/// Resolve the active duty, keeping the missing-day diagnostic.
pub fn resolve_detailed(
    schedule: &WeeklySchedule,
    weekday: Weekday,
    instant: NaiveTime,
) -> Resolution {
    let Some(day) = schedule.day(weekday) else {
        return Resolution::MissingDay;
    };

    day.windows()
        .find(|(_, window)| window.contains(instant))
        .map_or(Resolution::Idle, |(kind, _)| Resolution::Active(kind))
}

/// Resolve the active duty for `weekday` at `instant`.
pub fn resolve(schedule: &WeeklySchedule, weekday: Weekday, instant: NaiveTime) -> Option<DutyKind> {
    resolve_detailed(schedule, weekday, instant).duty()
}
