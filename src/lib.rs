//! Dutyboard: live headcounts for a support team's duty schedule.
//!
//! Each employee has a weekly schedule of duty windows (phones, tier 1,
//! tier 2, lunch). The crate keeps that roster cached from a REST API and
//! answers "who is doing what right now".
//!
//! # Architecture
//!
//! - **Store**: [`ScheduleStore`] loads the roster, applies edits through
//!   [`Persistence`] and publishes immutable roster snapshots
//! - **Resolver**: [`schedule::resolve`] picks one duty per employee per
//!   instant, by fixed precedence
//! - **Renderer**: [`schedule::render_week`] lays windows out as
//!   day-fraction blocks
//! - **Counter**: [`LiveCounter`] samples headcounts on a timer and on
//!   every roster change
//! - **Editor**: [`ScheduleEditor`] turns a filled-in form into a day record

pub mod clock;
pub mod config;
pub mod counter;
pub mod editor;
pub mod error;
pub mod schedule;
pub mod store;


pub use clock::{Clock, ManualClock, SystemClock};
pub use config::DashboardConfig;
pub use counter::{CountSnapshot, DutyCount, LiveCounter, LiveCounterHandle};
pub use editor::{FieldKey, ScheduleEditor};
pub use error::{DashboardError, Result};
pub use schedule::{DaySchedule, DutyKind, Employee, EmployeeId, Roster, WeeklySchedule, Weekday};
pub use store::{HttpPersistence, Persistence, ScheduleStore};
