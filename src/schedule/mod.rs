//! Weekly duty schedules.
//!
//! Pure data and pure functions: the roster model, minute-of-day windows,
//! active-duty resolution and proportional rendering. Nothing in here
//! performs I/O or reads the wall clock.

pub mod model;
pub mod render;
pub mod resolver;
pub mod window;

pub use model::{DaySchedule, DutyKind, Employee, EmployeeId, Roster, WeeklySchedule, Weekday};
pub use render::{DayCell, DutyBlock, percentage, render_day, render_week};
pub use resolver::{Resolution, resolve, resolve_detailed};
pub use window::{MinuteOfDay, ParseTimeError, TimeWindow};
