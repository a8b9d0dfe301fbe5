//! Roster data model: employees, their weekly schedules and duty kinds.

use crate::schedule::window::TimeWindow;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Day of the week, ordered Sunday-first as on the wire and in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    /// All seven days, Sunday-first.
    pub const ALL: [Weekday; 7] = [
        Self::Sunday,
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
    ];

    /// The English day name used as the wire key.
    pub fn name(self) -> &'static str {
        match self {
            Self::Sunday => "Sunday",
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
        }
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Sun => Self::Sunday,
            chrono::Weekday::Mon => Self::Monday,
            chrono::Weekday::Tue => Self::Tuesday,
            chrono::Weekday::Wed => Self::Wednesday,
            chrono::Weekday::Thu => Self::Thursday,
            chrono::Weekday::Fri => Self::Friday,
            chrono::Weekday::Sat => Self::Saturday,
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Weekday {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown weekday: {s}"))
    }
}

/// The kinds of duty an employee can be scheduled for.
///
/// Declaration order is the precedence order used to break ties between
/// overlapping windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DutyKind {
    Phones,
    Tier1,
    Tier2,
    Lunch,
}

impl DutyKind {
    /// Precedence order: earlier kinds shadow later ones.
    pub const PRECEDENCE: [DutyKind; 4] = [Self::Phones, Self::Tier1, Self::Tier2, Self::Lunch];

    /// Key prefix used on the wire (`phonesStart`, `tier1End`, ...).
    pub fn wire_prefix(self) -> &'static str {
        match self {
            Self::Phones => "phones",
            Self::Tier1 => "tier1",
            Self::Tier2 => "tier2",
            Self::Lunch => "lunch",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Phones => "Phones",
            Self::Tier1 => "Tier 1",
            Self::Tier2 => "Tier 2",
            Self::Lunch => "Lunch",
        }
    }

    /// Block colour used by the weekly grid.
    pub fn color(self) -> &'static str {
        match self {
            Self::Phones => "#2ecc71",
            Self::Tier1 => "#3498db",
            Self::Tier2 => "#f39c12",
            Self::Lunch => "#e74c3c",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for DutyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_prefix())
    }
}

/// One employee's duty windows for a single weekday.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySchedule {
    windows: [Option<TimeWindow>; 4],
}

impl DaySchedule {
    /// A day with nothing scheduled.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Window for `kind`, or `None` when unset.
    pub fn window(&self, kind: DutyKind) -> Option<TimeWindow> {
        self.windows[kind.index()]
    }

    /// Set or clear the window for `kind`.
    pub fn set_window(&mut self, kind: DutyKind, window: Option<TimeWindow>) {
        self.windows[kind.index()] = window;
    }

    /// Builder-style variant of [`set_window`](Self::set_window).
    pub fn with_window(mut self, kind: DutyKind, window: TimeWindow) -> Self {
        self.set_window(kind, Some(window));
        self
    }

    /// Set windows in precedence order.
    pub fn windows(&self) -> impl Iterator<Item = (DutyKind, TimeWindow)> + '_ {
        DutyKind::PRECEDENCE
            .into_iter()
            .filter_map(|kind| self.window(kind).map(|w| (kind, w)))
    }

    /// Returns `true` if no duty is scheduled.
    pub fn is_empty(&self) -> bool {
        self.windows.iter().all(Option::is_none)
    }
}

/// Weekly schedule keyed by weekday.
///
/// New employees always get all seven days. Records loaded from the server
/// are kept as they arrive, so a day may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklySchedule {
    days: BTreeMap<Weekday, DaySchedule>,
}

impl WeeklySchedule {
    /// Seven empty days.
    pub fn empty_week() -> Self {
        Self {
            days: Weekday::ALL
                .into_iter()
                .map(|d| (d, DaySchedule::empty()))
                .collect(),
        }
    }

    /// Build from explicit day entries; days not listed stay missing.
    pub fn from_days(days: impl IntoIterator<Item = (Weekday, DaySchedule)>) -> Self {
        Self {
            days: days.into_iter().collect(),
        }
    }

    /// Schedule for `day`, or `None` if the record has no entry for it.
    pub fn day(&self, day: Weekday) -> Option<&DaySchedule> {
        self.days.get(&day)
    }

    /// Replace the whole record for `day`.
    pub fn set_day(&mut self, day: Weekday, schedule: DaySchedule) {
        self.days.insert(day, schedule);
    }

    /// Present days, Sunday-first.
    pub fn days(&self) -> impl Iterator<Item = (Weekday, &DaySchedule)> {
        self.days.iter().map(|(d, s)| (*d, s))
    }

    /// Returns `true` when all seven days are present.
    pub fn is_complete(&self) -> bool {
        self.days.len() == Weekday::ALL.len()
    }
}

/// Opaque, server-assigned employee identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(String);

impl EmployeeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An employee and the weekly schedule they own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub schedule: WeeklySchedule,
}

impl Employee {
    /// Display name, falling back to a placeholder for blank names.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            "Unnamed Employee"
        } else {
            &self.name
        }
    }
}

/// The session's set of employees, in server order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    employees: Vec<Employee>,
}

impl Roster {
    pub fn new(employees: Vec<Employee>) -> Self {
        Self { employees }
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn len(&self) -> usize {
        self.employees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    pub fn get(&self, id: &EmployeeId) -> Option<&Employee> {
        self.employees.iter().find(|e| &e.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: &EmployeeId) -> Option<&mut Employee> {
        self.employees.iter_mut().find(|e| &e.id == id)
    }

    pub(crate) fn push(&mut self, employee: Employee) {
        self.employees.push(employee);
    }

    /// Remove an employee together with the schedule it owns.
    pub(crate) fn remove(&mut self, id: &EmployeeId) -> Option<Employee> {
        let pos = self.employees.iter().position(|e| &e.id == id)?;
        Some(self.employees.remove(pos))
    }
}
