//! Edit form for one employee's weekday.
//!
//! A [`ScheduleEditor`] holds the eight time fields of a day as the user
//! typed them. It is always seeded empty, never pre-filled from the stored
//! record. Submitting replaces the whole stored day: a duty left blank in
//! the form is erased on the server even if it was set before.

use crate::config::EditorConfig;
use crate::error::{DashboardError, Result};
use crate::schedule::{DaySchedule, DutyKind, EmployeeId, MinuteOfDay, TimeWindow, Weekday};
use crate::store::{Persistence, ScheduleStore};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{info, warn};

/// Which end of a duty window a field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Bound {
    Start,
    End,
}

/// One of the eight time fields of a day, named like its wire key
/// (`phonesStart`, `tier2End`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FieldKey {
    pub kind: DutyKind,
    pub bound: Bound,
}

impl FieldKey {
    /// Every field in precedence order, start before end.
    pub const ALL: [FieldKey; 8] = [
        Self::start(DutyKind::Phones),
        Self::end(DutyKind::Phones),
        Self::start(DutyKind::Tier1),
        Self::end(DutyKind::Tier1),
        Self::start(DutyKind::Tier2),
        Self::end(DutyKind::Tier2),
        Self::start(DutyKind::Lunch),
        Self::end(DutyKind::Lunch),
    ];

    pub const fn start(kind: DutyKind) -> Self {
        Self {
            kind,
            bound: Bound::Start,
        }
    }

    pub const fn end(kind: DutyKind) -> Self {
        Self {
            kind,
            bound: Bound::End,
        }
    }

    fn slot(self) -> usize {
        self.kind.index() * 2
            + match self.bound {
                Bound::Start => 0,
                Bound::End => 1,
            }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suffix = match self.bound {
            Bound::Start => "Start",
            Bound::End => "End",
        };
        write!(f, "{}{suffix}", self.kind.wire_prefix())
    }
}

/// A field name that is not one of the eight day fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown schedule field '{0}'")]
pub struct UnknownFieldError(pub String);

impl FromStr for FieldKey {
    type Err = UnknownFieldError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.to_string() == s)
            .ok_or_else(|| UnknownFieldError(s.to_owned()))
    }
}

impl TryFrom<String> for FieldKey {
    type Error = UnknownFieldError;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FieldKey> for String {
    fn from(key: FieldKey) -> Self {
        key.to_string()
    }
}

/// Why a form cannot be submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A field marked required by configuration is blank.
    Required(FieldKey),
    /// A filled field is not an `HH:MM` time.
    InvalidTime { field: FieldKey, value: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required(field) => write!(f, "{field} is required"),
            Self::InvalidTime { field, value } => {
                write!(f, "{field} must be a time like 09:30, got '{value}'")
            }
        }
    }
}

impl From<ValidationError> for DashboardError {
    fn from(e: ValidationError) -> Self {
        DashboardError::Validation(e.to_string())
    }
}

/// Form state for editing one employee's weekday.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleEditor {
    employee: EmployeeId,
    weekday: Weekday,
    fields: [String; 8],
}

impl ScheduleEditor {
    /// Open an empty form.
    pub fn new(employee: EmployeeId, weekday: Weekday) -> Self {
        Self {
            employee,
            weekday,
            fields: Default::default(),
        }
    }

    pub fn employee(&self) -> &EmployeeId {
        &self.employee
    }

    pub fn weekday(&self) -> Weekday {
        self.weekday
    }

    /// Set a field to what the user typed.
    pub fn set(&mut self, field: FieldKey, value: impl Into<String>) {
        self.fields[field.slot()] = value.into();
    }

    /// Builder form of [`set`](Self::set).
    #[must_use]
    pub fn with(mut self, field: FieldKey, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Current text of a field.
    pub fn value(&self, field: FieldKey) -> &str {
        &self.fields[field.slot()]
    }

    /// Blank every field.
    pub fn clear(&mut self) {
        self.fields = Default::default();
    }

    /// Check required fields, then time syntax of every filled field.
    ///
    /// # Errors
    /// Returns the first problem found.
    pub fn validate(&self, config: &EditorConfig) -> std::result::Result<(), ValidationError> {
        for &field in &config.required_fields {
            if self.value(field).trim().is_empty() {
                return Err(ValidationError::Required(field));
            }
        }
        for field in FieldKey::ALL {
            self.parse_field(field)?;
        }
        Ok(())
    }

    /// Assemble the complete day record this form describes.
    ///
    /// A duty with only one bound filled is left unset. Inverted windows are
    /// accepted as typed.
    ///
    /// # Errors
    /// Returns a [`ValidationError`] if the form does not validate.
    pub fn build_day(&self, config: &EditorConfig) -> std::result::Result<DaySchedule, ValidationError> {
        self.validate(config)?;

        let mut day = DaySchedule::empty();
        for kind in DutyKind::PRECEDENCE {
            let start = self.parse_field(FieldKey::start(kind))?;
            let end = self.parse_field(FieldKey::end(kind))?;
            let window = match (start, end) {
                (Some(start), Some(end)) => Some(TimeWindow::new(start, end)),
                (None, None) => None,
                _ => {
                    warn!(
                        employee = %self.employee,
                        weekday = %self.weekday,
                        duty = %kind,
                        "only one bound filled, duty left unset"
                    );
                    None
                }
            };
            day.set_window(kind, window);
        }
        Ok(day)
    }

    /// Validate, then replace the stored day through `store`.
    ///
    /// The form is left untouched so a failed submit can be retried.
    pub async fn submit<P: Persistence>(
        &self,
        store: &ScheduleStore<P>,
        config: &EditorConfig,
    ) -> Result<DaySchedule> {
        let day = self.build_day(config)?;
        store
            .set_day_schedule(&self.employee, self.weekday, day)
            .await?;
        info!(employee = %self.employee, weekday = %self.weekday, "day schedule submitted");
        Ok(day)
    }

    fn parse_field(&self, field: FieldKey) -> std::result::Result<Option<MinuteOfDay>, ValidationError> {
        let raw = self.value(field).trim();
        if raw.is_empty() {
            return Ok(None);
        }
        raw.parse()
            .map(Some)
            .map_err(|_| ValidationError::InvalidTime {
                field,
                value: raw.to_owned(),
            })
    }
}
