//! JSON shapes exchanged with the persistence API.
//!
//! Time bounds travel as `"HH:MM"` strings with `""` meaning unset. This is
//! the only place that encoding exists; the rest of the crate works with
//! `Option<TimeWindow>`.

use crate::schedule::{
    DaySchedule, DutyKind, Employee, EmployeeId, MinuteOfDay, TimeWindow, WeeklySchedule, Weekday,
};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

/// One day record: start/end strings for each duty kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WireDay {
    #[serde(deserialize_with = "null_as_empty")]
    pub phones_start: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub phones_end: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub tier1_start: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub tier1_end: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub tier2_start: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub tier2_end: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub lunch_start: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub lunch_end: String,
}

/// Read a JSON `null` string as `""`.
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl WireDay {
    fn bounds(&self, kind: DutyKind) -> (&str, &str) {
        match kind {
            DutyKind::Phones => (&self.phones_start, &self.phones_end),
            DutyKind::Tier1 => (&self.tier1_start, &self.tier1_end),
            DutyKind::Tier2 => (&self.tier2_start, &self.tier2_end),
            DutyKind::Lunch => (&self.lunch_start, &self.lunch_end),
        }
    }

    fn bounds_mut(&mut self, kind: DutyKind) -> (&mut String, &mut String) {
        match kind {
            DutyKind::Phones => (&mut self.phones_start, &mut self.phones_end),
            DutyKind::Tier1 => (&mut self.tier1_start, &mut self.tier1_end),
            DutyKind::Tier2 => (&mut self.tier2_start, &mut self.tier2_end),
            DutyKind::Lunch => (&mut self.lunch_start, &mut self.lunch_end),
        }
    }

    /// Decode into the model.
    ///
    /// A pair with an empty or unparseable bound becomes unset; anything
    /// other than both-empty is logged since the server should never hold
    /// such a record.
    pub fn to_day_schedule(&self) -> DaySchedule {
        let mut day = DaySchedule::empty();
        for kind in DutyKind::PRECEDENCE {
            let (start, end) = self.bounds(kind);
            if start.trim().is_empty() && end.trim().is_empty() {
                continue;
            }
            match (start.parse::<MinuteOfDay>(), end.parse::<MinuteOfDay>()) {
                (Ok(s), Ok(e)) => day.set_window(kind, Some(TimeWindow::new(s, e))),
                _ => warn!(duty = %kind, start, end, "ignoring incomplete or malformed window"),
            }
        }
        day
    }
}

impl From<&DaySchedule> for WireDay {
    fn from(day: &DaySchedule) -> Self {
        let mut wire = WireDay::default();
        for (kind, window) in day.windows() {
            let (start, end) = wire.bounds_mut(kind);
            *start = window.start.to_string();
            *end = window.end.to_string();
        }
        wire
    }
}

/// Employee as returned by `GET /employees`.
#[derive(Debug, Clone, Deserialize)]
pub struct WireEmployee {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    /// A `null` day is kept as missing, not as an empty day.
    #[serde(default)]
    pub schedule: Option<BTreeMap<String, Option<WireDay>>>,
}

impl WireEmployee {
    pub fn into_employee(self) -> Employee {
        let mut schedule = WeeklySchedule::default();
        for (key, day) in self.schedule.unwrap_or_default() {
            match (key.parse::<Weekday>(), day) {
                (Ok(weekday), Some(day)) => schedule.set_day(weekday, day.to_day_schedule()),
                (Ok(weekday), None) => {
                    warn!(employee = %self.id, %weekday, "null day record, treating as missing");
                }
                (Err(_), _) => warn!(employee = %self.id, key = %key, "ignoring unknown weekday key"),
            }
        }
        Employee {
            id: EmployeeId::new(self.id),
            name: self.name,
            schedule,
        }
    }
}

/// Body of `POST /employees`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateEmployeeRequest<'a> {
    pub name: &'a str,
    pub schedule: BTreeMap<&'static str, WireDay>,
}

impl<'a> CreateEmployeeRequest<'a> {
    pub fn new(name: &'a str, schedule: &WeeklySchedule) -> Self {
        Self {
            name,
            schedule: week_to_wire(schedule),
        }
    }
}

/// Response of `POST /employees`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEmployeeResponse {
    #[serde(default, alias = "_id")]
    pub id: Option<String>,
}

/// Body of `PUT /employees/{id}`.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateDayRequest {
    pub day: Weekday,
    pub schedule: WireDay,
}

pub fn week_to_wire(schedule: &WeeklySchedule) -> BTreeMap<&'static str, WireDay> {
    schedule
        .days()
        .map(|(weekday, day)| (weekday.name(), WireDay::from(day)))
        .collect()
}
