//! Minute-of-day bounds and duty time windows.
//!
//! A [`TimeWindow`] is always fully set. "Not scheduled" is expressed by
//! `Option<TimeWindow>` at the use site, never by a half-filled window.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Minutes in one day.
pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// A minute of the day in `0..=1439`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct MinuteOfDay(u16);

impl MinuteOfDay {
    /// Midnight (`00:00`).
    pub const MIDNIGHT: Self = Self(0);

    /// Create from a raw minute count. Returns `None` outside `0..=1439`.
    pub fn new(minute: u16) -> Option<Self> {
        (minute < MINUTES_PER_DAY).then_some(Self(minute))
    }

    /// Create from hour and minute. Returns `None` for `hour > 23` or
    /// `minute > 59`.
    pub fn from_hm(hour: u8, minute: u8) -> Option<Self> {
        if hour > 23 || minute > 59 {
            return None;
        }
        Some(Self(u16::from(hour) * 60 + u16::from(minute)))
    }

    /// Raw minute count since midnight.
    pub fn get(self) -> u16 {
        self.0
    }

    /// Hour component (0-23).
    pub fn hour(self) -> u8 {
        (self.0 / 60) as u8
    }

    /// Minute component (0-59).
    pub fn minute(self) -> u8 {
        (self.0 % 60) as u8
    }

    /// The bound as a wall-clock time with zero seconds.
    pub fn to_time(self) -> NaiveTime {
        NaiveTime::from_hms_opt(u32::from(self.hour()), u32::from(self.minute()), 0)
            .unwrap_or(NaiveTime::MIN)
    }
}

impl TryFrom<u16> for MinuteOfDay {
    type Error = String;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("minute of day out of range: {value}"))
    }
}

impl From<MinuteOfDay> for u16 {
    fn from(value: MinuteOfDay) -> Self {
        value.0
    }
}

impl fmt::Display for MinuteOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// Error returned when a `"HH:MM"` string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time {input:?}: expected 24-hour HH:MM")]
pub struct ParseTimeError {
    /// The rejected input.
    pub input: String,
}

impl FromStr for MinuteOfDay {
    type Err = ParseTimeError;

    /// Parses the 24-hour `"HH:MM"` encoding used on the wire.
    ///
    /// A single-digit hour (`"9:05"`) is accepted; the minute must always
    /// have two digits.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseTimeError {
            input: s.to_owned(),
        };
        let trimmed = s.trim();
        let (h, m) = trimmed.split_once(':').ok_or_else(err)?;
        if h.is_empty() || h.len() > 2 || m.len() != 2 {
            return Err(err());
        }
        if !h.bytes().all(|b| b.is_ascii_digit()) || !m.bytes().all(|b| b.is_ascii_digit()) {
            return Err(err());
        }
        let hour: u8 = h.parse().map_err(|_| err())?;
        let minute: u8 = m.parse().map_err(|_| err())?;
        Self::from_hm(hour, minute).ok_or_else(err)
    }
}

/// A scheduled duty window with both bounds set.
///
/// `end > start` is not enforced. An inverted window is kept
/// as entered: no instant ever falls inside it and it renders with zero
/// height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeWindow {
    /// Start bound (exclusive).
    pub start: MinuteOfDay,
    /// End bound (exclusive).
    pub end: MinuteOfDay,
}

impl TimeWindow {
    /// Create a window from two bounds.
    pub fn new(start: MinuteOfDay, end: MinuteOfDay) -> Self {
        Self { start, end }
    }

    /// Parse both bounds from `"HH:MM"` strings.
    pub fn parse(start: &str, end: &str) -> Result<Self, ParseTimeError> {
        Ok(Self::new(start.parse()?, end.parse()?))
    }

    /// Returns `true` if `end <= start`.
    pub fn is_inverted(&self) -> bool {
        self.end <= self.start
    }

    /// Signed duration in minutes (negative for inverted windows).
    pub fn duration_minutes(&self) -> i32 {
        i32::from(self.end.get()) - i32::from(self.start.get())
    }

    /// Returns `true` if `instant` lies strictly between the bounds.
    ///
    /// An instant exactly on either bound is outside the window.
    pub fn contains(&self, instant: NaiveTime) -> bool {
        self.start.to_time() < instant && instant < self.end.to_time()
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.start, self.end)
    }
}
