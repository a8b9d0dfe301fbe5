//! Proportional layout of duty windows in the weekly grid.
//!
//! Each set window becomes a block whose height is its share of a
//! 1440-minute day. Unset windows produce no block at all.

use crate::schedule::model::{DaySchedule, DutyKind, Employee, Weekday};
use crate::schedule::window::{MINUTES_PER_DAY, TimeWindow};
use serde::Serialize;

/// Vertical stacking order of blocks inside a grid cell.
pub const STACK_ORDER: [DutyKind; 4] = [
    DutyKind::Lunch,
    DutyKind::Tier1,
    DutyKind::Tier2,
    DutyKind::Phones,
];

/// Day-fraction percentage of `window`, or `None` when unset.
///
/// Inverted windows clamp to `0.0`: they still produce an element, just
/// one with no height.
pub fn percentage(window: Option<TimeWindow>) -> Option<f64> {
    let window = window?;
    let pct = f64::from(window.duration_minutes()) / f64::from(MINUTES_PER_DAY) * 100.0;
    Some(pct.clamp(0.0, 100.0))
}

/// One rendered duty block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DutyBlock {
    pub kind: DutyKind,
    pub label: &'static str,
    pub color: &'static str,
    pub window: TimeWindow,
    /// Height as a percentage of the cell.
    pub height_pct: f64,
}

impl DutyBlock {
    /// Tooltip / caption text, e.g. `"Tier 1: 09:00 - 17:00"`.
    pub fn title(&self) -> String {
        format!("{}: {}", self.label, self.window)
    }
}

/// Blocks for one day in [`STACK_ORDER`].
pub fn render_day(day: &DaySchedule) -> Vec<DutyBlock> {
    STACK_ORDER
        .into_iter()
        .filter_map(|kind| {
            let window = day.window(kind)?;
            let height_pct = percentage(Some(window))?;
            Some(DutyBlock {
                kind,
                label: kind.label(),
                color: kind.color(),
                window,
                height_pct,
            })
        })
        .collect()
}

/// One grid cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayCell {
    pub weekday: Weekday,
    pub blocks: Vec<DutyBlock>,
}

/// The seven cells of an employee's row, Sunday-first.
///
/// Days missing from the schedule render as empty cells.
pub fn render_week(employee: &Employee) -> Vec<DayCell> {
    Weekday::ALL
        .into_iter()
        .map(|weekday| DayCell {
            weekday,
            blocks: employee
                .schedule
                .day(weekday)
                .map(render_day)
                .unwrap_or_default(),
        })
        .collect()
}
