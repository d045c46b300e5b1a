//! Vertical placement of an event inside a 24-hour day column.

use chrono::{DateTime, NaiveDate, Timelike};
use chrono_tz::Tz;
use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::error::Result;
use crate::models::event::{CalendarEvent, ZonedInterval};
use crate::utils::date::{end_of_day, start_of_day};

/// Minutes in the column (24 * 60).
pub const DAY_MINUTES: i64 = 1440;
/// Shift applied to every start to clear the column's header row.
pub const START_OFFSET_MINUTES: i64 = 30;
/// Extra minutes added to every non-empty duration for the same header row.
pub const DURATION_PADDING_MINUTES: i64 = 60;
/// Blocks never render closer than this to the column top.
pub const MIN_TOP_PERCENT: f64 = 4.0;

/// Top offset and height as percentages of the column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventGeometry {
    pub top_percent: f64,
    pub height_percent: f64,
}

impl EventGeometry {
    /// CSS-style `top`, e.g. `"39.583333333333336%"`.
    pub fn top(&self) -> String {
        format!("{}%", self.top_percent)
    }

    /// CSS-style `height`, e.g. `"8.333333333333332%"`.
    pub fn height(&self) -> String {
        format!("{}%", self.height_percent)
    }
}

impl Serialize for EventGeometry {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("EventGeometry", 2)?;
        state.serialize_field("top", &self.top())?;
        state.serialize_field("height", &self.height())?;
        state.end()
    }
}

/// Geometry of `event` in the column for `day`, both read in `tz`.
pub fn event_geometry(event: &CalendarEvent, day: NaiveDate, tz: Tz) -> Result<EventGeometry> {
    let interval = event.interval(tz)?;
    Ok(interval_geometry(&interval, day, tz))
}

/// Geometry for an already-parsed interval.
///
/// Only the part of the interval inside `[start_of_day, end_of_day)` is
/// placed. Positions are wall-clock minutes, so rows line up with the hour
/// axis on DST transition days. An empty visible part yields a zero-height
/// block.
pub fn interval_geometry(interval: &ZonedInterval, day: NaiveDate, tz: Tz) -> EventGeometry {
    let day_start = start_of_day(day, tz);
    let day_end = end_of_day(day, tz);

    let visible = ZonedInterval {
        start: interval.start.max(day_start),
        end: interval.end.min(day_end),
    };

    let visible_start_minutes = wall_clock_minutes(&visible.start, &day_end);
    let start_minutes = visible_start_minutes + START_OFFSET_MINUTES;
    let duration_minutes = if visible.is_degenerate() {
        log::debug!(
            "Empty visible interval on {day} ({} -> {}), rendering zero height",
            interval.start,
            interval.end
        );
        0
    } else {
        // A fall-back repeat can put the wall-clock end before the start.
        let wall_minutes = wall_clock_minutes(&visible.end, &day_end) - visible_start_minutes;
        wall_minutes.max(0) + DURATION_PADDING_MINUTES
    };

    let clamped_start = start_minutes.clamp(0, DAY_MINUTES);
    let clamped_height = duration_minutes.clamp(0, DAY_MINUTES - clamped_start);

    let raw_top = clamped_start as f64 / DAY_MINUTES as f64 * 100.0;
    let top_percent = raw_top.max(MIN_TOP_PERCENT);
    let mut height_percent = clamped_height as f64 / DAY_MINUTES as f64 * 100.0;
    if top_percent > raw_top {
        // The floor moved the block down; keep its bottom inside the column.
        height_percent = height_percent.min(100.0 - top_percent);
    }

    EventGeometry {
        top_percent,
        height_percent,
    }
}

/// Minutes past midnight on the wall clock; the day's end counts as 1440.
fn wall_clock_minutes(instant: &DateTime<Tz>, day_end: &DateTime<Tz>) -> i64 {
    if instant >= day_end {
        return DAY_MINUTES;
    }
    i64::from(instant.hour() * 60 + instant.minute())
}
