//! Timezone-aware date helpers.
//!
//! Every helper takes the viewer timezone explicitly so day boundaries are
//! derived in that zone, not in the host's local time.

use chrono::{
    DateTime, Datelike, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, Offset,
    TimeZone, Utc,
};
use chrono_tz::Tz;

use crate::error::{LayoutError, Result};
use crate::models::settings::WeekStart;

/// Resolve a timezone identifier such as `"Europe/Berlin"`.
pub fn parse_timezone(identifier: &str) -> Result<Tz> {
    identifier
        .trim()
        .parse::<Tz>()
        .map_err(|_| LayoutError::UnknownTimezone(identifier.to_string()))
}

/// Map a wall-clock time onto an instant in `tz`.
///
/// Ambiguous times (DST fall-back) resolve to the earlier instant. Times in a
/// gap are shifted forward by the gap length, matching how a wall clock
/// jumps; this holds for gaps longer than an hour too.
pub fn resolve_local(naive: NaiveDateTime, tz: Tz) -> Option<DateTime<Tz>> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Some(dt),
        LocalResult::Ambiguous(earliest, _) => Some(earliest),
        LocalResult::None => {
            // Read the wall time with the offset in force a day before the gap.
            let before = naive.checked_sub_signed(Duration::days(1))?;
            let offset = tz.offset_from_utc_datetime(&before).fix();
            let utc = naive.checked_sub_signed(Duration::seconds(offset.local_minus_utc().into()))?;
            Some(tz.from_utc_datetime(&utc))
        }
    }
}

/// Parse a serialized timestamp into an instant in `tz`.
///
/// Accepts RFC 3339 (`2024-01-01T09:00:00Z`), offset-less ISO date-times
/// (`2024-01-01T09:00[:00[.fff]]`) and plain dates (`2024-01-01`). Values
/// without an offset are read as wall-clock time in `tz`.
pub fn parse_instant(value: &str, tz: Tz) -> Option<DateTime<Tz>> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&tz));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return resolve_local(naive, tz);
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .map(|date| start_of_day(date, tz))
}

/// First instant of `date` in `tz`.
pub fn start_of_day(date: NaiveDate, tz: Tz) -> DateTime<Tz> {
    let midnight = date.and_time(NaiveTime::MIN);
    resolve_local(midnight, tz)
        .unwrap_or_else(|| Utc.from_utc_datetime(&midnight).with_timezone(&tz))
}

/// Exclusive end of `date` in `tz`: the first instant of the following day.
pub fn end_of_day(date: NaiveDate, tz: Tz) -> DateTime<Tz> {
    match date.succ_opt() {
        Some(next) => start_of_day(next, tz),
        None => start_of_day(date, tz) + Duration::days(1),
    }
}

pub fn is_same_day(a: &DateTime<Tz>, b: &DateTime<Tz>) -> bool {
    a.date_naive() == b.date_naive()
}

/// Number of calendar-day boundaries between `earlier` and `later`,
/// measured on the wall clock of the instants' timezone.
pub fn calendar_day_distance(later: &DateTime<Tz>, earlier: &DateTime<Tz>) -> i64 {
    (later.date_naive() - earlier.date_naive()).num_days()
}

/// Calculate the start of the week containing the given date.
pub fn start_of_week(date: NaiveDate, week_start: WeekStart) -> NaiveDate {
    let weekday = date.weekday().num_days_from_sunday() as i64;
    let offset = (weekday - week_start.first_day_of_week() as i64 + 7) % 7;
    date - Duration::days(offset)
}

/// Last day (inclusive) of the week containing the given date.
pub fn end_of_week(date: NaiveDate, week_start: WeekStart) -> NaiveDate {
    start_of_week(date, week_start) + Duration::days(6)
}

/// Every date from `start` to `end`, both inclusive.
pub fn days_in_range(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start.iter_days().take_while(|day| *day <= end).collect()
}

/// Today's calendar date as seen from `tz`.
pub fn today_in(tz: Tz) -> NaiveDate {
    Utc::now().with_timezone(&tz).date_naive()
}

/// Abbreviated weekday names in display order, e.g. `["Sun", "Mon", ...]`.
pub fn weekday_labels(week_start: WeekStart) -> Vec<String> {
    let mut day = week_start.weekday();
    let mut labels = Vec::with_capacity(7);
    for _ in 0..7 {
        labels.push(day.to_string());
        day = day.succ();
    }
    labels
}
