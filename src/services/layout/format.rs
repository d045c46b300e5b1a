//! 12-hour time labels for event chips and the hour axis.

use std::fmt::Write;

use chrono::{DateTime, NaiveDate, NaiveTime, Timelike};
use chrono_tz::Tz;

use crate::error::Result;
use crate::models::event::CalendarEvent;
use crate::utils::date::resolve_local;

/// `9am`, `9:05am`, `12pm`: minutes are dropped when they are zero.
pub fn format_time(instant: &DateTime<Tz>) -> String {
    if instant.minute() == 0 {
        instant.format("%-I%P").to_string()
    } else {
        instant.format("%-I:%M%P").to_string()
    }
}

/// Format `instant` as read in `tz` with a strftime-style pattern, e.g.
/// `"%a %-d"` for a column heading. `None` when the pattern is invalid.
pub fn format_date(instant: &DateTime<Tz>, tz: Tz, pattern: &str) -> Option<String> {
    let mut out = String::new();
    write!(out, "{}", instant.with_timezone(&tz).format(pattern)).ok()?;
    Some(out)
}

/// Start and end labels of `event` as read in `tz`.
pub fn event_time_label(event: &CalendarEvent, tz: Tz) -> Result<[String; 2]> {
    let interval = event.interval(tz)?;
    Ok([format_time(&interval.start), format_time(&interval.end)])
}

/// Label for an hour tick on the time axis, e.g. `12am`, `1pm`.
///
/// The hour is placed on `reference` in `tz`, so an hour skipped by a DST
/// transition shows the wall-clock hour it jumps to.
pub fn hour_axis_label(hour: u32, reference: NaiveDate, tz: Tz) -> String {
    let time = NaiveTime::from_hms_opt(hour % 24, 0, 0).unwrap_or(NaiveTime::MIN);

    match resolve_local(reference.and_time(time), tz) {
        Some(instant) => instant.format("%-I%P").to_string(),
        None => time.format("%-I%P").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::America::New_York;
    use chrono_tz::Asia::Kolkata;
    use chrono_tz::UTC;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn labels(start: &str, end: &str, tz: Tz) -> [String; 2] {
        let event = CalendarEvent::new(1, "Label", start, end);
        event_time_label(&event, tz).unwrap()
    }

    #[test]
    fn test_on_the_hour_and_half_hour() {
        assert_eq!(
            labels("2024-01-01T09:00:00Z", "2024-01-01T09:30:00Z", UTC),
            ["9am".to_string(), "9:30am".to_string()]
        );
    }

    #[test]
    fn test_noon_and_midnight() {
        assert_eq!(
            labels("2024-01-01T12:00:00Z", "2024-01-02T00:00:00Z", UTC),
            ["12pm".to_string(), "12am".to_string()]
        );
    }

    #[test]
    fn test_single_digit_minutes_are_padded() {
        assert_eq!(
            labels("2024-01-01T21:05:00Z", "2024-01-01T22:45:00Z", UTC),
            ["9:05pm".to_string(), "10:45pm".to_string()]
        );
    }

    #[test]
    fn test_labels_follow_viewer_zone() {
        // Kolkata is UTC+05:30, so a whole UTC hour lands on a half hour
        assert_eq!(
            labels("2024-01-01T09:00:00Z", "2024-01-01T10:00:00Z", Kolkata),
            ["2:30pm".to_string(), "3:30pm".to_string()]
        );
    }

    #[test]
    fn test_format_date_reads_in_viewer_zone() {
        // 03:00 UTC on Jan 2 is still Monday, Jan 1 in New York
        let instant = crate::utils::date::parse_instant("2024-01-02T03:00:00Z", UTC).unwrap();
        assert_eq!(format_date(&instant, New_York, "%a %-d").as_deref(), Some("Mon 1"));
        assert_eq!(format_date(&instant, UTC, "%Y-%m-%d").as_deref(), Some("2024-01-02"));
    }

    #[test]
    fn test_format_date_rejects_bad_pattern() {
        let instant = crate::utils::date::parse_instant("2024-01-01T00:00:00Z", UTC).unwrap();
        assert_eq!(format_date(&instant, UTC, "%Y-%"), None);
    }

    #[test]
    fn test_unparseable_label_is_an_error() {
        let event = CalendarEvent::new(1, "Broken", "2024-01-01T09:00:00Z", "");
        assert!(event_time_label(&event, UTC).is_err());
    }

    #[test_case(0, "12am")]
    #[test_case(9, "9am")]
    #[test_case(12, "12pm")]
    #[test_case(23, "11pm")]
    #[test_case(24, "12am"; "wraps past midnight")]
    fn test_hour_axis_label(hour: u32, expected: &str) {
        let reference = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(hour_axis_label(hour, reference, UTC), expected);
    }

    #[test]
    fn test_hour_axis_label_in_dst_gap() {
        let reference = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        assert_eq!(hour_axis_label(2, reference, New_York), "3am");
        assert_eq!(hour_axis_label(2, reference.succ_opt().unwrap(), New_York), "2am");
    }
}
