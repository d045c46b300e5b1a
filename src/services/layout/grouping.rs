//! Visibility filtering, overlap grouping and start-time bucketing.

use chrono::{DateTime, NaiveDate, Timelike};
use chrono_tz::Tz;

use crate::models::event::{CalendarEvent, ZonedInterval};
use crate::utils::date::{end_of_day, is_same_day, start_of_day};

/// An event paired with its interval in the viewer timezone.
#[derive(Debug, Clone, Copy)]
pub struct ZonedEvent<'a> {
    pub event: &'a CalendarEvent,
    pub interval: ZonedInterval,
}

/// Cluster of events rendered as one visual stack.
#[derive(Debug, Clone)]
pub struct OverlapGroup<'a> {
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
    pub events: Vec<ZonedEvent<'a>>,
}

impl OverlapGroup<'_> {
    /// Earliest member start, falling back to the group's own bound.
    pub fn earliest_start(&self) -> DateTime<Tz> {
        self.events
            .iter()
            .map(|member| member.interval.start)
            .fold(self.start, |min, start| if start < min { start } else { min })
    }
}

/// Whether `interval` should render in the column for `day`.
///
/// Events touching a single calendar day are matched on their start date.
/// Longer events are matched by overlap with `[start_of_day, end_of_day)`, so
/// they appear on every day they touch.
pub fn visible_on(interval: &ZonedInterval, day: NaiveDate, tz: Tz) -> bool {
    let day_start = start_of_day(day, tz);
    if interval.days_spanned() <= 1 {
        return is_same_day(&interval.start, &day_start);
    }

    interval.overlaps(&day_start, &end_of_day(day, tz))
}

/// Merge events into overlap groups.
///
/// Events are stably sorted by start, then folded left to right: each event
/// joins the first existing group whose bounds it overlaps, widening those
/// bounds, or opens a new group. This is a single pass; it can leave two
/// groups apart that a full transitive closure would have joined.
pub fn group_overlapping<'a>(mut events: Vec<ZonedEvent<'a>>) -> Vec<OverlapGroup<'a>> {
    events.sort_by_key(|zoned| zoned.interval.start);

    let mut groups: Vec<OverlapGroup<'a>> = Vec::new();
    for zoned in events {
        let ZonedInterval { start, end } = zoned.interval;

        match groups.iter_mut().find(|group| start < group.end && end > group.start) {
            Some(group) => {
                group.start = group.start.min(start);
                group.end = group.end.max(end);
                group.events.push(zoned);
            }
            None => groups.push(OverlapGroup {
                start,
                end,
                events: vec![zoned],
            }),
        }
    }

    groups
}

/// `H:MM` key for an instant, e.g. `9:05` or `14:30`.
pub fn slot_key(instant: &DateTime<Tz>) -> String {
    format!("{}:{:02}", instant.hour(), instant.minute())
}

/// Members of one group that share a start slot, in insertion order.
#[derive(Debug, Clone)]
pub struct Bucket<'a> {
    pub key: String,
    pub events: Vec<&'a CalendarEvent>,
}

/// Split a group into buckets keyed by each member's own start slot.
pub fn bucket_group<'a>(group: &OverlapGroup<'a>) -> Vec<Bucket<'a>> {
    let mut buckets: Vec<Bucket<'a>> = Vec::new();

    for member in &group.events {
        let key = slot_key(&member.interval.start);
        match buckets.iter_mut().find(|bucket| bucket.key == key) {
            Some(bucket) => bucket.events.push(member.event),
            None => buckets.push(Bucket {
                key,
                events: vec![member.event],
            }),
        }
    }

    buckets
}
