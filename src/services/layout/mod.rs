//! Event layout engine for day and week views.
//! Turns a flat event list into per-day chip groups plus geometry and label
//! helpers, organized across focused submodules. Every call is a pure
//! function of its inputs.

use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::Serialize;

use crate::error::Result;
use crate::models::event::CalendarEvent;
use crate::models::settings::{Settings, WeekStart};
use crate::utils::date::{days_in_range, end_of_week, start_of_week, today_in, weekday_labels};

pub mod format;
pub mod geometry;
pub mod grouping;

pub use format::{event_time_label, format_date, format_time, hour_axis_label};
pub use geometry::{event_geometry, interval_geometry, EventGeometry};
pub use grouping::{
    bucket_group, group_overlapping, slot_key, visible_on, Bucket, OverlapGroup, ZonedEvent,
};

/// View parameters owned by the caller and passed into every layout call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewContext {
    pub timezone: Tz,
    pub week_start: WeekStart,
    /// Date flagged as today; captured once so a render stays consistent.
    pub today: NaiveDate,
}

impl ViewContext {
    pub fn new(timezone: Tz, week_start: WeekStart) -> Self {
        Self {
            timezone,
            week_start,
            today: today_in(timezone),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.timezone, settings.week_start)
    }

    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }
}

/// One chip per start slot of an overlap group.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhancedEvent {
    /// First event of the slot, in sorted order.
    #[serde(flatten)]
    pub event: CalendarEvent,
    pub event_count: usize,
    /// Every event of the slot, representative included; only when more than one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_slot_events: Option<Vec<CalendarEvent>>,
    pub slot_key: String,
    /// Earliest start of the owning overlap group, for row placement.
    pub group_key: String,
}

impl EnhancedEvent {
    /// All events this chip stands for.
    pub fn members(&self) -> Vec<&CalendarEvent> {
        match &self.time_slot_events {
            Some(events) => events.iter().collect(),
            None => vec![&self.event],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayLayout {
    pub date: NaiveDate,
    pub is_today: bool,
    pub enhanced_events: Vec<EnhancedEvent>,
}

/// Lay out the events visible on `day`.
///
/// Fails on the first event whose timestamps cannot be parsed.
pub fn compute_day_layout(
    events: &[CalendarEvent],
    day: NaiveDate,
    ctx: &ViewContext,
) -> Result<DayLayout> {
    let zoned = zone_events(events, ctx.timezone)?;
    Ok(layout_day(&zoned, day, ctx))
}

/// Lay out the seven days of the week containing `reference`.
pub fn compute_week_layout(
    events: &[CalendarEvent],
    reference: NaiveDate,
    ctx: &ViewContext,
) -> Result<Vec<DayLayout>> {
    let zoned = zone_events(events, ctx.timezone)?;
    let days = days_in_range(
        start_of_week(reference, ctx.week_start),
        end_of_week(reference, ctx.week_start),
    );

    Ok(days
        .into_iter()
        .map(|day| layout_day(&zoned, day, ctx))
        .collect())
}

/// Weekday header labels for the week view, in column order.
pub fn week_header(ctx: &ViewContext) -> Vec<String> {
    weekday_labels(ctx.week_start)
}

fn zone_events(events: &[CalendarEvent], tz: Tz) -> Result<Vec<ZonedEvent<'_>>> {
    events
        .iter()
        .map(|event| {
            Ok(ZonedEvent {
                event,
                interval: event.interval(tz)?,
            })
        })
        .collect()
}

fn layout_day(zoned: &[ZonedEvent<'_>], day: NaiveDate, ctx: &ViewContext) -> DayLayout {
    let visible: Vec<ZonedEvent<'_>> = zoned
        .iter()
        .filter(|z| visible_on(&z.interval, day, ctx.timezone))
        .copied()
        .collect();
    let visible_count = visible.len();

    let groups = group_overlapping(visible);
    let enhanced_events = enhance_groups(&groups);

    log::debug!(
        "Laid out {day}: {visible_count} visible events in {} groups, {} chips",
        groups.len(),
        enhanced_events.len()
    );

    DayLayout {
        date: day,
        is_today: day == ctx.today,
        enhanced_events,
    }
}

/// One chip per start slot of the day.
///
/// Buckets are built per group, then buckets sharing a slot key are merged
/// across groups, so a slot never yields two chips. A merged chip keeps the
/// group key of the first group that used the slot.
fn enhance_groups(groups: &[OverlapGroup<'_>]) -> Vec<EnhancedEvent> {
    let mut slots: Vec<(Bucket<'_>, String)> = Vec::new();

    for group in groups {
        let group_key = slot_key(&group.earliest_start());
        for bucket in bucket_group(group) {
            match slots.iter_mut().find(|(slot, _)| slot.key == bucket.key) {
                Some((slot, _)) => slot.events.extend(bucket.events),
                None => slots.push((bucket, group_key.clone())),
            }
        }
    }

    slots
        .into_iter()
        .filter_map(|(bucket, group_key)| {
            let representative = bucket.events.first()?;
            let event_count = bucket.events.len();
            Some(EnhancedEvent {
                event: (*representative).clone(),
                event_count,
                time_slot_events: (event_count > 1)
                    .then(|| bucket.events.iter().map(|e| (*e).clone()).collect()),
                slot_key: bucket.key,
                group_key,
            })
        })
        .collect()
}
