// Test fixtures - reusable test data
// Provides consistent dates and events across integration tests

#![allow(dead_code)]

use calendar_layout::models::event::CalendarEvent;
use calendar_layout::models::settings::WeekStart;
use calendar_layout::services::layout::ViewContext;
use chrono::NaiveDate;
use chrono_tz::Tz;

/// Sample dates for testing
pub mod dates {
    use super::*;

    /// Monday, Jan 1, 2024
    pub fn jan_1_2024() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    /// Friday, Mar 1, 2024
    pub fn mar_1_2024() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    pub fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }
}

/// Sample events for testing
pub mod events {
    use super::*;

    pub fn event(id: i64, start: &str, end: &str) -> CalendarEvent {
        CalendarEvent::new(id, format!("Event {id}"), start, end)
    }

    /// 09:00-10:00 UTC on Jan 1, 2024
    pub fn standup() -> CalendarEvent {
        event(1, "2024-01-01T09:00:00Z", "2024-01-01T10:00:00Z")
    }

    /// 09:30-11:00 UTC on Jan 1, 2024, overlapping the standup
    pub fn design_review() -> CalendarEvent {
        event(2, "2024-01-01T09:30:00Z", "2024-01-01T11:00:00Z")
    }

    /// Friday 22:00 to Sunday 02:00 UTC, crossing two midnights
    pub fn weekend_offsite() -> CalendarEvent {
        event(3, "2024-03-01T22:00:00Z", "2024-03-03T02:00:00Z")
    }

    /// Events as a hosting view would send them
    pub fn consumer_json() -> &'static str {
        r##"[
            {
                "id": 10,
                "url": "https://calendar.example/10",
                "title": "Planning",
                "time": { "start": "2024-01-01T09:00:00Z", "end": "2024-01-01T10:00:00Z" },
                "description": "Quarterly planning",
                "location": "Room 4",
                "background": "#2563eb"
            },
            {
                "id": "ext-7",
                "title": "Vendor call",
                "time": { "start": "2024-01-01T09:00:00Z", "end": "2024-01-01T09:45:00Z" },
                "description": "",
                "tags": "external",
                "priority": 2
            },
            {
                "id": 11,
                "title": "Lunch",
                "time": { "start": "2024-01-01T12:00:00Z", "end": "2024-01-01T13:00:00Z" },
                "description": "Team lunch"
            }
        ]"##
    }
}

pub fn utc_context(week_start: WeekStart) -> ViewContext {
    ViewContext::new(Tz::UTC, week_start).with_today(dates::jan_1_2024())
}
