// Event module
// Calendar event model as supplied by the hosting view

use std::fmt;

use chrono::DateTime;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Bound, LayoutError, Result};
use crate::utils::date::{calendar_day_distance, parse_instant};

/// Event identifier: consumers use either integers or strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventId {
    Int(i64),
    Text(String),
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventId::Int(id) => write!(f, "{id}"),
            EventId::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for EventId {
    fn from(id: i64) -> Self {
        EventId::Int(id)
    }
}

impl From<&str> for EventId {
    fn from(id: &str) -> Self {
        EventId::Text(id.to_string())
    }
}

impl From<String> for EventId {
    fn from(id: String) -> Self {
        EventId::Text(id)
    }
}

/// Serialized start/end timestamps, parsed lazily against the viewer timezone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventTime {
    pub start: String,
    pub end: String,
}

/// Calendar event. Never mutated by the layout engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: EventId,
    #[serde(default)]
    pub url: String,
    pub title: String,
    pub time: EventTime,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    /// Consumer-defined fields, preserved as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CalendarEvent {
    /// Create an event with the required fields.
    ///
    /// No interval validation happens here: inverted intervals are accepted
    /// and render as zero-height blocks.
    ///
    /// # Examples
    /// ```
    /// use calendar_layout::models::event::CalendarEvent;
    ///
    /// let event = CalendarEvent::new(1, "Standup", "2024-01-01T09:00:00Z", "2024-01-01T09:15:00Z");
    /// assert_eq!(event.title, "Standup");
    /// ```
    pub fn new(
        id: impl Into<EventId>,
        title: impl Into<String>,
        start: impl Into<String>,
        end: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            url: String::new(),
            title: title.into(),
            time: EventTime {
                start: start.into(),
                end: end.into(),
            },
            description: String::new(),
            image: None,
            tags: None,
            location: None,
            background: None,
            extra: Map::new(),
        }
    }

    /// Create a builder for constructing events with optional fields
    pub fn builder() -> EventBuilder {
        EventBuilder::new()
    }

    /// Parse both bounds and convert them into `tz`.
    pub fn interval(&self, tz: Tz) -> Result<ZonedInterval> {
        let start = self.parse_bound(Bound::Start, &self.time.start, tz)?;
        let end = self.parse_bound(Bound::End, &self.time.end, tz)?;
        Ok(ZonedInterval { start, end })
    }

    fn parse_bound(&self, bound: Bound, value: &str, tz: Tz) -> Result<DateTime<Tz>> {
        parse_instant(value, tz).ok_or_else(|| LayoutError::UnparseableTimestamp {
            event_id: self.id.clone(),
            bound,
            value: value.to_string(),
        })
    }
}

/// Half-open `[start, end)` interval in the viewer timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZonedInterval {
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
}

impl ZonedInterval {
    /// `end <= start`.
    pub fn is_degenerate(&self) -> bool {
        self.end <= self.start
    }

    /// Calendar days touched, counting both the start and end day.
    pub fn days_spanned(&self) -> i64 {
        calendar_day_distance(&self.end, &self.start) + 1
    }

    pub fn overlaps(&self, start: &DateTime<Tz>, end: &DateTime<Tz>) -> bool {
        self.start < *end && self.end > *start
    }
}

/// Builder for creating events with optional fields
#[derive(Default)]
pub struct EventBuilder {
    id: Option<EventId>,
    url: Option<String>,
    title: Option<String>,
    start: Option<String>,
    end: Option<String>,
    description: Option<String>,
    image: Option<String>,
    tags: Option<String>,
    location: Option<String>,
    background: Option<String>,
    extra: Map<String, Value>,
}

impl EventBuilder {
    /// Create a new event builder
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: impl Into<EventId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the serialized start timestamp
    pub fn start(mut self, start: impl Into<String>) -> Self {
        self.start = Some(start.into());
        self
    }

    /// Set the serialized end timestamp
    pub fn end(mut self, end: impl Into<String>) -> Self {
        self.end = Some(end.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn tags(mut self, tags: impl Into<String>) -> Self {
        self.tags = Some(tags.into());
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Set the chip background color
    pub fn background(mut self, background: impl Into<String>) -> Self {
        self.background = Some(background.into());
        self
    }

    /// Attach a consumer-defined field
    pub fn extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Build the event
    pub fn build(self) -> std::result::Result<CalendarEvent, String> {
        let id = self.id.ok_or("Event id is required")?;
        let title = self.title.ok_or("Event title is required")?;
        let start = self.start.ok_or("Event start time is required")?;
        let end = self.end.ok_or("Event end time is required")?;

        Ok(CalendarEvent {
            id,
            url: self.url.unwrap_or_default(),
            title,
            time: EventTime { start, end },
            description: self.description.unwrap_or_default(),
            image: self.image,
            tags: self.tags,
            location: self.location,
            background: self.background,
            extra: self.extra,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;
    use chrono_tz::Asia::Tokyo;
    use chrono_tz::UTC;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_deserialize_consumer_shape() {
        let json = r##"{
            "id": 7,
            "url": "https://example.com/e/7",
            "title": "Launch",
            "time": { "start": "2024-01-01T09:00:00Z", "end": "2024-01-01T10:00:00Z" },
            "description": "Ship it",
            "background": "#ff0000",
            "organizer": "ops"
        }"##;

        let event: CalendarEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.id, EventId::Int(7));
        assert_eq!(event.background.as_deref(), Some("#ff0000"));
        assert_eq!(event.extra.get("organizer"), Some(&Value::from("ops")));
        assert!(event.image.is_none());
    }

    #[test]
    fn test_string_ids_are_accepted() {
        let json = r#"{"id":"abc","title":"x","time":{"start":"2024-01-01","end":"2024-01-02"}}"#;
        let event: CalendarEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.id, EventId::Text("abc".to_string()));
        assert_eq!(event.id.to_string(), "abc");
        assert_eq!(event.description, "");
    }

    #[test]
    fn test_extra_fields_survive_serialization() {
        let event = CalendarEvent::builder()
            .id(1)
            .title("Review")
            .start("2024-01-01T09:00:00Z")
            .end("2024-01-01T10:00:00Z")
            .extra("room", "B12")
            .build()
            .unwrap();

        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["room"], "B12");
        assert_eq!(value["time"]["start"], "2024-01-01T09:00:00Z");
        assert!(value.get("tags").is_none());
    }

    #[test]
    fn test_builder_missing_title() {
        let result = CalendarEvent::builder()
            .id(1)
            .start("2024-01-01T09:00:00Z")
            .end("2024-01-01T10:00:00Z")
            .build();
        assert_eq!(result.unwrap_err(), "Event title is required");
    }

    #[test]
    fn test_builder_missing_id() {
        let result = CalendarEvent::builder().title("Meeting").build();
        assert_eq!(result.unwrap_err(), "Event id is required");
    }

    #[test]
    fn test_interval_converts_into_viewer_zone() {
        let event = CalendarEvent::new(1, "Call", "2024-01-01T23:30:00Z", "2024-01-02T00:30:00Z");
        let interval = event.interval(Tokyo).unwrap();
        assert_eq!(interval.start.hour(), 8);
        assert_eq!(interval.start.date_naive().to_string(), "2024-01-02");
        assert_eq!(interval.days_spanned(), 1);
        assert_eq!(interval.end - interval.start, chrono::Duration::hours(1));
    }

    #[test]
    fn test_interval_reports_offending_bound() {
        let event = CalendarEvent::new("x1", "Broken", "2024-01-01T09:00:00Z", "tomorrow-ish");
        let err = event.interval(UTC).unwrap_err();
        assert_eq!(
            err,
            LayoutError::UnparseableTimestamp {
                event_id: EventId::from("x1"),
                bound: Bound::End,
                value: "tomorrow-ish".to_string(),
            }
        );
        assert!(err.to_string().contains("end timestamp"));
    }

    #[test]
    fn test_inverted_interval_is_degenerate_not_rejected() {
        let event = CalendarEvent::new(1, "Backwards", "2024-01-01T10:00:00Z", "2024-01-01T09:00:00Z");
        let interval = event.interval(UTC).unwrap();
        assert!(interval.is_degenerate());
        assert_eq!(interval.days_spanned(), 1);
    }

    #[test]
    fn test_days_spanned_across_midnight() {
        let event = CalendarEvent::new(1, "Night", "2024-03-01T22:00:00Z", "2024-03-03T02:00:00Z");
        assert_eq!(event.interval(UTC).unwrap().days_spanned(), 3);
    }
}
