use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Calendar {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    /// Display color as a hex string, e.g. "#3788d8".
    pub color: Option<String>,
}

/// Create/update payload for a calendar.
#[derive(Debug, Clone, Serialize)]
pub struct CalendarPayload {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventCategory {
    pub id: i64,
    pub name: String,
    pub color: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: i64,
    /// Owning calendar id.
    pub calendar: i64,
    pub category: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    pub start: DateTime<Utc>,
    pub end: Option<DateTime<Utc>>,
    #[serde(default)]
    pub all_day: bool,
}

impl CalendarEvent {
    pub fn spans_multiple_days(&self) -> bool {
        match self.end {
            Some(end) => end.date_naive() > self.start.date_naive(),
            None => false,
        }
    }
}

/// Create/update payload for an event.
#[derive(Debug, Clone, Serialize)]
pub struct EventPayload {
    pub calendar: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<i64>,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub start: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<DateTime<Utc>>,
    pub all_day: bool,
}

/// A saved arrangement of calendars for the layout view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarLayout {
    pub id: i64,
    pub name: String,
    /// Calendar ids shown by this layout, in display order.
    #[serde(default)]
    pub calendars: Vec<i64>,
    #[serde(default)]
    pub is_default: bool,
}

/// Query filter for listing events.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    pub calendar: Option<i64>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

/// Calendars, events, and categories fetched together.
#[derive(Debug, Clone)]
pub struct CalendarSnapshot {
    pub calendars: Vec<Calendar>,
    pub events: Vec<CalendarEvent>,
    pub categories: Vec<EventCategory>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_spans_multiple_days() {
        let start = Utc.with_ymd_and_hms(2026, 3, 10, 9, 0, 0).unwrap();
        let mut event = CalendarEvent {
            id: 1,
            calendar: 1,
            category: None,
            title: "Orientation".to_string(),
            description: None,
            start,
            end: Some(Utc.with_ymd_and_hms(2026, 3, 10, 17, 0, 0).unwrap()),
            all_day: false,
        };
        assert!(!event.spans_multiple_days());

        event.end = Some(Utc.with_ymd_and_hms(2026, 3, 12, 12, 0, 0).unwrap());
        assert!(event.spans_multiple_days());

        event.end = None;
        assert!(!event.spans_multiple_days());
    }

    #[test]
    fn test_event_parses_without_optional_fields() {
        let json = r#"{
            "id": 5,
            "calendar": 2,
            "category": null,
            "title": "Exam week",
            "description": null,
            "start": "2026-06-01T08:00:00Z",
            "end": null
        }"#;
        let event: CalendarEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.title, "Exam week");
        assert!(!event.all_day);
    }
}
