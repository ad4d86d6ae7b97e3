use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Calendar event as exchanged with the Calendar API
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<EventDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<EventDateTime>,
}

/// Start or end of an event. Timed events carry `date_time`, all-day events `date`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventDateTime {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

impl EventDateTime {
    /// A timed value in the given timezone
    pub fn timed(date_time: impl Into<String>, time_zone: &str) -> Self {
        Self {
            date_time: Some(date_time.into()),
            date: None,
            time_zone: Some(time_zone.to_string()),
        }
    }
}

/// Response envelope of `events.list`
#[derive(Debug, Clone, Deserialize, Default)]
pub struct EventList {
    #[serde(default)]
    pub items: Vec<CalendarEvent>,
}

/// Query parameters of `events.list`
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery {
    pub time_min: DateTime<Utc>,
    pub time_max: DateTime<Utc>,
    /// Expand recurring events into single instances
    pub single_events: bool,
    pub order_by: OrderBy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderBy {
    StartTime,
}

impl OrderBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderBy::StartTime => "startTime",
        }
    }
}

impl ListQuery {
    /// Query pairs in the form the Calendar API expects
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("timeMin", self.time_min.to_rfc3339()),
            ("timeMax", self.time_max.to_rfc3339()),
            ("singleEvents", self.single_events.to_string()),
            ("orderBy", self.order_by.as_str().to_string()),
        ]
    }
}

/// Error envelope returned by Google APIs
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub error: ApiError,
}

#[derive(Debug, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub code: u16,
    #[serde(default)]
    pub message: String,
}

impl CalendarEvent {
    /// Raw start value, preferring the timed form
    pub fn start_value(&self) -> Option<&str> {
        let start = self.start.as_ref()?;
        start.date_time.as_deref().or(start.date.as_deref())
    }

    /// Start date of an all-day event
    pub fn start_date(&self) -> Option<NaiveDate> {
        let date = self.start.as_ref()?.date.as_deref()?;
        NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
    }
}
