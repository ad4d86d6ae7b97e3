use super::models::CalendarEvent;
use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;

/// Accepted layouts for wall-clock input, tried in order
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
];

/// Format of the Date column in the event table
pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";

/// A point in time entered by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventTime {
    /// Wall-clock time, interpreted in the configured timezone by the Calendar API
    Local(NaiveDateTime),
    /// Time with an explicit UTC offset
    Offset(DateTime<FixedOffset>),
}

impl EventTime {
    /// Parse `YYYY-MM-DD hh:mm` and its common variants, a bare date, or RFC 3339
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
            return Some(EventTime::Offset(dt));
        }

        for format in NAIVE_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(input, format) {
                return Some(EventTime::Local(dt));
            }
        }

        // A bare date starts at midnight
        ["%Y-%m-%d", "%Y/%m/%d"]
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(input, format).ok())
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(EventTime::Local)
    }

    /// Value for the `dateTime` field of an event
    pub fn to_api_string(&self) -> String {
        match self {
            EventTime::Local(dt) => dt.format("%Y-%m-%dT%H:%M:%S").to_string(),
            EventTime::Offset(dt) => dt.to_rfc3339(),
        }
    }
}

/// Time window `[now, now + days)` for listing events.
///
/// `None` when the end falls past the last representable date.
pub fn list_window(now: DateTime<Utc>, days: u32) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let end = now.checked_add_signed(Duration::days(i64::from(days)))?;
    Some((now, end))
}

/// Start of an event formatted for display.
///
/// Timed events are shown in `timezone` when it is a known zone, otherwise in
/// their own offset. All-day events show midnight of their date.
pub fn format_event_start(event: &CalendarEvent, timezone: &str) -> String {
    let Some(start) = event.start.as_ref() else {
        return String::new();
    };

    if let Some(date_time) = start.date_time.as_deref() {
        return match DateTime::parse_from_rfc3339(date_time) {
            Ok(dt) => match timezone.parse::<Tz>() {
                Ok(tz) => dt.with_timezone(&tz).format(DISPLAY_FORMAT).to_string(),
                Err(_) => dt.format(DISPLAY_FORMAT).to_string(),
            },
            Err(_) => date_time.to_string(),
        };
    }

    match event.start_date() {
        Some(date) => format!("{} 00:00", date.format("%Y-%m-%d")),
        None => start.date.clone().unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::google_calendar::models::EventDateTime;
    use chrono::TimeZone;

    fn naive(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_parse_accepts_common_layouts() {
        let expected = Some(EventTime::Local(naive(2024, 1, 1, 9, 0)));

        assert_eq!(EventTime::parse("2024-01-01 09:00"), expected);
        assert_eq!(EventTime::parse("2024-01-01T09:00"), expected);
        assert_eq!(EventTime::parse("2024-01-01 09:00:00"), expected);
        assert_eq!(EventTime::parse("2024/01/01 09:00"), expected);
        assert_eq!(EventTime::parse("  2024-01-01 09:00  "), expected);
        assert_eq!(
            EventTime::parse("2024-01-01"),
            Some(EventTime::Local(naive(2024, 1, 1, 0, 0)))
        );
    }

    #[test]
    fn test_parse_keeps_explicit_offset() {
        let parsed = EventTime::parse("2024-01-01T09:00:00+09:00").unwrap();

        assert_eq!(parsed.to_api_string(), "2024-01-01T09:00:00+09:00");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(EventTime::parse(""), None);
        assert_eq!(EventTime::parse("   "), None);
        assert_eq!(EventTime::parse("tomorrow"), None);
        assert_eq!(EventTime::parse("2024-13-01 09:00"), None);
        assert_eq!(EventTime::parse("2024-02-30 09:00"), None);
        assert_eq!(EventTime::parse("2024-01-01 25:00"), None);
    }

    #[test]
    fn test_local_api_string_has_no_offset() {
        let parsed = EventTime::parse("2024-01-01 09:00").unwrap();

        assert_eq!(parsed.to_api_string(), "2024-01-01T09:00:00");
    }

    #[test]
    fn test_list_window() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 12, 30, 0).unwrap();

        let (min, max) = list_window(now, 0).unwrap();
        assert_eq!(min, max);

        let (min, max) = list_window(now, 7).unwrap();
        assert_eq!(min, now);
        assert_eq!(max, Utc.with_ymd_and_hms(2024, 1, 8, 12, 30, 0).unwrap());
    }

    #[test]
    fn test_list_window_past_last_date() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 12, 30, 0).unwrap();

        assert_eq!(list_window(now, 100_000_000), None);
        assert_eq!(list_window(now, u32::MAX), None);
    }

    #[test]
    fn test_format_event_start() {
        let timed = CalendarEvent {
            start: Some(EventDateTime::timed("2024-01-01T09:00:00Z", "UTC")),
            ..Default::default()
        };
        assert_eq!(format_event_start(&timed, "Asia/Tokyo"), "2024-01-01 18:00");
        assert_eq!(format_event_start(&timed, "Not/AZone"), "2024-01-01 09:00");

        let all_day = CalendarEvent {
            start: Some(EventDateTime {
                date: Some("2024-01-02".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(format_event_start(&all_day, "UTC"), "2024-01-02 00:00");

        assert_eq!(format_event_start(&CalendarEvent::default(), "UTC"), "");
    }
}
