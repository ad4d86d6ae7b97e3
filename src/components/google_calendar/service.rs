use super::models::{CalendarEvent, ListQuery};
use crate::error::AppResult;
use async_trait::async_trait;

/// The operations the Calendar service offers on a calendar's events
#[async_trait]
pub trait CalendarService: Send + Sync {
    /// `events.list`
    async fn list_events(&self, calendar_id: &str, query: &ListQuery) -> AppResult<Vec<CalendarEvent>>;

    /// `events.get`
    async fn get_event(&self, calendar_id: &str, event_id: &str) -> AppResult<CalendarEvent>;

    /// `events.insert`. Returns the stored event with its id and `htmlLink`.
    async fn insert_event(&self, calendar_id: &str, event: &CalendarEvent) -> AppResult<CalendarEvent>;

    /// `events.patch`
    async fn patch_event(
        &self,
        calendar_id: &str,
        event_id: &str,
        event: &CalendarEvent,
    ) -> AppResult<CalendarEvent>;

    /// `events.delete`
    async fn delete_event(&self, calendar_id: &str, event_id: &str) -> AppResult<()>;
}
