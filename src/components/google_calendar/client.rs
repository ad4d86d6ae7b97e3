use super::models::{ApiErrorBody, CalendarEvent, EventList, ListQuery};
use super::service::CalendarService;
use super::token::TokenManager;
use crate::config::Config;
use crate::error::{google_calendar_error, AppResult};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use tracing::{debug, info};
use url::Url;

const API_BASE: &str = "https://www.googleapis.com/calendar/v3/";

/// Calendar API v3 client authenticated with a service account
#[derive(Clone)]
pub struct GoogleCalendarClient {
    token_manager: TokenManager,
    client: Client,
    base: Url,
}

impl GoogleCalendarClient {
    /// Create a client for the credentials named in the config
    pub fn new(config: &Config) -> AppResult<Self> {
        let client = Client::new();
        let base = Url::parse(API_BASE)
            .map_err(|e| google_calendar_error(&format!("Failed to parse URL: {}", e)))?;

        Ok(Self {
            token_manager: TokenManager::new(config.credential_key_file.clone(), client.clone()),
            client,
            base,
        })
    }

    /// URL of `calendars/{calendar_id}/events[/{event_id}]` with each segment escaped
    pub fn events_url(&self, calendar_id: &str, event_id: Option<&str>) -> AppResult<Url> {
        let mut url = self.base.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| google_calendar_error("Calendar API URL cannot be a base"))?;
            segments.pop_if_empty().extend(["calendars", calendar_id, "events"]);
            if let Some(event_id) = event_id {
                if event_id.is_empty() {
                    return Err(google_calendar_error("Missing required parameter: eventId"));
                }
                segments.push(event_id);
            }
        }
        Ok(url)
    }

    async fn request(&self, method: Method, url: Url) -> AppResult<RequestBuilder> {
        let access_token = self.token_manager.get_token().await?;
        debug!("{} {}", method, url);
        Ok(self.client.request(method, url).bearer_auth(access_token))
    }

    async fn send(&self, request: RequestBuilder, action: &str) -> AppResult<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| google_calendar_error(&format!("Failed to {}: {}", action, e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error response".to_string());
            return Err(google_calendar_error(&format!(
                "Failed to {}: {}",
                action,
                describe_error(status.as_u16(), &error_body)
            )));
        }

        Ok(response)
    }

    async fn parse_event(response: Response, action: &str) -> AppResult<CalendarEvent> {
        response.json().await.map_err(|e| {
            google_calendar_error(&format!("Failed to parse {} response: {}", action, e))
        })
    }
}

/// Extract the message from a Google error body, falling back to the raw body
pub fn describe_error(status: u16, body: &str) -> String {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) if !parsed.error.message.is_empty() => {
            let code = if parsed.error.code == 0 { status } else { parsed.error.code };
            format!("HTTP {} - {}", code, parsed.error.message)
        }
        _ => format!("HTTP {} - {}", status, body.trim()),
    }
}

#[async_trait]
impl CalendarService for GoogleCalendarClient {
    async fn list_events(&self, calendar_id: &str, query: &ListQuery) -> AppResult<Vec<CalendarEvent>> {
        let mut url = self.events_url(calendar_id, None)?;
        for (key, value) in query.to_pairs() {
            url.query_pairs_mut().append_pair(key, &value);
        }

        let request = self.request(Method::GET, url).await?;
        let response = self.send(request, "fetch events").await?;
        let list: EventList = response.json().await.map_err(|e| {
            google_calendar_error(&format!("Failed to parse events response: {}", e))
        })?;

        info!("Fetched {} events", list.items.len());
        Ok(list.items)
    }

    async fn get_event(&self, calendar_id: &str, event_id: &str) -> AppResult<CalendarEvent> {
        let url = self.events_url(calendar_id, Some(event_id))?;
        let request = self.request(Method::GET, url).await?;
        let response = self.send(request, "fetch event").await?;
        Self::parse_event(response, "event").await
    }

    async fn insert_event(&self, calendar_id: &str, event: &CalendarEvent) -> AppResult<CalendarEvent> {
        let url = self.events_url(calendar_id, None)?;
        let request = self.request(Method::POST, url).await?.json(event);
        let response = self.send(request, "create event").await?;
        let created = Self::parse_event(response, "insert").await?;

        info!("Created event {}", created.id);
        Ok(created)
    }

    async fn patch_event(
        &self,
        calendar_id: &str,
        event_id: &str,
        event: &CalendarEvent,
    ) -> AppResult<CalendarEvent> {
        let url = self.events_url(calendar_id, Some(event_id))?;
        let request = self.request(Method::PATCH, url).await?.json(event);
        let response = self.send(request, "update event").await?;
        let updated = Self::parse_event(response, "patch").await?;

        info!("Updated event {}", event_id);
        Ok(updated)
    }

    async fn delete_event(&self, calendar_id: &str, event_id: &str) -> AppResult<()> {
        let url = self.events_url(calendar_id, Some(event_id))?;
        let request = self.request(Method::DELETE, url).await?;
        self.send(request, "delete event").await?;

        info!("Deleted event {}", event_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn client() -> GoogleCalendarClient {
        GoogleCalendarClient::new(&Config {
            credential_key_file: PathBuf::new(),
            calendar_id: String::new(),
            timezone: "UTC".to_string(),
        })
        .unwrap()
    }

    #[test]
    fn test_events_url_escapes_calendar_id() {
        let url = client()
            .events_url("team#holidays@group.calendar.google.com", None)
            .unwrap();

        assert_eq!(
            url.as_str(),
            "https://www.googleapis.com/calendar/v3/calendars/team%23holidays@group.calendar.google.com/events"
        );
    }

    #[test]
    fn test_events_url_with_event_id() {
        let url = client().events_url("primary", Some("abc123")).unwrap();

        assert_eq!(
            url.as_str(),
            "https://www.googleapis.com/calendar/v3/calendars/primary/events/abc123"
        );
    }

    #[test]
    fn test_events_url_rejects_empty_event_id() {
        let result = client().events_url("primary", Some(""));

        assert!(matches!(result, Err(crate::error::Error::GoogleCalendar(_))));
    }

    #[test]
    fn test_describe_error() {
        let body = r#"{"error": {"code": 404, "message": "Not Found", "errors": []}}"#;
        assert_eq!(describe_error(404, body), "HTTP 404 - Not Found");

        assert_eq!(describe_error(502, "Bad Gateway\n"), "HTTP 502 - Bad Gateway");
    }

    #[tokio::test]
    async fn test_missing_credentials_fail_before_request() {
        let result = client().delete_event("primary", "abc123").await;

        assert!(matches!(result, Err(crate::error::Error::Auth(_))));
    }
}
