use crate::cli::Action;
use crate::components::google_calendar::time::list_window;
use crate::components::google_calendar::{
    CalendarEvent, CalendarService, EventDateTime, EventTime, ListQuery, OrderBy,
};
use crate::config::Config;
use crate::error::{AppResult, Error};
use crate::prompts::{self, EventEdit, NewEvent, Prompter, ValidationError};
use crate::render;
use chrono::{DateTime, Utc};
use std::io::Write;
use tracing::{error, info, warn};

/// Opens links outside the terminal
pub trait LinkOpener {
    fn open(&self, link: &str) -> AppResult<()>;
}

/// Opens links in the user's default browser
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemBrowser;

impl LinkOpener for SystemBrowser {
    fn open(&self, link: &str) -> AppResult<()> {
        webbrowser::open(link)?;
        Ok(())
    }
}

/// Runs the list, add, edit and delete actions against one calendar
pub struct CalendarActions<S, B> {
    service: S,
    browser: B,
    calendar_id: String,
    timezone: String,
}

impl<S: CalendarService, B: LinkOpener> CalendarActions<S, B> {
    pub fn new(config: &Config, service: S, browser: B) -> Self {
        Self {
            service,
            browser,
            calendar_id: config.calendar_id.clone(),
            timezone: config.timezone.clone(),
        }
    }

    /// Ask the questions of `action`, then perform it
    pub async fn run<P: Prompter, W: Write>(
        &self,
        action: Action,
        prompter: &mut P,
        out: &mut W,
    ) -> AppResult<()> {
        info!("Running {:?}", action);
        match action {
            Action::List => {
                let days = prompts::ask_days(prompter)?;
                self.list_events(days, Utc::now(), out).await
            }
            Action::Add => {
                let new_event = prompts::ask_new_event(prompter)?;
                self.add_event(&new_event, out).await
            }
            Action::Delete => {
                let event_id = prompts::ask_delete_id(prompter)?;
                self.delete_event(&event_id, out).await
            }
            Action::Edit => {
                let edit = prompts::ask_event_edit(prompter)?;
                self.edit_event(&edit, out).await
            }
        }
    }

    /// List events starting within `days` days of `now`
    pub async fn list_events<W: Write>(&self, days: u32, now: DateTime<Utc>, out: &mut W) -> AppResult<()> {
        let Some((time_min, time_max)) = list_window(now, days) else {
            return Err(ValidationError {
                input: days.to_string(),
            }
            .into());
        };
        let query = ListQuery {
            time_min,
            time_max,
            single_events: true,
            order_by: OrderBy::StartTime,
        };

        let events = match self.service.list_events(&self.calendar_id, &query).await {
            Ok(events) => events,
            Err(e) => return report_service_error(out, &e),
        };

        if events.is_empty() {
            writeln!(out, "{}", render::no_events_panel())?;
            return Ok(());
        }

        let count = events.len().to_string();
        let days = days.to_string();
        writeln!(out, "\n{}\n", t!("events_found", count = count, days = days))?;
        writeln!(out, "{}", render::event_table(&events, &self.timezone))?;
        Ok(())
    }

    /// Event body sent to the Calendar API for a new event
    pub fn new_event_payload(&self, new_event: &NewEvent) -> CalendarEvent {
        CalendarEvent {
            summary: Some(new_event.summary.clone()),
            start: Some(EventDateTime::timed(new_event.start.to_api_string(), &self.timezone)),
            end: Some(EventDateTime::timed(new_event.end.to_api_string(), &self.timezone)),
            ..Default::default()
        }
    }

    /// Create an event and open it in the browser
    pub async fn add_event<W: Write>(&self, new_event: &NewEvent, out: &mut W) -> AppResult<()> {
        let payload = self.new_event_payload(new_event);
        let created = match self.service.insert_event(&self.calendar_id, &payload).await {
            Ok(created) => created,
            Err(e) => return report_service_error(out, &e),
        };

        writeln!(
            out,
            "\n{}\n",
            t!("event_created", summary = created.summary.as_deref().unwrap_or_default())
        )?;

        if let Some(link) = created.html_link.as_deref() {
            if let Err(e) = self.browser.open(link) {
                warn!("Failed to open {}: {}", link, e);
                writeln!(out, "{}", t!("browser_error", link = link, error = e.to_string()))?;
            }
        }
        Ok(())
    }

    /// Fetch an event, apply the edit and patch it back
    pub async fn edit_event<W: Write>(&self, edit: &EventEdit, out: &mut W) -> AppResult<()> {
        let mut event = match self.service.get_event(&self.calendar_id, &edit.event_id).await {
            Ok(event) => event,
            Err(e) => return report_service_error(out, &e),
        };

        apply_edit(&mut event, edit, &self.timezone);

        let updated = match self
            .service
            .patch_event(&self.calendar_id, &edit.event_id, &event)
            .await
        {
            Ok(updated) => updated,
            Err(e) => return report_service_error(out, &e),
        };

        writeln!(
            out,
            "\n{}\n",
            t!("event_updated", summary = updated.summary.as_deref().unwrap_or_default())
        )?;
        Ok(())
    }

    /// Delete an event by id
    pub async fn delete_event<W: Write>(&self, event_id: &str, out: &mut W) -> AppResult<()> {
        if let Err(e) = self.service.delete_event(&self.calendar_id, event_id).await {
            return report_service_error(out, &e);
        }

        writeln!(out, "\n{}\n", t!("event_deleted", id = event_id))?;
        Ok(())
    }
}

/// Apply the first supplied field of `edit` to `event`.
///
/// Only one of summary, start and end changes per edit, checked in that order.
pub fn apply_edit(event: &mut CalendarEvent, edit: &EventEdit, timezone: &str) {
    if let Some(summary) = &edit.summary {
        event.summary = Some(summary.clone());
    } else if let Some(start) = &edit.start {
        set_time(&mut event.start, start, timezone);
    } else if let Some(end) = &edit.end {
        set_time(&mut event.end, end, timezone);
    }
}

// An all-day value becomes a timed one, keeping its timezone if it had one.
fn set_time(slot: &mut Option<EventDateTime>, time: &EventTime, timezone: &str) {
    let value = slot.get_or_insert_with(EventDateTime::default);
    value.date_time = Some(time.to_api_string());
    value.date = None;
    if value.time_zone.is_none() {
        value.time_zone = Some(timezone.to_string());
    }
}

/// Print a Calendar service failure. The action ends here without an error.
fn report_service_error<W: Write>(out: &mut W, err: &Error) -> AppResult<()> {
    error!("Calendar service call failed: {}", err);
    writeln!(out, "\n{}\n", t!("service_error", error = err.to_string()))?;
    Ok(())
}
