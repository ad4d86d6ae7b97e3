mod client;
pub mod models;
mod service;
pub mod time;
pub mod token;

pub use client::GoogleCalendarClient;
pub use models::{CalendarEvent, EventDateTime, ListQuery, OrderBy};
pub use service::CalendarService;
pub use time::EventTime;
