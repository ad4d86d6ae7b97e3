use miette::{Diagnostic, Result};
use thiserror::Error;

use crate::prompts::ValidationError;

/// Main error type for the application
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Configuration error: {0}")]
    #[diagnostic(
        code(googler::config),
        help("check CREDENTIAL_KEY_FILE, CALENDAR_ID and TIMEZONE")
    )]
    Config(String),

    #[error("Google Calendar API error: {0}")]
    #[diagnostic(code(googler::google_calendar))]
    GoogleCalendar(String),

    #[error("Authentication error: {0}")]
    #[diagnostic(code(googler::auth))]
    Auth(String),

    #[error("Prompt error: {0}")]
    #[diagnostic(code(googler::prompt))]
    Prompt(#[from] inquire::InquireError),

    #[error(transparent)]
    #[diagnostic(code(googler::validation))]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    #[diagnostic(code(googler::io))]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(googler::serialization))]
    Serialization(String),
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// Type alias for Result with our Error type
pub type AppResult<T> = Result<T, Error>;

/// Helper to create configuration errors
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

/// Helper to create Google Calendar errors
pub fn google_calendar_error(message: &str) -> Error {
    Error::GoogleCalendar(message.to_string())
}

/// Helper to create authentication errors
pub fn auth_error(message: &str) -> Error {
    Error::Auth(message.to_string())
}
