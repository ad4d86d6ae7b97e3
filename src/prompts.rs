//! Interactive question sequences for each action.
//!
//! Validation is kept apart from terminal I/O: every validator is a plain
//! function from the raw answer to a typed value, and the [`Prompter`] trait is
//! the only place that talks to the terminal.

use crate::components::google_calendar::EventTime;
use crate::error::AppResult;
use inquire::validator::Validation;
use inquire::CustomUserError;
use inquire::Text;
use thiserror::Error;

/// Hint shown under date-time questions
pub const DATE_TIME_HINT: &str = "YYYY-MM-DD hh:mm";

/// An answer that failed validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("input value is not valid.")]
pub struct ValidationError {
    pub input: String,
}

impl ValidationError {
    fn new(input: &str) -> Self {
        Self {
            input: input.to_string(),
        }
    }
}

/// A required date-time
pub fn validate_date_time(input: &str) -> Result<EventTime, ValidationError> {
    EventTime::parse(input).ok_or_else(|| ValidationError::new(input))
}

/// A date-time that may be left empty
pub fn validate_optional_date_time(input: &str) -> Result<Option<EventTime>, ValidationError> {
    if input.trim().is_empty() {
        return Ok(None);
    }
    validate_date_time(input).map(Some)
}

/// Largest day count accepted by the list action
pub const MAX_DAYS: u32 = 1_000_000;

/// A whole number of days between 0 and [`MAX_DAYS`]
pub fn validate_days(input: &str) -> Result<u32, ValidationError> {
    input
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|days| *days <= MAX_DAYS)
        .ok_or_else(|| ValidationError::new(input))
}

/// A non-empty event id
pub fn validate_event_id(input: &str) -> Result<String, ValidationError> {
    let id = input.trim();
    if id.is_empty() {
        return Err(ValidationError::new(input));
    }
    Ok(id.to_string())
}

/// Validator attached to a question
pub type Validator = fn(&str) -> Result<(), ValidationError>;

/// A single question asked on the terminal
#[derive(Clone)]
pub struct Question {
    pub message: String,
    pub hint: Option<&'static str>,
    pub validator: Option<Validator>,
}

impl Question {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            hint: None,
            validator: None,
        }
    }

    pub fn with_hint(mut self, hint: &'static str) -> Self {
        self.hint = Some(hint);
        self
    }

    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = Some(validator);
        self
    }
}

/// Source of answers to questions
pub trait Prompter {
    /// Ask a question until the answer passes its validator
    fn ask(&mut self, question: &Question) -> AppResult<String>;
}

/// Prompter backed by the terminal
#[derive(Debug, Default, Clone, Copy)]
pub struct InquirePrompter;

impl Prompter for InquirePrompter {
    fn ask(&mut self, question: &Question) -> AppResult<String> {
        let mut prompt = Text::new(&question.message);
        if let Some(hint) = question.hint {
            prompt = prompt.with_placeholder(hint);
        }
        if let Some(validator) = question.validator {
            prompt = prompt.with_validator(
                move |input: &str| -> Result<Validation, CustomUserError> {
                    Ok(match validator(input) {
                        Ok(()) => Validation::Valid,
                        Err(e) => Validation::Invalid(e.to_string().into()),
                    })
                },
            );
        }
        Ok(prompt.prompt()?)
    }
}

/// Answers of the add form
#[derive(Debug, Clone, PartialEq)]
pub struct NewEvent {
    pub summary: String,
    pub start: EventTime,
    pub end: EventTime,
}

/// Answers of the edit form. `None` keeps the current value.
#[derive(Debug, Clone, PartialEq)]
pub struct EventEdit {
    pub event_id: String,
    pub summary: Option<String>,
    pub start: Option<EventTime>,
    pub end: Option<EventTime>,
}

fn required_date_time(input: &str) -> Result<(), ValidationError> {
    validate_date_time(input).map(|_| ())
}

fn optional_date_time(input: &str) -> Result<(), ValidationError> {
    validate_optional_date_time(input).map(|_| ())
}

fn day_count(input: &str) -> Result<(), ValidationError> {
    validate_days(input).map(|_| ())
}

fn required_event_id(input: &str) -> Result<(), ValidationError> {
    validate_event_id(input).map(|_| ())
}

fn non_empty(answer: String) -> Option<String> {
    if answer.trim().is_empty() {
        None
    } else {
        Some(answer)
    }
}

/// Ask for the number of days to list
pub fn ask_days(prompter: &mut impl Prompter) -> AppResult<u32> {
    let answer = prompter.ask(&Question::new(t!("prompt_days")).with_validator(day_count))?;
    Ok(validate_days(&answer)?)
}

/// Ask for a new event
pub fn ask_new_event(prompter: &mut impl Prompter) -> AppResult<NewEvent> {
    let summary = prompter.ask(&Question::new(t!("prompt_summary")))?;
    let start = prompter.ask(
        &Question::new(t!("prompt_start"))
            .with_hint(DATE_TIME_HINT)
            .with_validator(required_date_time),
    )?;
    let end = prompter.ask(
        &Question::new(t!("prompt_end"))
            .with_hint(DATE_TIME_HINT)
            .with_validator(required_date_time),
    )?;

    Ok(NewEvent {
        summary,
        start: validate_date_time(&start)?,
        end: validate_date_time(&end)?,
    })
}

/// Ask for an event id and the fields to change
pub fn ask_event_edit(prompter: &mut impl Prompter) -> AppResult<EventEdit> {
    let event_id =
        prompter.ask(&Question::new(t!("prompt_edit_id")).with_validator(required_event_id))?;
    let summary = prompter.ask(&Question::new(t!("prompt_edit_summary")))?;
    let start = prompter.ask(
        &Question::new(t!("prompt_edit_start"))
            .with_hint(DATE_TIME_HINT)
            .with_validator(optional_date_time),
    )?;
    let end = prompter.ask(
        &Question::new(t!("prompt_edit_end"))
            .with_hint(DATE_TIME_HINT)
            .with_validator(optional_date_time),
    )?;

    Ok(EventEdit {
        event_id: validate_event_id(&event_id)?,
        summary: non_empty(summary),
        start: validate_optional_date_time(&start)?,
        end: validate_optional_date_time(&end)?,
    })
}

/// Ask for the id of the event to delete
pub fn ask_delete_id(prompter: &mut impl Prompter) -> AppResult<String> {
    let answer =
        prompter.ask(&Question::new(t!("prompt_delete_id")).with_validator(required_event_id))?;
    Ok(validate_event_id(&answer)?)
}
