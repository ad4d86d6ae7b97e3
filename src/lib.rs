#[macro_use]
extern crate rust_i18n;

pub mod actions;
pub mod cli;
pub mod components;
pub mod config;
pub mod error;
pub mod prompts;
pub mod render;

// Initialize i18n
i18n!("locales", fallback = "en");
