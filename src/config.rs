use crate::error::{config_error, AppResult};
use dotenvy::dotenv;
use serde::Deserialize;
use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Default timezone when none is configured
pub const DEFAULT_TIMEZONE: &str = "UTC";

/// Default location of the optional configuration file
pub const DEFAULT_CONFIG_FILE: &str = "config/googler.toml";

/// Main configuration structure
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Path to the service account JSON key
    pub credential_key_file: PathBuf,
    /// Google Calendar ID to operate on
    pub calendar_id: String,
    /// Timezone attached to created and updated events
    pub timezone: String,
}

/// Values read from the TOML configuration file. Every key is optional.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    credential_key_file: Option<PathBuf>,
    calendar_id: Option<String>,
    timezone: Option<String>,
}

impl Config {
    /// Load configuration from `.env`, the config file and the environment
    pub fn load() -> AppResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        let path = env::var("GOOGLER_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        let file = match fs::read_to_string(&path) {
            Ok(content) => {
                debug!("Loading configuration file {}", path);
                Self::parse_file(&content)
                    .map_err(|e| config_error(&format!("Invalid config file {}: {}", path, e)))?
            }
            Err(e) if e.kind() == ErrorKind::NotFound => FileConfig::default(),
            Err(e) => return Err(e.into()),
        };

        let config = Self::merge(
            file,
            env::var("CREDENTIAL_KEY_FILE").ok(),
            env::var("CALENDAR_ID").ok(),
            env::var("TIMEZONE").ok(),
        );
        config.warn_missing();

        Ok(config)
    }

    fn parse_file(content: &str) -> AppResult<FileConfig> {
        Ok(toml::from_str::<FileConfig>(content)?)
    }

    /// Environment values take precedence over the file
    fn merge(
        file: FileConfig,
        credential_key_file: Option<String>,
        calendar_id: Option<String>,
        timezone: Option<String>,
    ) -> Self {
        Config {
            credential_key_file: credential_key_file
                .map(PathBuf::from)
                .or(file.credential_key_file)
                .unwrap_or_default(),
            calendar_id: calendar_id.or(file.calendar_id).unwrap_or_default(),
            timezone: timezone
                .or(file.timezone)
                .unwrap_or_else(|| String::from(DEFAULT_TIMEZONE)),
        }
    }

    // Missing values are left for the Calendar service to reject.
    fn warn_missing(&self) {
        if self.credential_key_file.as_os_str().is_empty() {
            warn!("CREDENTIAL_KEY_FILE is not set");
        }
        if self.calendar_id.is_empty() {
            warn!("CALENDAR_ID is not set");
        }
        if self.timezone.parse::<chrono_tz::Tz>().is_err() {
            warn!("TIMEZONE {} is not a known IANA timezone", self.timezone);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_overrides_file() {
        let file = Config::parse_file(
            r#"
            credential_key_file = "/etc/googler/key.json"
            calendar_id = "team@group.calendar.google.com"
            timezone = "Europe/Helsinki"
            "#,
        )
        .unwrap();

        let config = Config::merge(file, None, Some("me@example.com".to_string()), None);

        assert_eq!(config.credential_key_file, PathBuf::from("/etc/googler/key.json"));
        assert_eq!(config.calendar_id, "me@example.com");
        assert_eq!(config.timezone, "Europe/Helsinki");
    }

    #[test]
    fn test_missing_values_fall_back() {
        let config = Config::merge(FileConfig::default(), None, None, None);

        assert!(config.credential_key_file.as_os_str().is_empty());
        assert!(config.calendar_id.is_empty());
        assert_eq!(config.timezone, DEFAULT_TIMEZONE);
    }

    #[test]
    fn test_malformed_file_is_rejected() {
        assert!(Config::parse_file("calendar_id = [").is_err());
        assert!(Config::parse_file("calendar_id = 42").is_err());
    }
}
