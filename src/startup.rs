use googler::actions::{CalendarActions, SystemBrowser};
use googler::components::GoogleCalendarClient;
use googler::config::Config;
use googler::error::Error;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize logging with environment-based configuration.
///
/// Logs go to stderr and default to warnings so they stay out of the prompts.
pub fn init_logging() -> miette::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::Config(format!("Failed to set up logging: {}", e)))?;

    Ok(())
}

/// Load the application config
pub fn load_config() -> miette::Result<Config> {
    match Config::load() {
        Ok(config) => {
            info!("Using calendar {}", config.calendar_id);
            Ok(config)
        }
        Err(e) => {
            error!("Failed to load configuration: {:?}", e);
            Err(e.into())
        }
    }
}

/// Build the action handler backed by the Calendar API
pub fn build_actions(
    config: &Config,
) -> miette::Result<CalendarActions<GoogleCalendarClient, SystemBrowser>> {
    let client = GoogleCalendarClient::new(config)?;
    Ok(CalendarActions::new(config, client, SystemBrowser))
}
