use clap::Parser;
use googler::actions::{CalendarActions, SystemBrowser};
use googler::cli::{Action, Cli};
use googler::components::google_calendar::token::{parse_key, sign_assertion, CALENDAR_EVENTS_SCOPE};
use googler::components::GoogleCalendarClient;
use googler::config::Config;
use googler::error::Error;
use googler::render;
use std::path::PathBuf;

fn config() -> Config {
    Config {
        credential_key_file: PathBuf::new(),
        calendar_id: "primary".to_string(),
        timezone: "UTC".to_string(),
    }
}

/// Smoke test to verify that the production handler can be assembled
#[test]
fn test_actions_build_with_google_client() {
    let client = GoogleCalendarClient::new(&config()).unwrap();
    let _actions = CalendarActions::new(&config(), client, SystemBrowser);
}

/// Each flag maps to exactly one action
#[test]
fn test_flags_map_to_actions() {
    let cases = [
        ("--list", Action::List),
        ("--add", Action::Add),
        ("--delete", Action::Delete),
        ("--edit", Action::Edit),
    ];

    for (flag, expected) in cases {
        let cli = Cli::try_parse_from(["googler", flag]).unwrap();
        assert_eq!(cli.action(), Some(expected), "flag {}", flag);
    }
}

/// Help and version are handled by clap before any action runs
#[test]
fn test_help_and_version() {
    let err = Cli::try_parse_from(["googler", "--help"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    let help = err.to_string();
    for flag in ["--list", "--add", "--delete", "--edit"] {
        assert!(help.contains(flag), "help is missing {}", flag);
    }

    let err = Cli::try_parse_from(["googler", "--version"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
}

/// Without credentials, calls fail with an authentication error rather than panicking
#[tokio::test]
async fn test_missing_credentials_surface_as_remote_error() {
    use googler::components::CalendarService;

    let client = GoogleCalendarClient::new(&config()).unwrap();
    let result = client.get_event("primary", "abc123").await;

    assert!(matches!(result, Err(Error::Auth(_))));
}

/// A key that is not a PEM private key cannot sign the token request
#[test]
fn test_bad_private_key() {
    let key = parse_key(
        r#"{"client_email": "bot@project.iam.gserviceaccount.com", "private_key": "oops"}"#,
    )
    .unwrap();

    assert!(sign_assertion(&key, CALENDAR_EVENTS_SCOPE, 0).is_err());
}

/// The empty listing panel is the fixed box
#[test]
fn test_no_events_panel() {
    let panel = render::no_events_panel();

    assert_eq!(panel.lines().count(), 3);
    assert!(panel.contains("No Event. Take a Rest!"));
}
