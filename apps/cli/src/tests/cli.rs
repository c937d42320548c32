// Unit tests for argument parsing and filter conversion

use crate::cli::{Cli, Command, DateArgs, SettingsCommand, setting_update};

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use clap::Parser;
use log::LevelFilter;

/// 2025-01-02T00:00:00Z
fn fixed_now() -> SystemTime {
    UNIX_EPOCH + Duration::from_secs(1_735_776_000)
}

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("pii-admin").chain(args.iter().copied()))
        .expect("arguments should parse")
}

/// **VALUE**: Verifies log flags map one-to-one onto the typed filter.
///
/// **BUG THIS CATCHES**: Would catch a flag wired to the wrong field, or a
/// default sneaking in for flags that were not given.
#[test]
fn given_log_flags_when_parsed_then_filter_has_only_given_fields() {
    // GIVEN: The dashboard's recent-activity arguments
    let cli = parse(&[
        "logs",
        "--start-date",
        "2025-01-01T00:00:00Z",
        "--page-size",
        "10",
        "--sort",
        "timestamp:desc",
    ]);

    // WHEN: Converting to a filter
    let Command::Logs(args) = cli.command else {
        panic!("Expected logs command");
    };
    let filter = args.to_filter(fixed_now()).unwrap();

    // THEN: Only the supplied fields are set
    assert_eq!(filter.start_date.as_deref(), Some("2025-01-01T00:00:00Z"));
    assert_eq!(filter.page_size, Some(10));
    assert_eq!(filter.sort.as_deref(), Some("timestamp:desc"));
    assert_eq!(filter.page, None);
    assert_eq!(filter.has_pii, None);
    assert_eq!(filter.end_date, None);
}

/// **VALUE**: Verifies `--since` becomes an absolute RFC 3339 lower bound.
///
/// **WHY THIS MATTERS**: The backend only understands absolute timestamps.
#[test]
fn given_since_when_resolved_then_start_date_is_now_minus_duration() {
    let args = DateArgs {
        since: Some(Duration::from_secs(24 * 60 * 60)),
        ..DateArgs::default()
    };

    let range = args.to_range(fixed_now()).unwrap();

    assert_eq!(range.start_date.as_deref(), Some("2025-01-01T00:00:00Z"));
    assert_eq!(range.end_date, None);
}

#[test]
fn given_since_and_start_date_when_parsed_then_rejected() {
    let result = Cli::try_parse_from([
        "pii-admin",
        "overview",
        "--since",
        "1day",
        "--start-date",
        "2025-01-01",
    ]);

    assert!(result.is_err());
}

#[test]
fn given_since_before_epoch_when_resolved_then_cli_error() {
    let args = DateArgs {
        since: Some(Duration::from_secs(10)),
        ..DateArgs::default()
    };

    assert!(args.to_range(UNIX_EPOCH).is_err());
}

#[test]
fn given_no_flags_when_by_ip_and_timeline_parsed_then_dashboard_defaults() {
    let Command::ByIp(by_ip) = parse(&["by-ip"]).command else {
        panic!("Expected by-ip command");
    };
    let Command::Timeline(timeline) = parse(&["timeline"]).command else {
        panic!("Expected timeline command");
    };

    assert_eq!(by_ip.to_filter(fixed_now()).unwrap().size, Some(20));
    assert_eq!(
        timeline.to_filter(fixed_now()).unwrap().interval.as_deref(),
        Some("1h")
    );
}

#[test]
fn given_settings_update_when_parsed_then_partial_fields_kept() {
    let cli = parse(&["settings", "update", "EMAIL", "--enabled", "false"]);

    let Command::Settings {
        command:
            SettingsCommand::Update {
                entity_type,
                enabled,
                threshold,
            },
    } = cli.command
    else {
        panic!("Expected settings update command");
    };

    assert_eq!(entity_type, "EMAIL");
    let update = setting_update(enabled, threshold).unwrap();
    assert_eq!(update.enabled, Some(false));
    assert_eq!(update.threshold, None);
}

/// **VALUE**: Verifies an update with no fields is refused before any request.
///
/// **BUG THIS CATCHES**: Would catch a no-op PATCH being sent, which the
/// backend accepts silently and leaves the admin thinking something changed.
#[test]
fn given_no_update_fields_when_building_update_then_error() {
    assert!(setting_update(None, None).is_err());
}

#[test]
fn given_global_flags_after_subcommand_when_parsed_then_applied() {
    let cli = parse(&["whoami", "--ephemeral", "-vv", "--api-url", "http://backend:8000"]);

    assert!(cli.ephemeral);
    assert_eq!(cli.log_level(), LevelFilter::Debug);
    assert_eq!(cli.api_url.as_deref(), Some("http://backend:8000"));
}

#[test]
fn given_no_verbosity_when_parsed_then_warnings_only() {
    assert_eq!(parse(&["logout"]).log_level(), LevelFilter::Warn);
}
