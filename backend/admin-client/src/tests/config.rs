// Unit tests for configuration loading and origin selection

use crate::DEFAULT_API_BASE_URL;
use crate::config::{ClientConfig, select_base_url};
use crate::error::ConfigError;

use std::time::Duration;

#[test]
fn given_default_base_url_constant_then_points_at_local_backend() {
    assert_eq!(DEFAULT_API_BASE_URL, "http://localhost:8000");
}

/// **VALUE**: Verifies origin precedence: environment, then config file, then default.
///
/// **WHY THIS MATTERS**: Deployments point the client at staging or production
/// through the environment; that must win over a stale config file.
#[test]
fn given_sources_when_selecting_base_url_then_environment_wins() {
    assert_eq!(
        select_base_url(Some("https://env.example".into()), Some("https://file.example")),
        "https://env.example"
    );
    assert_eq!(
        select_base_url(None, Some("https://file.example")),
        "https://file.example"
    );
    assert_eq!(select_base_url(None, None), DEFAULT_API_BASE_URL);
}

#[test]
fn given_default_config_when_validated_then_ok() {
    let config = ClientConfig::default();

    assert!(config.validate().is_ok());
    assert_eq!(config.request_timeout(), None);
}

#[test]
fn given_future_version_when_validated_then_validation_error() {
    let config = ClientConfig {
        version: 99,
        ..Default::default()
    };

    assert!(matches!(
        config.validate(),
        Err(ConfigError::ValidationError { .. })
    ));
}

#[test]
fn given_base_url_without_scheme_when_validated_then_validation_error() {
    let mut config = ClientConfig::default();
    config.server.base_url = Some(String::from("localhost:8000"));

    assert!(matches!(
        config.validate(),
        Err(ConfigError::ValidationError { .. })
    ));
}

#[test]
fn given_timeout_when_configured_then_converted_to_duration() {
    let mut config = ClientConfig::default();
    config.server.request_timeout_secs = Some(15);

    assert_eq!(config.request_timeout(), Some(Duration::from_secs(15)));

    config.server.request_timeout_secs = Some(0);
    assert!(config.validate().is_err());
}

/// **VALUE**: Verifies partial config files fill in defaults.
///
/// **BUG THIS CATCHES**: Would catch a missing `#[serde(default)]`, which
/// would make `{}` an invalid config.
#[test]
fn given_partial_json_when_parsed_then_defaults_filled() {
    let config: ClientConfig = serde_json::from_str(r#"{"server":{"base_url":"https://x"}}"#).unwrap();

    assert_eq!(config.version, 1);
    assert_eq!(config.server.base_url.as_deref(), Some("https://x"));
    assert!(config.credentials.token_file.is_none());
}
