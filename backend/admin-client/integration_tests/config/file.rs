use admin_client::config::ClientConfig;
use admin_client::error::ConfigError;

use std::time::Duration;

use tempfile::TempDir;

#[test]
fn given_missing_file_when_loaded_then_defaults() {
    let dir = TempDir::new().unwrap();

    let config = ClientConfig::load(dir.path()).unwrap();

    assert_eq!(config.version, 1);
    assert!(config.server.base_url.is_none());
    assert!(config.request_timeout().is_none());
}

/// **VALUE**: Verifies config survives a save/load cycle through the atomic write.
///
/// **BUG THIS CATCHES**: Would catch the temp file being left in place of
/// `config.json`, or fields silently dropped by serde attributes.
#[test]
fn given_saved_config_when_loaded_then_values_preserved() {
    // GIVEN: A config pointing at a staging backend
    let dir = TempDir::new().unwrap();
    let mut config = ClientConfig::default();
    config.server.base_url = Some("https://staging.example.com".to_string());
    config.server.request_timeout_secs = Some(15);

    // WHEN: Saving and loading it back
    config.save(dir.path()).unwrap();
    let loaded = ClientConfig::load(dir.path()).unwrap();

    // THEN: Values round-trip
    assert_eq!(
        loaded.server.base_url.as_deref(),
        Some("https://staging.example.com")
    );
    assert_eq!(loaded.request_timeout(), Some(Duration::from_secs(15)));
    assert!(!dir.path().join("config.json.tmp").exists());
}

#[test]
fn given_corrupt_file_when_loaded_then_parse_error() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("config.json"), "{ not json").unwrap();

    let result = ClientConfig::load(dir.path());

    assert!(matches!(result, Err(ConfigError::ParseError { .. })));
}

#[test]
fn given_non_http_base_url_when_saved_then_validation_error() {
    let dir = TempDir::new().unwrap();
    let mut config = ClientConfig::default();
    config.server.base_url = Some("ftp://backend".to_string());

    let result = config.save(dir.path());

    assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
    assert!(!dir.path().join("config.json").exists());
}

#[test]
fn given_partial_file_when_loaded_then_missing_sections_defaulted() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("config.json"),
        r#"{"server": {"base_url": "http://10.0.0.5:8000"}}"#,
    )
    .unwrap();

    let config = ClientConfig::load(dir.path()).unwrap();

    assert_eq!(config.version, 1);
    assert_eq!(
        config.server.base_url.as_deref(),
        Some("http://10.0.0.5:8000")
    );
    assert!(config.credentials.token_file.is_none());
}
