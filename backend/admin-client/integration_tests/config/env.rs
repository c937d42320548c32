use admin_client::config::env::{API_URL_ENV_KEY, FALLBACK_API_URL_ENV_KEY};
use admin_client::config::{ClientConfig, api_url_override};
use admin_client::{ApiClient, CredentialStore, DEFAULT_API_BASE_URL};

use std::sync::Arc;

use serial_test::serial;

fn clear_overrides() {
    unsafe {
        std::env::remove_var(API_URL_ENV_KEY);
        std::env::remove_var(FALLBACK_API_URL_ENV_KEY);
    }
}

#[test]
#[serial]
fn given_no_overrides_when_resolved_then_local_default() {
    clear_overrides();

    let base_url = ClientConfig::default().resolve_base_url().unwrap();

    assert_eq!(base_url, DEFAULT_API_BASE_URL);
    assert_eq!(base_url, "http://localhost:8000");
}

/// **VALUE**: Verifies the origin precedence: primary variable, fallback
/// variable, config file, built-in default.
///
/// **WHY THIS MATTERS**: Deployments point the dashboard at a backend through
/// the environment. A config file left over from development must not win.
#[test]
#[serial]
fn given_both_variables_when_resolved_then_primary_wins() {
    // GIVEN: Both overrides and a configured origin
    clear_overrides();
    unsafe {
        std::env::set_var(API_URL_ENV_KEY, "https://primary.example.com");
        std::env::set_var(FALLBACK_API_URL_ENV_KEY, "https://fallback.example.com");
    }
    let mut config = ClientConfig::default();
    config.server.base_url = Some("http://configured:9000".to_string());

    // WHEN: Resolving
    let with_primary = config.resolve_base_url().unwrap();
    unsafe {
        std::env::remove_var(API_URL_ENV_KEY);
    }
    let with_fallback = config.resolve_base_url().unwrap();
    clear_overrides();
    let from_file = config.resolve_base_url().unwrap();

    // THEN: Each layer applies in order
    assert_eq!(with_primary, "https://primary.example.com");
    assert_eq!(with_fallback, "https://fallback.example.com");
    assert_eq!(from_file, "http://configured:9000");
}

#[test]
#[serial]
fn given_empty_override_when_read_then_treated_as_unset() {
    clear_overrides();
    unsafe {
        std::env::set_var(API_URL_ENV_KEY, "");
    }

    let result = api_url_override().unwrap();
    clear_overrides();

    assert!(result.is_none());
}

#[test]
#[serial]
fn given_env_override_when_client_from_config_then_client_uses_override() {
    clear_overrides();
    unsafe {
        std::env::set_var(API_URL_ENV_KEY, "http://127.0.0.1:18000");
    }

    let client = ApiClient::from_config(
        &ClientConfig::default(),
        Arc::new(CredentialStore::in_memory()),
    );
    clear_overrides();

    assert_eq!(client.unwrap().base_url(), "http://127.0.0.1:18000");
}
