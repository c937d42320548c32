//! Command execution against a mock backend.

use pii_admin::cli::{Cli, Command, SettingsCommand};
use pii_admin::commands::execute;

use admin_client::{ApiClient, CredentialStore};

use common::RedactedToken;

use std::sync::Arc;
use std::time::SystemTime;

use clap::Parser;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer, token: Option<&str>) -> ApiClient {
    let store = Arc::new(CredentialStore::in_memory());
    if let Some(token) = token {
        store.set(RedactedToken::new(token)).unwrap();
    }
    ApiClient::new(&server.uri(), store).unwrap()
}

fn command(args: &[&str]) -> Command {
    Cli::try_parse_from(std::iter::once("pii-admin").chain(args.iter().copied()))
        .unwrap()
        .command
}

/// **VALUE**: Verifies the settings page degrades to an empty list when the
/// backend fails.
///
/// **WHY THIS MATTERS**: The settings screen must render even while the
/// backend is unhealthy; an empty list is shown instead of an error.
#[tokio::test]
async fn given_backend_error_when_listing_settings_then_empty_list() {
    // GIVEN: A backend returning 500 for the settings list
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/admin/pii-settings"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = client_for(&server, Some("jwt"));

    // WHEN: Running `settings list`
    let output = execute(
        &client,
        &Command::Settings {
            command: SettingsCommand::List,
        },
        false,
        SystemTime::now(),
    )
    .await
    .unwrap();

    // THEN: An empty list is printed
    assert_eq!(output, json!({ "settings": [], "total": 0 }));
}

#[tokio::test]
async fn given_expired_session_when_listing_settings_then_error_requires_login() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/admin/pii-settings"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = client_for(&server, Some("expired"));

    let list = command(&["settings", "list"]);
    let result = execute(&client, &list, false, SystemTime::now()).await;

    assert!(result.unwrap_err().requires_login());
    assert!(!client.credentials().is_logged_in());
}

/// **VALUE**: Verifies payloads are normalized unless `--raw` is given.
///
/// **BUG THIS CATCHES**: Would catch a missing `logs` list printing as
/// `null`, or `--raw` output being reshaped.
#[tokio::test]
async fn given_sparse_payload_when_listing_logs_then_view_fills_defaults() {
    // GIVEN: A backend omitting most fields
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/admin/logs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "page": 2 })))
        .mount(&server)
        .await;

    let client = client_for(&server, Some("jwt"));
    let logs = command(&["logs", "--page", "2"]);

    // WHEN: Rendering normalized and raw
    let normalized = execute(&client, &logs, false, SystemTime::now()).await.unwrap();
    let raw = execute(&client, &logs, true, SystemTime::now()).await.unwrap();

    // THEN: The view has every field, raw is untouched
    assert_eq!(normalized["page"], 2);
    assert_eq!(normalized["total"], 0);
    assert_eq!(normalized["logs"], json!([]));
    assert_eq!(raw, json!({ "page": 2 }));
}

/// **VALUE**: Verifies a log page with a `null` column still prints every record.
///
/// **BUG THIS CATCHES**: Would catch one bad field turning a non-empty result
/// into an empty page in the normalized output.
#[tokio::test]
async fn given_null_field_in_record_when_listing_logs_then_page_kept() {
    // GIVEN: A backend returning a record whose reason is null
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/admin/logs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total": 57,
            "page": 1,
            "page_size": 20,
            "logs": [{ "id": "a", "client_ip": "10.0.0.1", "reason": null }]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server, Some("jwt"));

    // WHEN: Rendering the normalized view
    let output = execute(&client, &command(&["logs"]), false, SystemTime::now())
        .await
        .unwrap();

    // THEN: The totals and the record survive
    assert_eq!(output["total"], 57);
    assert_eq!(output["logs"][0]["client_ip"], "10.0.0.1");
    assert_eq!(output["logs"][0]["reason"], "");
}

#[tokio::test]
async fn given_unexpected_payload_kind_when_rendering_then_printed_as_received() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/admin/statistics/overview"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!("maintenance")))
        .mount(&server)
        .await;

    let client = client_for(&server, Some("jwt"));
    let output = execute(&client, &command(&["overview"]), false, SystemTime::now())
        .await
        .unwrap();

    assert_eq!(output, json!("maintenance"));
}

#[tokio::test]
async fn given_by_ip_defaults_when_executed_then_size_twenty_requested() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/admin/statistics/by-ip"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "statistics": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Some("jwt"));
    execute(&client, &command(&["by-ip"]), false, SystemTime::now())
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), Some("size=20"));
}

#[tokio::test]
async fn given_credentials_when_login_command_then_session_stored() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/login"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "access_token": "fresh-jwt" })),
        )
        .mount(&server)
        .await;

    let client = client_for(&server, None);
    let login = command(&["login", "--username", "admin", "--password", "secret"]);

    let output = execute(&client, &login, false, SystemTime::now()).await.unwrap();

    assert_eq!(output, json!({ "logged_in": true, "username": "admin" }));
    assert_eq!(client.credentials().current().unwrap().as_str(), "fresh-jwt");
}
