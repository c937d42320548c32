// Unit tests for request construction (no network)

use crate::api_client::{ApiClient, RequestOptions};
use crate::credentials::{CredentialStore, MemoryTokenPersistence};
use crate::endpoints::Endpoint;
use crate::query::{LogFilter, QueryFilter};

use common::RedactedToken;

use std::sync::Arc;

use reqwest::Method;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};

const BASE_URL: &str = "http://localhost:8000";

fn client_with_token(token: Option<&str>) -> ApiClient {
    let store = Arc::new(CredentialStore::new(Box::new(
        MemoryTokenPersistence::default(),
    )));
    if let Some(token) = token {
        store.set(RedactedToken::new(token)).unwrap();
    }
    ApiClient::new(BASE_URL, store).unwrap()
}

/// **VALUE**: Verifies the stored token is attached as a bearer header.
///
/// **WHY THIS MATTERS**: Every admin endpoint requires authentication. If the
/// header is missing, every page shows empty data after login.
///
/// **BUG THIS CATCHES**: Would catch the injection being skipped or the
/// scheme being formatted wrongly.
#[test]
fn given_stored_token_when_building_request_then_bearer_header_injected() {
    // GIVEN: A client whose store holds token T
    let client = client_with_token(Some("T"));

    // WHEN: Building an ordinary request
    let request = client
        .build_request(&Endpoint::PiiSettings.path(), RequestOptions::default())
        .unwrap();

    // THEN: Authorization carries the token
    assert_eq!(request.headers()[AUTHORIZATION], "Bearer T");
    assert!(request.headers()[AUTHORIZATION].is_sensitive());
}

#[test]
fn given_no_token_when_building_request_then_no_authorization_header() {
    let client = client_with_token(None);

    let request = client
        .build_request(&Endpoint::PiiSettings.path(), RequestOptions::default())
        .unwrap();

    assert!(request.headers().get(AUTHORIZATION).is_none());
}

/// **VALUE**: Verifies a caller-supplied Authorization header is never overwritten.
///
/// **BUG THIS CATCHES**: Would catch unconditional injection, which would make
/// it impossible to call the API as a different principal.
#[test]
fn given_caller_authorization_when_building_request_then_caller_value_kept() {
    let client = client_with_token(Some("stored"));

    let options = RequestOptions::default().with_header("authorization", "Bearer explicit");
    let request = client
        .build_request(&Endpoint::CurrentUser.path(), options)
        .unwrap();

    let values: Vec<_> = request.headers().get_all(AUTHORIZATION).iter().collect();
    assert_eq!(values.len(), 1);
    assert_eq!(values[0], "Bearer explicit");
}

#[test]
fn given_anonymous_options_when_building_request_then_token_not_injected() {
    let client = client_with_token(Some("stored"));

    let request = client
        .build_request(&Endpoint::Login.path(), RequestOptions::default().anonymous())
        .unwrap();

    assert!(request.headers().get(AUTHORIZATION).is_none());
}

/// **VALUE**: Verifies the JSON content type is the default and callers can override it.
#[test]
fn given_default_and_override_when_building_request_then_content_type_resolved() {
    let client = client_with_token(None);

    let default_request = client
        .build_request(&Endpoint::Logs.path(), RequestOptions::default())
        .unwrap();
    let form_request = client
        .build_request(
            &Endpoint::Login.path(),
            RequestOptions::new(Method::POST)
                .with_header("Content-Type", "application/x-www-form-urlencoded"),
        )
        .unwrap();

    assert_eq!(default_request.method(), Method::GET);
    assert_eq!(default_request.headers()[CONTENT_TYPE], "application/json");
    assert_eq!(
        form_request.headers()[CONTENT_TYPE],
        "application/x-www-form-urlencoded"
    );
    assert_eq!(form_request.headers().get_all(CONTENT_TYPE).iter().count(), 1);
}

/// **VALUE**: Verifies the full URL for the dashboard's recent-logs query.
///
/// **WHY THIS MATTERS**: Parsing the endpoint into a `Url` must not decode or
/// re-encode the already-encoded query.
#[test]
fn given_recent_logs_filter_when_building_request_then_url_is_exact() {
    let client = client_with_token(None);
    let filter = LogFilter::default()
        .with_date_range("2025-01-01T00:00:00Z", "2025-01-02T00:00:00Z")
        .with_page_size(10)
        .with_sort("timestamp:desc");

    let request = client
        .build_request(
            &Endpoint::Logs.with_query(&filter.to_query_string()),
            RequestOptions::default(),
        )
        .unwrap();

    assert_eq!(
        request.url().as_str(),
        "http://localhost:8000/api/v1/admin/logs?start_date=2025-01-01T00%3A00%3A00Z&end_date=2025-01-02T00%3A00%3A00Z&page_size=10&sort=timestamp%3Adesc"
    );
}

#[test]
fn given_body_when_building_request_then_body_bytes_attached() {
    let client = client_with_token(None);

    let request = client
        .build_request(
            &Endpoint::PiiSetting("email").path(),
            RequestOptions::new(Method::PATCH).with_body(r#"{"enabled":false}"#),
        )
        .unwrap();

    assert_eq!(request.method(), Method::PATCH);
    assert_eq!(
        request.body().and_then(|b| b.as_bytes()),
        Some(br#"{"enabled":false}"#.as_slice())
    );
}

#[test]
fn given_invalid_header_name_when_building_request_then_invalid_header_error() {
    let client = client_with_token(None);

    let result = client.build_request(
        &Endpoint::Logs.path(),
        RequestOptions::default().with_header("bad header", "x"),
    );

    assert!(matches!(
        result,
        Err(crate::error::ApiClientError::InvalidHeader { .. })
    ));
}

/// **VALUE**: Verifies request bodies never show up in Debug output.
///
/// **BUG THIS CATCHES**: Would catch a derived Debug on `RequestOptions`
/// leaking the login password into debug logs.
#[test]
fn given_login_body_when_debug_formatted_then_password_hidden() {
    let options = RequestOptions::new(Method::POST).with_body("username=admin&password=hunter2");

    let debug = format!("{:?}", options);

    assert!(!debug.contains("hunter2"));
    assert!(debug.contains("body_len"));
}

#[test]
fn given_invalid_base_url_when_creating_client_then_error() {
    let store = Arc::new(CredentialStore::in_memory());

    let result = ApiClient::new("localhost without scheme", store);

    assert!(result.is_err());
}
