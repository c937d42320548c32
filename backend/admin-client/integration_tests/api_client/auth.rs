use crate::helpers::{TEST_TOKEN, client_for, received};

use admin_client::error::ApiClientError;

use serde_json::json;
use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// **VALUE**: Verifies a successful login stores the issued token.
///
/// **WHY THIS MATTERS**: Every other call depends on the token captured here.
///
/// **BUG THIS CATCHES**: Would catch:
/// - Sending JSON instead of the form encoding the backend's OAuth2 form expects
/// - Reading the wrong response field
/// - Forgetting to persist the token
#[tokio::test]
async fn given_valid_credentials_when_login_then_token_stored_and_persisted() {
    // GIVEN: A backend issuing a token for admin/secret
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/login"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string("username=admin&password=s%3Acret+pw"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "issued-jwt",
            "token_type": "bearer"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let test = client_for(&server, None);

    // WHEN: Logging in
    test.client.login("admin", "s:cret pw").await.unwrap();

    // THEN: The token is current and persisted
    assert_eq!(test.store.current().unwrap().as_str(), "issued-jwt");
    assert_eq!(test.persisted.stored().as_deref(), Some("issued-jwt"));
}

/// **VALUE**: Verifies a rejected login surfaces a classified HTTP error and stores nothing.
///
/// **BUG THIS CATCHES**: Would catch the error body being parsed as a token
/// response, or a partial token being stored.
#[tokio::test]
async fn given_rejected_credentials_when_login_then_http_error_and_no_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "detail": "Incorrect username or password" })),
        )
        .mount(&server)
        .await;

    let test = client_for(&server, None);
    let result = test.client.login("admin", "wrong").await;

    match result {
        Err(ApiClientError::Http { status_code, .. }) => assert_eq!(status_code.0, 401),
        other => panic!("Expected Http error, got {other:?}"),
    }
    assert!(test.store.current().is_none());
    assert!(test.persisted.stored().is_none());
}

/// **VALUE**: Verifies login is sent without stored credentials and a failed
/// attempt leaves an existing session intact.
///
/// **WHY THIS MATTERS**: Re-authenticating as another admin with a typo must
/// not silently log out the current one.
#[tokio::test]
async fn given_existing_session_when_login_rejected_then_session_kept() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/login"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let test = client_for(&server, Some(TEST_TOKEN));
    let result = test.client.login("other", "typo").await;

    assert!(result.is_err());
    let requests = received(&server).await;
    assert!(requests[0].headers.get("authorization").is_none());
    assert_eq!(test.store.current().unwrap().as_str(), TEST_TOKEN);
}

#[tokio::test]
async fn given_success_without_token_when_login_then_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token_type": "bearer" })))
        .mount(&server)
        .await;

    let test = client_for(&server, None);
    let result = test.client.login("admin", "secret").await;

    assert!(matches!(result, Err(ApiClientError::Decode { .. })));
    assert!(test.store.current().is_none());
}

#[tokio::test]
async fn given_logged_in_when_logout_then_subsequent_requests_unauthenticated() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/auth/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let test = client_for(&server, Some(TEST_TOKEN));
    test.client.logout().unwrap();
    test.client.fetch_current_user().await.unwrap();

    let requests = received(&server).await;
    assert!(requests[0].headers.get("authorization").is_none());
    assert!(test.persisted.stored().is_none());
}
