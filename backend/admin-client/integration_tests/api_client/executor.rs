use crate::helpers::{TEST_TOKEN, client_for, received};

use admin_client::credentials::CredentialStore;
use admin_client::endpoints::Endpoint;
use admin_client::error::ApiClientError;
use admin_client::{ApiClient, RequestOptions};

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::Arc;
use std::thread;

use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// **VALUE**: Verifies a stored token reaches the backend as a bearer header.
///
/// **WHY THIS MATTERS**: This is the end-to-end check that login state flows
/// from the credential store onto the wire.
///
/// **BUG THIS CATCHES**: Would catch the header being built but dropped by the
/// transport, or the store not being consulted on send.
#[tokio::test]
async fn given_stored_token_when_request_sent_then_backend_sees_bearer_header() {
    // GIVEN: A backend that only answers authenticated requests
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/auth/me"))
        .and(header("authorization", "Bearer test-token-12345"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "username": "admin" })))
        .expect(1)
        .mount(&server)
        .await;

    let test = client_for(&server, Some(TEST_TOKEN));

    // WHEN: Fetching the current session
    let payload = test.client.fetch_current_user().await;

    // THEN: The request was authenticated and the payload returned as-is
    assert_eq!(payload.unwrap(), json!({ "username": "admin" }));
}

#[tokio::test]
async fn given_no_token_when_request_sent_then_no_authorization_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/admin/pii-settings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "settings": [] })))
        .mount(&server)
        .await;

    let test = client_for(&server, None);
    test.client.fetch_all_settings().await.unwrap();

    let requests = received(&server).await;
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("authorization").is_none());
    assert_eq!(
        requests[0].headers.get("content-type").unwrap(),
        "application/json"
    );
}

/// **VALUE**: Verifies a 401 both fails the call and clears the stored token.
///
/// **WHY THIS MATTERS**: An expired token must not be replayed on every
/// subsequent request; the next page load should see a logged-out session.
///
/// **BUG THIS CATCHES**: Would catch:
/// - The status being swallowed instead of classified as `Http`
/// - Only the in-memory token being cleared, leaving it on disk
#[tokio::test]
async fn given_unauthorized_response_when_request_sent_then_error_and_token_cleared() {
    // GIVEN: A backend that rejects the token
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/admin/logs"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let test = client_for(&server, Some(TEST_TOKEN));

    // WHEN: Making an ordinary call
    let result = test.client.fetch_logs(&Default::default()).await;

    // THEN: The failure carries status 401
    let err = result.unwrap_err();
    assert_eq!(err.status_code(), Some(401));
    assert!(err.is_unauthorized());
    match &err {
        ApiClientError::Http { status_text, .. } => assert_eq!(status_text, "Unauthorized"),
        other => panic!("Expected Http error, got {other:?}"),
    }

    // AND: The token is gone from memory and storage
    assert!(test.store.current().is_none());
    assert!(test.persisted.stored().is_none());
}

/// **VALUE**: Verifies non-401 failures leave the session alone.
///
/// **BUG THIS CATCHES**: Would catch the clear being triggered by any 4xx/5xx,
/// which would log the admin out on every backend hiccup.
#[tokio::test]
async fn given_server_error_when_request_sent_then_http_error_and_token_kept() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/admin/statistics/overview"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let test = client_for(&server, Some(TEST_TOKEN));
    let err = test
        .client
        .fetch_overview(&Default::default())
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), Some(503));
    assert_eq!(err.error_category(), "server_error");
    match &err {
        ApiClientError::Http { status_text, .. } => assert_eq!(status_text, "Service Unavailable"),
        other => panic!("Expected Http error, got {other:?}"),
    }
    assert_eq!(test.store.current().unwrap().as_str(), TEST_TOKEN);
}

/// Serve one canned HTTP/1.1 response on a loopback port and return the origin.
fn serve_once(raw_response: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let origin = format!("http://{}", listener.local_addr().unwrap());
    thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = stream.read(&mut buf).unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }
        stream.write_all(raw_response.as_bytes()).unwrap();
    });
    origin
}

/// **VALUE**: Verifies the error carries the reason phrase the server sent.
///
/// **WHY THIS MATTERS**: Backends and proxies use custom codes and phrases;
/// the phrase is often the only human-readable hint on the failure page.
///
/// **BUG THIS CATCHES**: Would catch the phrase being replaced by the canonical
/// table lookup, which is empty for a code like 599.
#[tokio::test]
async fn given_custom_reason_phrase_when_request_fails_then_status_text_is_servers() {
    // GIVEN: A server answering 599 with its own phrase
    let origin = serve_once(
        "HTTP/1.1 599 Backend Overloaded\r\ncontent-length: 0\r\nconnection: close\r\n\r\n",
    );
    let client = ApiClient::new(&origin, Arc::new(CredentialStore::in_memory())).unwrap();

    // WHEN: Sending any request
    let err = client.fetch_all_settings().await.unwrap_err();

    // THEN: Status text is exactly what was on the status line
    match err {
        ApiClientError::Http {
            status_code,
            status_text,
            ..
        } => {
            assert_eq!(status_code.0, 599);
            assert_eq!(status_text, "Backend Overloaded");
        }
        other => panic!("Expected Http error, got {other:?}"),
    }
}

/// **VALUE**: Verifies exactly one attempt is made per call.
///
/// **BUG THIS CATCHES**: Would catch a retry layer being added to the executor.
#[tokio::test]
async fn given_failing_backend_when_request_sent_then_single_attempt() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502))
        .expect(1)
        .mount(&server)
        .await;

    let test = client_for(&server, None);
    let result = test.client.fetch_all_settings().await;

    assert!(result.is_err());
}

#[tokio::test]
async fn given_invalid_json_body_when_fetching_json_then_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/admin/pii-settings"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let test = client_for(&server, None);
    let result = test.client.fetch_all_settings().await;

    assert!(matches!(result, Err(ApiClientError::Decode { .. })));
}

/// **VALUE**: Verifies transport failures are classified as network errors.
///
/// **WHY THIS MATTERS**: Pages show "backend unreachable" for these rather than
/// an HTTP error; the two must be distinguishable.
#[tokio::test]
async fn given_unreachable_backend_when_request_sent_then_network_error() {
    // GIVEN: A port nothing listens on
    let store = Arc::new(CredentialStore::in_memory());
    let client = ApiClient::new("http://127.0.0.1:1", store).unwrap();

    // WHEN: Sending any request
    let result = client.fetch_all_settings().await;

    // THEN: Network variant with the underlying cause attached
    match result {
        Err(err @ ApiClientError::Network { .. }) => {
            assert!(std::error::Error::source(&err).is_some());
        }
        other => panic!("Expected Network error, got {other:?}"),
    }
}

#[tokio::test]
async fn given_raw_execute_when_success_then_response_returned_unparsed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let test = client_for(&server, None);
    let response = test
        .client
        .execute("/health", RequestOptions::default())
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 204);
}

/// **VALUE**: Verifies two identical calls produce two identical requests.
///
/// **BUG THIS CATCHES**: Would catch hidden caching or de-duplication, and
/// state leaking from one request into the next.
#[tokio::test]
async fn given_settings_list_called_twice_then_two_identical_requests() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(Endpoint::PiiSettings.path().as_ref()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "settings": [], "total": 0 })))
        .expect(2)
        .mount(&server)
        .await;

    let test = client_for(&server, Some(TEST_TOKEN));
    test.client.fetch_all_settings().await.unwrap();
    test.client.fetch_all_settings().await.unwrap();

    let requests = received(&server).await;
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].url, requests[1].url);
    assert_eq!(
        requests[0].headers.get("authorization"),
        requests[1].headers.get("authorization")
    );
}
