//! Test helpers for client integration tests.
//!
//! - Mock backend via wiremock
//! - Credential stores whose persistence the test can inspect

use admin_client::ApiClient;
use admin_client::credentials::{CredentialStore, MemoryTokenPersistence};

use common::RedactedToken;

use std::sync::Arc;

use wiremock::MockServer;

pub const TEST_TOKEN: &str = "test-token-12345";

/// A client against `server`, plus the persistence backing its store.
pub struct TestClient {
    pub client: ApiClient,
    pub store: Arc<CredentialStore>,
    pub persisted: Arc<MemoryTokenPersistence>,
}

pub fn client_for(server: &MockServer, token: Option<&str>) -> TestClient {
    let persisted = Arc::new(MemoryTokenPersistence::default());
    let store = Arc::new(CredentialStore::new(Box::new(Arc::clone(&persisted))));

    if let Some(token) = token {
        store
            .set(RedactedToken::new(token))
            .expect("Failed to seed token");
    }

    let client =
        ApiClient::new(&server.uri(), Arc::clone(&store)).expect("Failed to build client");

    TestClient {
        client,
        store,
        persisted,
    }
}

/// Requests the mock server has seen so far.
pub async fn received(server: &MockServer) -> Vec<wiremock::Request> {
    server
        .received_requests()
        .await
        .expect("Request recording is enabled by default")
}
