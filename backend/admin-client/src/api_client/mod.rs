//! Request execution against the admin backend.
//!
//! Every call goes through [`ApiClient::execute`]:
//! - resolves the endpoint against the configured origin
//! - merges caller headers over `Content-Type: application/json`
//! - injects `Authorization: Bearer <token>` from the [`CredentialStore`]
//!   unless the caller already set one
//! - performs exactly one network attempt and classifies the outcome
//!
//! A 401 on a request that carried stored credentials clears the store
//! before the error is returned. That is the only mutation made here.

mod auth;
mod logs;
mod settings;
mod statistics;

use crate::config::ClientConfig;
use crate::credentials::CredentialStore;
use crate::endpoints::{Endpoint, resolve_endpoint_url};
use crate::error::{ApiClientError, CoreError};
use crate::query::QueryFilter;

use common::ErrorLocation;

use std::collections::BTreeMap;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;
use std::time::Duration;

use hyper::ext::ReasonPhrase;
use log::{debug, warn};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, Request, Response, StatusCode};
use serde_json::Value;
use url::Url;

pub const JSON_CONTENT_TYPE: &str = "application/json";
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Per-call overrides of method, headers and body.
#[derive(Clone)]
pub struct RequestOptions {
    pub method: Method,
    /// Applied over the defaults; names are case-insensitive.
    pub headers: BTreeMap<String, String>,
    /// Already-serialized payload.
    pub body: Option<String>,
    /// Inject stored credentials (and clear them on 401).
    pub authenticate: bool,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            headers: BTreeMap::new(),
            body: None,
            authenticate: true,
        }
    }
}

impl RequestOptions {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Send without stored credentials, e.g. for login.
    pub fn anonymous(mut self) -> Self {
        self.authenticate = false;
        self
    }
}

// Bodies may carry passwords; only their size is shown.
impl fmt::Debug for RequestOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestOptions")
            .field("method", &self.method)
            .field("headers", &self.headers.keys().collect::<Vec<_>>())
            .field("body_len", &self.body.as_ref().map(String::len))
            .field("authenticate", &self.authenticate)
            .finish()
    }
}

/// Typed client for the PII admin REST API.
///
/// Cheap to clone: clones share the connection pool and the credential store.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    client: Client,
    credentials: Arc<CredentialStore>,
}

impl ApiClient {
    /// Client with the transport's default timeout behavior.
    pub fn new(
        base_url: &str,
        credentials: Arc<CredentialStore>,
    ) -> Result<Self, ApiClientError> {
        Self::with_timeout(base_url, credentials, None)
    }

    #[track_caller]
    pub fn with_timeout(
        base_url: &str,
        credentials: Arc<CredentialStore>,
        timeout: Option<Duration>,
    ) -> Result<Self, ApiClientError> {
        Url::parse(base_url)?;

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| ApiClientError::InvalidRequest {
            message: format!("Failed to build HTTP client: {e}"),
            location: ErrorLocation::from(Location::caller()),
        })?;

        Ok(Self {
            base_url: base_url.to_string(),
            client,
            credentials,
        })
    }

    /// Client wired from configuration (origin resolution and timeout).
    pub fn from_config(
        config: &ClientConfig,
        credentials: Arc<CredentialStore>,
    ) -> Result<Self, CoreError> {
        let base_url = config.resolve_base_url()?;
        Ok(Self::with_timeout(
            &base_url,
            credentials,
            config.request_timeout(),
        )?)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn credentials(&self) -> &Arc<CredentialStore> {
        &self.credentials
    }

    /// Build the request `execute` would send, without sending it.
    #[track_caller]
    pub fn build_request(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<Request, ApiClientError> {
        let url = resolve_endpoint_url(&self.base_url, endpoint)?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));

        for (name, value) in &options.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| ApiClientError::invalid_header(format!("{name}: {e}")))?;
            let header_value = HeaderValue::from_str(value)
                .map_err(|e| ApiClientError::invalid_header(format!("{name}: {e}")))?;
            headers.insert(header_name, header_value);
        }

        if options.authenticate
            && !headers.contains_key(AUTHORIZATION)
            && let Some(token) = self.credentials.current()
        {
            let mut value = HeaderValue::from_str(&token.bearer_value()).map_err(|_| {
                ApiClientError::invalid_header("stored access token is not a valid header value")
            })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let mut builder = self.client.request(options.method, url).headers(headers);
        if let Some(body) = options.body {
            builder = builder.body(body);
        }

        builder.build().map_err(|e| ApiClientError::InvalidRequest {
            message: e.to_string(),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    /// Send one request and classify the outcome.
    ///
    /// # Errors
    /// - [`ApiClientError::Network`] if the call could not complete
    /// - [`ApiClientError::Http`] for any status outside 200-299
    pub async fn execute(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<Response, ApiClientError> {
        let authenticated = options.authenticate;
        let request = self.build_request(endpoint, options)?;
        let method = request.method().clone();
        let url = request.url().clone();

        debug!("{method} {url}");

        let response = self.client.execute(request).await.map_err(|e| {
            warn!("{method} {url} failed: {e}");
            ApiClientError::from_transport(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            debug!("{method} {url} -> {status}");

            if status == StatusCode::UNAUTHORIZED && authenticated {
                self.invalidate_credentials();
            }

            return Err(ApiClientError::http(status.as_u16(), reason_phrase(&response)));
        }

        Ok(response)
    }

    /// `execute`, then parse the body as JSON. No schema validation.
    ///
    /// # Errors
    /// Everything `execute` returns, plus [`ApiClientError::Decode`] for a
    /// body that is not valid JSON.
    pub async fn fetch_json(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<Value, ApiClientError> {
        let response = self.execute(endpoint, options).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(ApiClientError::from_transport)?;
        let value = serde_json::from_slice(&bytes)?;
        Ok(value)
    }

    /// GET a collection endpoint with its filter serialized into the query string.
    async fn fetch_filtered<F: QueryFilter>(
        &self,
        endpoint: Endpoint<'_>,
        filter: &F,
    ) -> Result<Value, ApiClientError> {
        let endpoint = endpoint.with_query(&filter.to_query_string());
        self.fetch_json(&endpoint, RequestOptions::default()).await
    }

    fn invalidate_credentials(&self) {
        warn!("Server rejected the access token (401); clearing stored credentials");
        if let Err(e) = self.credentials.clear() {
            warn!("Failed to remove persisted access token: {e}");
        }
    }
}

/// The reason phrase the server sent, else the canonical one for the code.
///
/// hyper only records the phrase when it differs from the canonical text;
/// HTTP/2 responses carry none.
fn reason_phrase(response: &Response) -> String {
    response
        .extensions()
        .get::<ReasonPhrase>()
        .and_then(|phrase| std::str::from_utf8(phrase.as_bytes()).ok())
        .or_else(|| response.status().canonical_reason())
        .unwrap_or_default()
        .to_string()
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("credentials", &self.credentials)
            .finish()
    }
}
