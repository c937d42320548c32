use super::{ApiClient, FORM_CONTENT_TYPE, RequestOptions};

use crate::endpoints::Endpoint;
use crate::error::ApiClientError;

use common::RedactedToken;
use models::TokenResponse;

use log::info;
use reqwest::Method;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use url::form_urlencoded;

impl ApiClient {
    /// Exchange username/password for an access token and store it.
    ///
    /// The request is form-encoded and sent without stored credentials. On
    /// any failure the credential store is left untouched.
    ///
    /// # Errors
    /// - [`ApiClientError::Http`] if the backend rejects the credentials
    /// - [`ApiClientError::Decode`] if the response carries no `access_token`
    /// - [`ApiClientError::Credentials`] if the token cannot be persisted
    pub async fn login(&self, username: &str, password: &str) -> Result<(), ApiClientError> {
        let body = form_urlencoded::Serializer::new(String::new())
            .append_pair("username", username)
            .append_pair("password", password)
            .finish();

        let options = RequestOptions::new(Method::POST)
            .with_header(CONTENT_TYPE.as_str(), FORM_CONTENT_TYPE)
            .with_body(body)
            .anonymous();

        let payload = self.fetch_json(&Endpoint::Login.path(), options).await?;
        let response: TokenResponse = serde_json::from_value(payload)?;

        let token = response
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ApiClientError::decode("login response has no access_token"))?;

        self.credentials.set(RedactedToken::new(token))?;
        info!("Logged in as {username}");
        Ok(())
    }

    /// `GET /api/v1/auth/me` for the current session.
    pub async fn fetch_current_user(&self) -> Result<Value, ApiClientError> {
        self.fetch_json(&Endpoint::CurrentUser.path(), RequestOptions::default())
            .await
    }

    /// Drop the current session's credentials. No request is sent.
    pub fn logout(&self) -> Result<(), ApiClientError> {
        self.credentials.clear()?;
        Ok(())
    }
}
