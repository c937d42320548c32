//! Classified failures of the request path.
//!
//! - Transport failures, HTTP status failures, and body decode failures are
//!   distinct variants so callers can branch without parsing messages
//! - HTTP status codes stored directly
//! - All errors include ErrorLocation for debugging

use crate::error::credentials::CredentialError;

use common::{ErrorLocation, HttpStatusCode};

use std::panic::Location;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum ApiClientError {
    #[error("Network Error: {message} {location}")]
    Network {
        message: String,
        is_timeout: bool,
        is_connection: bool,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
        location: ErrorLocation,
    },

    #[error("HTTP Error: {status_code} {status_text} {location}")]
    Http {
        status_code: HttpStatusCode,
        status_text: String,
        location: ErrorLocation,
    },

    #[error("Decode Error: {message} {location}")]
    Decode {
        message: String,
        location: ErrorLocation,
    },

    #[error("URL Parse Error: {message} {location}")]
    UrlParse {
        message: String,
        location: ErrorLocation,
    },

    #[error("Invalid Header Error: {message} {location}")]
    InvalidHeader {
        message: String,
        location: ErrorLocation,
    },

    #[error("Invalid Request Error: {message} {location}")]
    InvalidRequest {
        message: String,
        location: ErrorLocation,
    },

    #[error(transparent)]
    Credentials(#[from] CredentialError),
}

impl ApiClientError {
    #[track_caller]
    pub fn http(status_code: u16, status_text: impl Into<String>) -> Self {
        ApiClientError::Http {
            status_code: HttpStatusCode(status_code),
            status_text: status_text.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn decode(message: impl Into<String>) -> Self {
        ApiClientError::Decode {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn invalid_header(message: impl Into<String>) -> Self {
        ApiClientError::InvalidHeader {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        ApiClientError::InvalidRequest {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Create from a reqwest error raised while sending or reading a body.
    #[track_caller]
    pub fn from_transport(error: reqwest::Error) -> Self {
        // Check for specific error types BEFORE converting to string
        let is_timeout = error.is_timeout();
        let is_connection = error.is_connect();

        ApiClientError::Network {
            message: error.to_string(),
            is_timeout,
            is_connection,
            source: Box::new(error),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// HTTP status code if this is an `Http` failure.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiClientError::Http { status_code, .. } => Some(status_code.0),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiClientError::Http { status_code, .. } if status_code.is_unauthorized())
    }

    /// Short category name for log lines.
    pub fn error_category(&self) -> &'static str {
        match self {
            ApiClientError::Network { is_timeout: true, .. } => "timeout",
            ApiClientError::Network { is_connection: true, .. } => "connection",
            ApiClientError::Network { .. } => "network",
            ApiClientError::Http { status_code, .. } if status_code.is_unauthorized() => {
                "unauthorized"
            }
            ApiClientError::Http { status_code, .. } if status_code.is_client_error() => {
                "client_error"
            }
            ApiClientError::Http { status_code, .. } if status_code.is_server_error() => {
                "server_error"
            }
            ApiClientError::Http { .. } => "http",
            ApiClientError::Decode { .. } => "decode",
            ApiClientError::UrlParse { .. } => "url_parse",
            ApiClientError::InvalidHeader { .. } => "invalid_header",
            ApiClientError::InvalidRequest { .. } => "invalid_request",
            ApiClientError::Credentials(_) => "credentials",
        }
    }
}

impl From<url::ParseError> for ApiClientError {
    #[track_caller]
    fn from(error: url::ParseError) -> Self {
        ApiClientError::UrlParse {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<serde_json::Error> for ApiClientError {
    #[track_caller]
    fn from(error: serde_json::Error) -> Self {
        ApiClientError::Decode {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
