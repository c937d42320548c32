use admin_client::error::{ApiClientError, ConfigError, CoreError, CredentialError};

use common::ErrorLocation;

use thiserror::Error;

/// Errors surfaced by a `pii-admin` invocation.
///
/// Library errors keep their own location; `Cli` covers failures of the
/// binary itself (bad arguments, logger setup, output).
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Cli Error: {message} {location}")]
    Cli {
        message: String,
        location: ErrorLocation,
    },

    #[error(transparent)]
    Api(#[from] ApiClientError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Credentials(#[from] CredentialError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl AppError {
    /// Whether the failure means the admin has to log in (again).
    pub fn requires_login(&self) -> bool {
        match self {
            AppError::Api(e) => e.is_unauthorized(),
            AppError::Core(CoreError::Api(e)) => e.is_unauthorized(),
            _ => false,
        }
    }
}
