pub mod api_client;
pub mod config;
pub mod credentials;

pub use api_client::ApiClientError;
pub use config::ConfigError;
pub use credentials::CredentialError;

use thiserror::Error;

/// Any failure the client layer can produce.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Api(#[from] ApiClientError),

    #[error(transparent)]
    Credentials(#[from] CredentialError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
