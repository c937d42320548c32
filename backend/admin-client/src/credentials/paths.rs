//! Platform-aware location of the persisted access token.
//!
//! Lookup order:
//! 1. PII_ADMIN_DATA_DIR environment variable (explicit override)
//! 2. Platform-specific data directory via `dirs` crate
//! 3. $HOME/.local/share fallback
//!
//! Returns Result, never silently falls back to a relative path.

use crate::error::CredentialError;

use common::ErrorLocation;

use std::env;
use std::panic::Location;
use std::path::PathBuf;

use log::{debug, info, warn};

pub const DATA_DIR_ENV_KEY: &str = "PII_ADMIN_DATA_DIR";
pub const APP_DIR_NAME: &str = "pii-admin";
pub const TOKEN_FILE_NAME: &str = "access_token";

#[derive(Debug, Clone)]
pub struct CredentialPaths {
    pub data_dir: PathBuf,
    pub token_file: PathBuf,
    pub source: PathSource,
}

/// How the path was determined (for logging).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathSource {
    EnvVar,
    PlatformDefault,
    HomeFallback,
}

impl std::fmt::Display for PathSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathSource::EnvVar => write!(f, "{DATA_DIR_ENV_KEY}"),
            PathSource::PlatformDefault => write!(f, "platform default"),
            PathSource::HomeFallback => write!(f, "home fallback"),
        }
    }
}

impl CredentialPaths {
    fn in_dir(data_dir: PathBuf, source: PathSource) -> Self {
        let token_file = data_dir.join(TOKEN_FILE_NAME);
        Self {
            data_dir,
            token_file,
            source,
        }
    }
}

/// Detect where the access token is persisted.
///
/// # Errors
/// Returns `CredentialError::DirectoryNotFound` if no location can be determined.
pub fn detect_credential_paths() -> Result<CredentialPaths, CredentialError> {
    if let Ok(custom_dir) = env::var(DATA_DIR_ENV_KEY)
        && !custom_dir.is_empty()
    {
        let data_dir = PathBuf::from(&custom_dir);
        info!("Using {DATA_DIR_ENV_KEY} override: {:?}", data_dir);
        return Ok(CredentialPaths::in_dir(data_dir, PathSource::EnvVar));
    }

    if let Some(data_dir) = dirs::data_local_dir() {
        let app_dir = data_dir.join(APP_DIR_NAME);
        debug!("Platform data dir: {:?}", app_dir);
        return Ok(CredentialPaths::in_dir(app_dir, PathSource::PlatformDefault));
    }

    if let Ok(home) = env::var("HOME") {
        let data_dir = PathBuf::from(home).join(".local/share").join(APP_DIR_NAME);
        warn!("Using home fallback path: {:?}", data_dir);
        return Ok(CredentialPaths::in_dir(data_dir, PathSource::HomeFallback));
    }

    Err(CredentialError::DirectoryNotFound {
        location: ErrorLocation::from(Location::caller()),
        message: format!("Cannot determine data directory. Set {DATA_DIR_ENV_KEY}."),
    })
}
