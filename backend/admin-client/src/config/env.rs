//! `.env` loading and environment overrides.

use crate::error::ConfigError;

use common::ErrorLocation;

use std::env;
use std::panic::Location;
use std::path::PathBuf;

use log::{debug, info, warn};

/// Primary override for the backend origin.
pub const API_URL_ENV_KEY: &str = "PII_ADMIN_API_URL";
/// Secondary override, shared with the backend's own deployment config.
pub const FALLBACK_API_URL_ENV_KEY: &str = "API_URL";

/// Result of attempting to load a .env file.
#[derive(Debug)]
pub struct EnvLoadResult {
    /// Path to loaded .env file, if found.
    pub path: Option<PathBuf>,
    /// Whether any .env file was loaded.
    pub loaded: bool,
}

/// Attempts to load .env from the current directory, then the executable's directory.
///
/// Never fails: a missing or unparsable file only produces a log line.
pub fn try_load_dotenv() -> EnvLoadResult {
    if let Ok(path) = dotenvy::dotenv() {
        info!("Loaded .env from: {:?}", path);
        return EnvLoadResult {
            path: Some(path),
            loaded: true,
        };
    }

    if let Ok(exe_path) = env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        let env_path = exe_dir.join(".env");
        if env_path.exists() {
            match dotenvy::from_path(&env_path) {
                Ok(_) => {
                    info!("Loaded .env from: {:?}", env_path);
                    return EnvLoadResult {
                        path: Some(env_path),
                        loaded: true,
                    };
                }
                Err(e) => {
                    warn!("Failed to parse .env at {:?}: {}", env_path, e);
                }
            }
        }
    }

    debug!("No .env file found - using existing environment variables");
    EnvLoadResult {
        path: None,
        loaded: false,
    }
}

/// Backend origin supplied through the environment, if any.
///
/// Checks `PII_ADMIN_API_URL` then `API_URL`. Empty values count as unset.
///
/// # Errors
/// Returns [`ConfigError::EnvError`] if a variable is set but not valid unicode.
pub fn api_url_override() -> Result<Option<String>, ConfigError> {
    for key in [API_URL_ENV_KEY, FALLBACK_API_URL_ENV_KEY] {
        match env::var(key) {
            Ok(value) if !value.is_empty() => {
                debug!("Backend origin overridden by {key}");
                return Ok(Some(value));
            }
            Ok(_) | Err(env::VarError::NotPresent) => {}
            Err(env::VarError::NotUnicode(_)) => {
                return Err(ConfigError::EnvError {
                    location: ErrorLocation::from(Location::caller()),
                    key: key.to_string(),
                    reason: String::from("contains invalid unicode"),
                });
            }
        }
    }

    Ok(None)
}
