//! Where the bearer token lives between process runs.

use crate::error::CredentialError;

use common::ErrorLocation;

use std::io::ErrorKind;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use log::debug;

/// Backend the `CredentialStore` persists through.
pub trait TokenPersistence: Send + Sync {
    /// `Ok(None)` when nothing has been persisted.
    fn load(&self) -> Result<Option<String>, CredentialError>;

    fn save(&self, token: &str) -> Result<(), CredentialError>;

    /// Removing an absent token is not an error.
    fn remove(&self) -> Result<(), CredentialError>;
}

/// Token kept in a single file, written atomically (temp file + rename).
#[derive(Debug, Clone)]
pub struct FileTokenPersistence {
    path: PathBuf,
}

impl FileTokenPersistence {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl TokenPersistence for FileTokenPersistence {
    fn load(&self) -> Result<Option<String>, CredentialError> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Token file not found at {}", self.path.display());
                Ok(None)
            }
            Err(e) => Err(CredentialError::ReadError {
                location: ErrorLocation::from(Location::caller()),
                path: self.path.clone(),
                source: e,
            }),
        }
    }

    fn save(&self, token: &str) -> Result<(), CredentialError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| CredentialError::WriteError {
                location: ErrorLocation::from(Location::caller()),
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let temp_path = self.temp_path();

        std::fs::write(&temp_path, token).map_err(|e| CredentialError::WriteError {
            location: ErrorLocation::from(Location::caller()),
            path: temp_path.clone(),
            source: e,
        })?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;

            std::fs::set_permissions(&temp_path, std::fs::Permissions::from_mode(0o600)).map_err(
                |e| CredentialError::WriteError {
                    location: ErrorLocation::from(Location::caller()),
                    path: temp_path.clone(),
                    source: e,
                },
            )?;
        }

        std::fs::rename(&temp_path, &self.path).map_err(|e| CredentialError::WriteError {
            location: ErrorLocation::from(Location::caller()),
            path: self.path.clone(),
            source: e,
        })?;

        Ok(())
    }

    fn remove(&self) -> Result<(), CredentialError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CredentialError::RemoveError {
                location: ErrorLocation::from(Location::caller()),
                path: self.path.clone(),
                source: e,
            }),
        }
    }
}

/// Process-local persistence for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryTokenPersistence {
    inner: Mutex<Option<String>>,
}

impl MemoryTokenPersistence {
    /// Start with a token already "persisted", as if from a previous run.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            inner: Mutex::new(Some(token.into())),
        }
    }

    pub fn stored(&self) -> Option<String> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl TokenPersistence for MemoryTokenPersistence {
    fn load(&self) -> Result<Option<String>, CredentialError> {
        Ok(self.stored())
    }

    fn save(&self, token: &str) -> Result<(), CredentialError> {
        *self.inner.lock().unwrap_or_else(PoisonError::into_inner) = Some(token.to_string());
        Ok(())
    }

    fn remove(&self) -> Result<(), CredentialError> {
        *self.inner.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

impl<T: TokenPersistence + ?Sized> TokenPersistence for std::sync::Arc<T> {
    fn load(&self) -> Result<Option<String>, CredentialError> {
        (**self).load()
    }

    fn save(&self, token: &str) -> Result<(), CredentialError> {
        (**self).save(token)
    }

    fn remove(&self) -> Result<(), CredentialError> {
        (**self).remove()
    }
}
