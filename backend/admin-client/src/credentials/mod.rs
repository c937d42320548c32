//! Bearer-token state for the logged-in admin session.
//!
//! # Lifecycle
//! - `load()` at startup pulls a persisted token into memory
//! - `set()` on successful login persists, then publishes the token
//! - `clear()` on logout (or an implicit 401) drops it from memory first,
//!   then removes the persisted copy
//!
//! The store is an explicit object handed to the client, never a global.
//! Ordinary requests only read it; writes are plain last-writer-wins
//! assignments behind a short-lived lock.

pub mod paths;
pub mod persistence;

pub use paths::{CredentialPaths, PathSource, detect_credential_paths};
pub use persistence::{FileTokenPersistence, MemoryTokenPersistence, TokenPersistence};

use crate::error::CredentialError;

use common::RedactedToken;

use std::sync::{PoisonError, RwLock};

use log::{debug, info};

pub struct CredentialStore {
    token: RwLock<Option<RedactedToken>>,
    persistence: Box<dyn TokenPersistence>,
}

impl CredentialStore {
    pub fn new(persistence: Box<dyn TokenPersistence>) -> Self {
        Self {
            token: RwLock::new(None),
            persistence,
        }
    }

    /// Store backed by process memory only; nothing outlives the process.
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryTokenPersistence::default()))
    }

    /// Read the persisted token (if any) into memory.
    ///
    /// Safe to call repeatedly and when nothing was ever persisted. A
    /// persisted empty value counts as absent.
    pub fn load(&self) -> Result<(), CredentialError> {
        match self.persistence.load()? {
            Some(raw) if !raw.trim().is_empty() => {
                let token = RedactedToken::new(raw.trim());
                debug!("Loaded persisted access token ({} chars)", token.len());
                self.replace(Some(token));
            }
            _ => {
                debug!("No persisted access token");
            }
        }
        Ok(())
    }

    /// Persist `token` and make it the current credential.
    pub fn set(&self, token: RedactedToken) -> Result<(), CredentialError> {
        self.persistence.save(token.as_str())?;
        info!("Access token stored ({} chars)", token.len());
        self.replace(Some(token));
        Ok(())
    }

    /// Forget the current credential, in memory and in persisted storage.
    ///
    /// Memory is cleared even if removing the persisted copy fails.
    pub fn clear(&self) -> Result<(), CredentialError> {
        self.replace(None);
        self.persistence.remove()?;
        info!("Access token cleared");
        Ok(())
    }

    pub fn current(&self) -> Option<RedactedToken> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_logged_in(&self) -> bool {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    fn replace(&self, token: Option<RedactedToken>) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = token;
    }
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore")
            .field("logged_in", &self.is_logged_in())
            .finish()
    }
}
