//! Persisted session tokens.
//!
//! The token pair lives in a small JSON file so a restarted server keeps the
//! user signed in. The store is created once and handed explicitly to the
//! HTTP client and the auth service; nothing reads the file behind their back.

use crate::error::{SessionError, SessionResult};
use crate::models::AuthTokens;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

#[derive(Debug)]
pub struct SessionStore {
    path: PathBuf,
    tokens: RwLock<Option<AuthTokens>>,
}

impl SessionStore {
    /// Create a store backed by `path`. Nothing is read until [`acquire`](Self::acquire).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            tokens: RwLock::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load tokens from disk. A missing file means no session.
    pub fn acquire(&self) -> SessionResult<Option<AuthTokens>> {
        let loaded = match fs::read_to_string(&self.path) {
            Ok(contents) => Some(serde_json::from_str::<AuthTokens>(&contents)?),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => return Err(SessionError::Io(e)),
        };

        let mut guard = self.tokens.write().map_err(|_| SessionError::Poisoned)?;
        *guard = loaded.clone();

        tracing::debug!(
            "Session acquired from {} (present: {})",
            self.path.display(),
            loaded.is_some()
        );
        Ok(loaded)
    }

    /// Persist a freshly issued token pair.
    pub fn store(&self, tokens: &AuthTokens) -> SessionResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, serde_json::to_vec_pretty(tokens)?)?;

        let mut guard = self.tokens.write().map_err(|_| SessionError::Poisoned)?;
        *guard = Some(tokens.clone());
        Ok(())
    }

    /// Forget the session. Clearing an absent session is not an error.
    pub fn clear(&self) -> SessionResult<()> {
        {
            let mut guard = self.tokens.write().map_err(|_| SessionError::Poisoned)?;
            *guard = None;
        }

        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SessionError::Io(e)),
        }
    }

    /// Bearer token for the `Authorization` header, if signed in.
    pub fn access_token(&self) -> Option<String> {
        self.tokens
            .read()
            .ok()
            .and_then(|guard| guard.as_ref().map(|t| t.access_token.clone()))
    }

    pub fn has_session(&self) -> bool {
        self.access_token().is_some()
    }
}
