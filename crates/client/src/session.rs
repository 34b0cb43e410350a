use std::{
    fs,
    path::{Path, PathBuf},
    sync::{
        Arc, RwLock,
        atomic::{AtomicBool, Ordering},
    },
};

use serde::{Deserialize, Serialize};

use crate::error::SessionError;

/// Shared handle to the bearer token of the logged-in user.
///
/// Every [`HttpClient`](crate::HttpClient) holds a clone and only reads from it; the login and
/// logout flows are the only writers. The one exception is the expiry flag, which the transport
/// raises when the backend rejects the token with 401.
#[derive(Clone, Debug, Default)]
pub struct Session {
    token: Arc<RwLock<Option<String>>>,
    expired: Arc<AtomicBool>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Arc::new(RwLock::new(Some(token.into()))),
            expired: Arc::default(),
        }
    }

    pub fn token(&self) -> Option<String> {
        match self.token.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    pub fn set_token(&self, token: impl Into<String>) {
        self.replace(Some(token.into()));
    }

    pub fn clear(&self) {
        self.replace(None);
    }

    /// Flags the current token as rejected by the backend.
    pub fn mark_expired(&self) {
        self.expired.store(true, Ordering::Relaxed);
    }

    /// Returns whether the token was rejected since the last call, resetting the flag.
    pub fn take_expired(&self) -> bool {
        self.expired.swap(false, Ordering::Relaxed)
    }

    fn replace(&self, value: Option<String>) {
        self.expired.store(false, Ordering::Relaxed);
        match self.token.write() {
            Ok(mut guard) => *guard = value,
            Err(poisoned) => *poisoned.into_inner() = value,
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionFile {
    #[serde(rename = "authToken", default, skip_serializing_if = "Option::is_none")]
    auth_token: Option<String>,
}

/// Token persistence across runs, stored as `{"authToken": "..."}`.
#[derive(Clone, Debug)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the stored token, or `None` when the file does not exist yet.
    pub fn load(&self) -> Result<Option<String>, SessionError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let file: SessionFile = serde_json::from_str(&content)?;
        Ok(file.auth_token.filter(|token| !token.is_empty()))
    }

    pub fn save(&self, token: &str) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let payload = serde_json::to_string_pretty(&SessionFile {
            auth_token: Some(token.to_string()),
        })?;
        fs::write(&self.path, payload)?;
        Ok(())
    }

    pub fn clear(&self) -> Result<(), SessionError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
