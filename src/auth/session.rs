//! Session data and where the backend client keeps it

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use super::types::User;
use crate::error::Result;

/// Seconds before `expires_at` at which a session already counts as expired.
pub const EXPIRY_MARGIN_SECS: i64 = 10;

/// Session data as issued by the auth service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// The access token
    pub access_token: String,

    /// The refresh token
    pub refresh_token: String,

    /// The token type
    #[serde(default = "default_token_type")]
    pub token_type: String,

    /// The lifetime of the access token in seconds
    pub expires_in: i64,

    /// The expiry timestamp, seconds since the epoch
    #[serde(default)]
    pub expires_at: Option<i64>,

    /// The signed in user
    pub user: User,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

pub(crate) fn now_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or(Duration::from_secs(0))
        .as_secs() as i64
}

impl Session {
    /// Fill in `expires_at` from `expires_in` when the service left it out
    pub fn stamped(mut self) -> Self {
        if self.expires_at.is_none() {
            self.expires_at = Some(now_secs().saturating_add(self.expires_in));
        }
        self
    }

    /// Check if the session has expired, or is about to
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => now_secs().saturating_add(EXPIRY_MARGIN_SECS) >= expires_at,
            None => false,
        }
    }
}

/// Storage for the current session.
pub trait SessionStore: Send + Sync {
    /// The stored session, if any
    fn load(&self) -> Result<Option<Session>>;
    /// Replace the stored session
    fn save(&self, session: &Session) -> Result<()>;
    /// Forget the stored session
    fn clear(&self) -> Result<()>;
}

/// Keeps the session for the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    session: Mutex<Option<Session>>,
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<Session>> {
        let current = self.session.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(current.clone())
    }

    fn save(&self, session: &Session) -> Result<()> {
        let mut current = self.session.lock().unwrap_or_else(PoisonError::into_inner);
        *current = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut current = self.session.lock().unwrap_or_else(PoisonError::into_inner);
        *current = None;
        Ok(())
    }
}

/// Keeps the session in a JSON file so later processes see it.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Create a store backed by `path`; the file is created on first save
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<Session>> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(Some(serde_json::from_str(&text)?)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, serde_json::to_vec_pretty(session)?)?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
