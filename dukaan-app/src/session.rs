//! Session token persistence
//!
//! The browser original kept the opaque session token in local storage
//! under a fixed key; here it is a fixed-name JSON file in the data
//! directory. No refresh or expiry logic lives client-side — the token is
//! held until explicit logout and the server decides when it stops
//! working.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared::util::now_millis;

/// Fixed storage filename (the local-storage key analog)
pub const SESSION_FILE: &str = "auth_token.json";

#[derive(Debug, Error)]
pub enum SessionStoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Stored session payload
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredSession {
    token: String,
    saved_at: i64,
}

/// File-backed session store
#[derive(Debug, Clone)]
pub struct SessionStore {
    file_path: PathBuf,
}

impl SessionStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            file_path: data_dir.join(SESSION_FILE),
        }
    }

    pub fn exists(&self) -> bool {
        self.file_path.exists()
    }

    /// Persist the token (overwrites any previous session)
    pub fn save(&self, token: &str) -> Result<(), SessionStoreError> {
        if let Some(parent) = self.file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let session = StoredSession {
            token: token.to_string(),
            saved_at: now_millis(),
        };
        let content = serde_json::to_string_pretty(&session)?;
        std::fs::write(&self.file_path, content)?;
        tracing::debug!("Session token saved");
        Ok(())
    }

    /// Load the stored token, if any.
    ///
    /// An unreadable file is cleared and treated as no session rather
    /// than an error: the user logs in again.
    pub fn load(&self) -> Result<Option<String>, SessionStoreError> {
        if !self.file_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&self.file_path)?;
        match serde_json::from_str::<StoredSession>(&content) {
            Ok(session) => Ok(Some(session.token)),
            Err(e) => {
                tracing::warn!(error = %e, "Corrupt session file, clearing");
                let _ = std::fs::remove_file(&self.file_path);
                Ok(None)
            }
        }
    }

    /// Remove the stored session (logout)
    pub fn clear(&self) -> Result<(), SessionStoreError> {
        if self.file_path.exists() {
            std::fs::remove_file(&self.file_path)?;
            tracing::debug!("Session token cleared");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn save_load_clear_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::new(dir.path());

        assert!(!store.exists());
        assert_eq!(store.load().unwrap(), None);

        store.save("opaque-token").unwrap();
        assert!(store.exists());
        assert_eq!(store.load().unwrap().as_deref(), Some("opaque-token"));

        store.clear().unwrap();
        assert!(!store.exists());
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn corrupt_file_is_cleared_and_ignored() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::new(dir.path());
        std::fs::write(dir.path().join(SESSION_FILE), "not json").unwrap();

        assert_eq!(store.load().unwrap(), None);
        assert!(!store.exists());
    }

    #[test]
    fn save_overwrites_previous_session() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::new(dir.path());
        store.save("first").unwrap();
        store.save("second").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("second"));
    }
}
