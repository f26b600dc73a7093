//! Persisted sign-in state: access token, refresh token and cached user.
//!
//! The persisted copy is a cache, never a source of truth. It survives a
//! restart and is wiped on logout or when the server rejects the session.

use serde::{Deserialize, Serialize};
use shared_types::UserProfile;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard};
use thiserror::Error;
use tokio::sync::watch;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSession {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub user: UserProfile,
}

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Session file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("Session file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Where the session lives between runs
pub trait SessionPersistence: Send + Sync {
    fn load(&self) -> Result<Option<StoredSession>, SessionError>;
    fn save(&self, session: &StoredSession) -> Result<(), SessionError>;
    fn clear(&self) -> Result<(), SessionError>;
}

/// JSON file, by default `~/.config/replydesk/session.json`
pub struct FileSessionPersistence {
    path: PathBuf,
}

impl FileSessionPersistence {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn default_path() -> PathBuf {
        if let Some(dir) = dirs::config_dir() {
            dir.join("replydesk").join("session.json")
        } else {
            PathBuf::from("./replydesk-session.json")
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionPersistence for FileSessionPersistence {
    fn load(&self) -> Result<Option<StoredSession>, SessionError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    fn save(&self, session: &StoredSession) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(session)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

/// Process-local persistence, for tests and throwaway sessions
#[derive(Default)]
pub struct MemorySessionPersistence {
    slot: Mutex<Option<StoredSession>>,
}

impl MemorySessionPersistence {
    pub fn with_session(session: StoredSession) -> Self {
        Self {
            slot: Mutex::new(Some(session)),
        }
    }
}

impl SessionPersistence for MemorySessionPersistence {
    fn load(&self) -> Result<Option<StoredSession>, SessionError> {
        Ok(self.slot.lock().unwrap_or_else(|e| e.into_inner()).clone())
    }

    fn save(&self, session: &StoredSession) -> Result<(), SessionError> {
        *self.slot.lock().unwrap_or_else(|e| e.into_inner()) = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        *self.slot.lock().unwrap_or_else(|e| e.into_inner()) = None;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    SignedIn,
    SignedOut,
}

/// Shared session cache read by every request and written by login,
/// logout and the refresh path
pub struct SessionStore {
    cache: RwLock<Option<StoredSession>>,
    persistence: Box<dyn SessionPersistence>,
    status_tx: watch::Sender<SessionStatus>,
}

impl SessionStore {
    pub fn new(persistence: impl SessionPersistence + 'static) -> Self {
        let (status_tx, _) = watch::channel(SessionStatus::SignedOut);
        Self {
            cache: RwLock::new(None),
            persistence: Box::new(persistence),
            status_tx,
        }
    }

    pub fn in_memory() -> Self {
        Self::new(MemorySessionPersistence::default())
    }

    /// Load the persisted session into memory. Synchronous, no network.
    /// An unreadable file counts as no session.
    pub fn hydrate(&self) -> Option<UserProfile> {
        let loaded = match self.persistence.load() {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!("Ignoring unreadable session: {}", e);
                None
            }
        };
        let user = loaded.as_ref().map(|s| s.user.clone());
        let status = if loaded.is_some() {
            SessionStatus::SignedIn
        } else {
            SessionStatus::SignedOut
        };
        *self.write() = loaded;
        self.status_tx.send_replace(status);
        user
    }

    pub fn current(&self) -> Option<StoredSession> {
        self.read().clone()
    }

    pub fn access_token(&self) -> Option<String> {
        self.read().as_ref().map(|s| s.access_token.clone())
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.read().as_ref().and_then(|s| s.refresh_token.clone())
    }

    pub fn user(&self) -> Option<UserProfile> {
        self.read().as_ref().map(|s| s.user.clone())
    }

    pub fn sign_in(&self, session: StoredSession) {
        if let Err(e) = self.persistence.save(&session) {
            tracing::warn!("Failed to persist session: {}", e);
        }
        *self.write() = Some(session);
        self.status_tx.send_replace(SessionStatus::SignedIn);
    }

    /// Swap in refreshed tokens. Returns false when there is no session to update.
    pub fn update_tokens(&self, access_token: String, refresh_token: Option<String>) -> bool {
        let updated = {
            let mut guard = self.write();
            match guard.as_mut() {
                Some(session) => {
                    session.access_token = access_token;
                    if refresh_token.is_some() {
                        session.refresh_token = refresh_token;
                    }
                    Some(session.clone())
                }
                None => None,
            }
        };
        match updated {
            Some(session) => {
                if let Err(e) = self.persistence.save(&session) {
                    tracing::warn!("Failed to persist refreshed token: {}", e);
                }
                true
            }
            None => false,
        }
    }

    /// Forget everything, in memory and on disk. Never fails.
    pub fn clear(&self) {
        *self.write() = None;
        if let Err(e) = self.persistence.clear() {
            tracing::warn!("Failed to remove persisted session: {}", e);
        }
        self.status_tx.send_replace(SessionStatus::SignedOut);
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionStatus> {
        self.status_tx.subscribe()
    }

    fn read(&self) -> RwLockReadGuard<'_, Option<StoredSession>> {
        self.cache.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Option<StoredSession>> {
        self.cache.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("signed_in", &self.read().is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn session(token: &str) -> StoredSession {
        StoredSession {
            access_token: token.to_string(),
            refresh_token: Some("refresh-1".to_string()),
            user: UserProfile {
                id: "u1".to_string(),
                email: "ann@acme.com".to_string(),
                name: "Ann".to_string(),
                domain: Some("acme.com".to_string()),
            },
        }
    }

    #[test]
    fn test_file_persistence_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("session.json");
        let persistence = FileSessionPersistence::new(&path);

        assert!(persistence.load().unwrap().is_none());
        persistence.save(&session("abc")).unwrap();
        assert_eq!(persistence.load().unwrap(), Some(session("abc")));

        persistence.clear().unwrap();
        assert!(!path.exists());
        // Clearing twice is fine
        persistence.clear().unwrap();
    }

    #[test]
    fn test_hydrate_reads_persisted_session() {
        let store = SessionStore::new(MemorySessionPersistence::with_session(session("abc")));
        assert!(store.access_token().is_none());

        let user = store.hydrate();
        assert_eq!(user.map(|u| u.email), Some("ann@acme.com".to_string()));
        assert_eq!(store.access_token().as_deref(), Some("abc"));
        assert_eq!(*store.subscribe().borrow(), SessionStatus::SignedIn);
    }

    #[test]
    fn test_hydrate_corrupt_file_is_anonymous() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = SessionStore::new(FileSessionPersistence::new(&path));
        assert!(store.hydrate().is_none());
        assert!(store.current().is_none());
    }

    #[test]
    fn test_update_tokens_keeps_refresh_when_not_rotated() {
        let store = SessionStore::in_memory();
        store.sign_in(session("old"));

        assert!(store.update_tokens("new".to_string(), None));
        assert_eq!(store.access_token().as_deref(), Some("new"));
        assert_eq!(store.refresh_token().as_deref(), Some("refresh-1"));
    }

    #[test]
    fn test_update_tokens_without_session() {
        let store = SessionStore::in_memory();
        assert!(!store.update_tokens("new".to_string(), None));
        assert!(store.current().is_none());
    }

    #[test]
    fn test_clear_signals_signed_out() {
        let store = SessionStore::in_memory();
        let rx = store.subscribe();
        store.sign_in(session("abc"));
        assert_eq!(*rx.borrow(), SessionStatus::SignedIn);

        store.clear();
        assert_eq!(*rx.borrow(), SessionStatus::SignedOut);
        assert!(store.user().is_none());
    }
}
