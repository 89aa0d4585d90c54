use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use log::warn;

use crate::filelock::{read_file_lock, write_file_lock};
use crate::types::auth::LoginResponse;

/// Storage key holding the bearer token.
pub const TOKEN_KEY: &str = "authToken";

/// Storage key holding the cached session snapshot.
pub const USER_KEY: &str = "currentUser";

/// Durable client-side key/value store backing the session. Failures are
/// logged and swallowed: losing a cached credential is recoverable (the user
/// logs in again), so storage is best-effort by contract.
pub trait Storage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// File-backed storage, one lock-guarded file per key under the data
/// directory.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn key_path(&self, key: &str) -> String {
        format!("{}", self.dir.join(key).display())
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        let path = self.key_path(key);
        match read_file_lock(&path) {
            Ok(Some(data)) => match String::from_utf8(data) {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!("Storage key '{key}' has invalid data, ignoring it");
                    None
                }
            },
            Ok(None) => None,
            Err(err) => {
                warn!("Read storage key '{key}' error: {err:#}");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) {
        let path = self.key_path(key);
        if let Err(err) = write_file_lock(&path, value.as_bytes()) {
            warn!("Write storage key '{key}' error: {err:#}");
        }
    }

    fn remove(&self, key: &str) {
        let path = self.key_path(key);
        match fs::remove_file(&path) {
            Ok(()) => {}
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => warn!("Remove storage key '{key}' error: {err:#}"),
        }
    }
}

/// In-memory storage, used by tests and short-lived embedders.
#[derive(Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.lock().unwrap().remove(key);
    }
}

struct SessionState {
    token: Option<String>,
    hydrated: bool,
}

/// Owned session credential store. Keeps the bearer token in memory, mirrors
/// every write to durable storage, and hydrates lazily (once) from storage
/// on first read. The cached user snapshot shares the same storage.
#[derive(Clone)]
pub struct Session {
    storage: Arc<dyn Storage>,
    state: Arc<Mutex<SessionState>>,
}

impl Session {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage,
            state: Arc::new(Mutex::new(SessionState {
                token: None,
                hydrated: false,
            })),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }

    /// Sets the in-memory token and mirrors the change to storage. Passing
    /// `None` removes the stored key.
    pub fn set_token(&self, token: Option<String>) {
        let mut state = self.state.lock().unwrap();
        state.hydrated = true;
        state.token = token.clone();
        drop(state);

        match token {
            Some(token) => self.storage.set(TOKEN_KEY, &token),
            None => self.storage.remove(TOKEN_KEY),
        }
    }

    /// Returns the current token, hydrating once from storage if no value
    /// has been set in this process yet.
    pub fn token(&self) -> Option<String> {
        let mut state = self.state.lock().unwrap();
        if state.token.is_none() && !state.hydrated {
            state.token = self.storage.get(TOKEN_KEY);
            state.hydrated = true;
        }
        state.token.clone()
    }

    pub fn clear_token(&self) {
        self.set_token(None);
    }

    pub fn set_user(&self, user: &LoginResponse) {
        let data = serde_json::to_string(user).unwrap();
        self.storage.set(USER_KEY, &data);
    }

    /// Reads the cached session snapshot. Unreadable snapshot data is
    /// treated as absent.
    pub fn user(&self) -> Option<LoginResponse> {
        let data = self.storage.get(USER_KEY)?;
        match serde_json::from_str(&data) {
            Ok(user) => Some(user),
            Err(_) => {
                warn!("Stored session snapshot has invalid data, ignoring it");
                None
            }
        }
    }

    pub fn clear_user(&self) {
        self.storage.remove(USER_KEY);
    }
}

#[cfg(test)]
mod tests {
    use crate::types::user::{UserRole, UserStatus};

    use super::*;

    fn mock_user() -> LoginResponse {
        LoginResponse {
            token: String::from("tok-123"),
            user_id: 42,
            name: String::from("Agnes"),
            role: UserRole::Client,
            status: UserStatus::Active,
        }
    }

    #[test]
    fn test_set_and_get_token() {
        let session = Session::in_memory();
        assert_eq!(session.token(), None);

        session.set_token(Some(String::from("tok-abc")));
        assert_eq!(session.token(), Some(String::from("tok-abc")));

        session.set_token(None);
        assert_eq!(session.token(), None);
    }

    #[test]
    fn test_clear_token_removes_stored_value() {
        let storage = Arc::new(MemoryStorage::new());
        let session = Session::new(storage.clone());

        session.set_token(Some(String::from("tok-abc")));
        assert_eq!(storage.get(TOKEN_KEY).as_deref(), Some("tok-abc"));

        session.clear_token();
        assert_eq!(storage.get(TOKEN_KEY), None);
        assert_eq!(session.token(), None);
    }

    #[test]
    fn test_hydrates_once_from_storage() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(TOKEN_KEY, "persisted");

        let session = Session::new(storage.clone());
        assert_eq!(session.token(), Some(String::from("persisted")));

        // External storage mutation is not observed after hydration.
        storage.remove(TOKEN_KEY);
        assert_eq!(session.token(), Some(String::from("persisted")));
    }

    #[test]
    fn test_user_snapshot_roundtrip() {
        let session = Session::in_memory();
        assert!(session.user().is_none());

        let user = mock_user();
        session.set_user(&user);
        assert_eq!(session.user(), Some(user));

        session.clear_user();
        assert!(session.user().is_none());
    }

    #[test]
    fn test_invalid_snapshot_is_ignored() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(USER_KEY, "{not json");

        let session = Session::new(storage);
        assert!(session.user().is_none());
    }
}
