//! Persistent key-value storage for the session token, the signed-in user,
//! and the install-prompt dismissal flag.
//!
//! The [`KeyValueStore`] trait is the injection seam: [`MemoryStore`] backs
//! tests, [`FileStore`] persists to a JSON file on disk. [`Session`] layers
//! the typed accessors the rest of the SDK uses on top of any store.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::config;
use crate::error::{Result, SdkError};
use crate::models::ApiUser;

/// String-to-string storage with no expiry.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

/// In-process store; contents are lost when dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| SdkError::InvalidArgument("store lock poisoned".into()))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// FileStore
// ---------------------------------------------------------------------------

/// Store backed by a single `store.json` file in a directory.
///
/// Every write rewrites the whole file through a temp file in the same
/// directory that is renamed into place, so a crash never leaves a
/// half-written file behind.
#[derive(Debug)]
pub struct FileStore {
    /// Directory holding `store.json`.
    pub dir: PathBuf,
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    /// Open (or create) a store in `dir`.
    ///
    /// If `dir` is `None`, uses the platform data directory. A corrupt
    /// store file is discarded and the store starts empty.
    pub fn open(dir: Option<PathBuf>) -> Result<Self> {
        let dir = dir.unwrap_or_else(config::default_store_dir);
        fs::create_dir_all(&dir)?;
        let path = dir.join("store.json");
        let entries = Self::load(&path)?;
        Ok(Self {
            dir,
            path,
            entries: Mutex::new(entries),
        })
    }

    fn load(path: &Path) -> Result<BTreeMap<String, String>> {
        if !path.exists() {
            return Ok(BTreeMap::new());
        }
        let contents = fs::read_to_string(path)?;
        match serde_json::from_str(&contents) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                log::warn!("Corrupt store file {}: {} -- removing", path.display(), e);
                if let Err(e) = fs::remove_file(path) {
                    log::warn!("Could not remove corrupt store file {}: {}", path.display(), e);
                }
                Ok(BTreeMap::new())
            }
        }
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(serde_json::to_string_pretty(entries)?.as_bytes())?;
        tmp.persist(&self.path).map_err(|e| SdkError::Io(e.error))?;
        Ok(())
    }

    fn update<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(&mut BTreeMap<String, String>),
    {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| SdkError::InvalidArgument("store lock poisoned".into()))?;
        let mut next = entries.clone();
        f(&mut next);
        self.persist(&next)?;
        *entries = next;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| SdkError::InvalidArgument("store lock poisoned".into()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.update(|e| {
            e.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.update(|e| {
            e.remove(key);
        })
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Typed view over a [`KeyValueStore`].
///
/// The token is assumed valid until the API answers 401; nothing here
/// tracks expiry.
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn KeyValueStore>,
}

impl Session {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn token(&self) -> Result<Option<String>> {
        self.store.get(config::TOKEN_KEY)
    }

    pub fn is_logged_in(&self) -> Result<bool> {
        Ok(self.token()?.is_some())
    }

    /// Persist the application token and the user profile.
    pub fn login(&self, user: &ApiUser, token: &str) -> Result<()> {
        self.store.set(config::TOKEN_KEY, token)?;
        self.store
            .set(config::USER_KEY, &serde_json::to_string(user)?)?;
        Ok(())
    }

    pub fn logout(&self) -> Result<()> {
        self.store.remove(config::TOKEN_KEY)?;
        self.store.remove(config::USER_KEY)
    }

    /// The stored profile, if any. An unreadable profile is treated as absent.
    pub fn current_user(&self) -> Result<Option<ApiUser>> {
        let Some(raw) = self.store.get(config::USER_KEY)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                log::warn!("Stored user profile is unreadable: {}", e);
                Ok(None)
            }
        }
    }

    pub fn is_install_prompt_dismissed(&self) -> Result<bool> {
        Ok(self.store.get(config::INSTALL_DISMISSED_KEY)?.is_some())
    }

    /// Hide the install banner for good.
    pub fn dismiss_install_prompt(&self) -> Result<()> {
        self.store.set(config::INSTALL_DISMISSED_KEY, "true")
    }

    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }
}
