//! # Persistence Boundary
//!
//! The key-value service the collection stores read from and write to.
//!
//! ## Why a Trait?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Persistence Injection                                │
//! │                                                                         │
//! │  CollectionStore<R> ──────► dyn KeyValueStore                           │
//! │                                   │                                     │
//! │                 ┌─────────────────┼──────────────────┐                  │
//! │                 ▼                 ▼                  ▼                  │
//! │          ┌─────────────┐   ┌─────────────┐    ┌──────────────┐         │
//! │          │ MemoryStore │   │  FileStore  │    │ (webview     │         │
//! │          │ (tests)     │   │ (one .json  │    │  localStorage│         │
//! │          │             │   │  per key)   │    │  adapter)    │         │
//! │          └─────────────┘   └─────────────┘    └──────────────┘         │
//! │                                                                         │
//! │  The stores never know which backend they talk to, so every store      │
//! │  test runs against MemoryStore with no environment setup.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Contract
//! `get` returns the raw text previously written for a key, or `None` when
//! nothing was ever written. `set` replaces the whole value. There are no
//! transactions and no partial writes; callers always write complete
//! collection blobs.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Mutex;

use thiserror::Error;
use tracing::debug;

// =============================================================================
// Error Type
// =============================================================================

/// Failures at the key-value layer.
///
/// Collection stores log these and fall back to in-memory state; they are
/// never surfaced to the user.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Underlying I/O failure (file unreadable, disk full, ...).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Key contains characters the backend cannot represent.
    #[error("invalid storage key: {0}")]
    InvalidKey(String),
}

/// Result type for persistence operations.
pub type PersistenceResult<T> = Result<T, PersistenceError>;

// =============================================================================
// KeyValueStore Trait
// =============================================================================

/// An opaque key-value persistence service.
///
/// Mirrors the `get(key) -> text | null` / `set(key, text)` surface of
/// browser-local storage. Implementations must be shareable across the
/// stores (`Send + Sync`).
pub trait KeyValueStore: Send + Sync {
    /// Reads the raw text stored under `key`, or `None` if absent.
    fn get(&self, key: &str) -> PersistenceResult<Option<String>>;

    /// Replaces the value stored under `key`.
    fn set(&self, key: &str, value: &str) -> PersistenceResult<()>;
}

// =============================================================================
// MemoryStore
// =============================================================================

/// In-memory backend. The default for tests; also usable as a scratch
/// session with no persistence at all.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Creates an empty in-memory store.
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> PersistenceResult<Option<String>> {
        let entries = self.entries.lock().expect("memory store mutex poisoned");
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> PersistenceResult<()> {
        let mut entries = self.entries.lock().expect("memory store mutex poisoned");
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// =============================================================================
// FileStore
// =============================================================================

/// File-backed backend: one `<key>.json` file per collection inside the
/// application data directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Opens (creating if needed) a file store rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> PersistenceResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        debug!(dir = %dir.display(), "file store opened");
        Ok(FileStore { dir })
    }

    /// Maps a collection key to its backing file.
    ///
    /// Keys are the fixed collection names; anything that could escape the
    /// store directory is rejected.
    fn path_for(&self, key: &str) -> PersistenceResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(PersistenceError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> PersistenceResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> PersistenceResult<()> {
        let path = self.path_for(key)?;
        fs::write(&path, value)?;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
