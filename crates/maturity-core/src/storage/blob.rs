//! # Blob Store
//!
//! The durable blob interface and the backend dispatch used by the repository.
//!
//! ## Storage Backends
//!
//! - `InMemory`: `MemoryStore` (fast, volatile)
//! - `File`: `FileStore` (one JSON file, atomic replace on write)
//! - `Persistent`: `RedbStore` (redb database, ACID writes)

use super::{FileStore, RedbStore};
use crate::MaturityError;
use std::collections::BTreeMap;
use std::path::Path;

// =============================================================================
// BLOBSTORE TRAIT
// =============================================================================

/// A key-value store of strings.
///
/// Read failures are `MaturityError::IoError`; write failures are
/// `MaturityError::PersistenceError` and leave the previous value in place.
pub trait BlobStore {
    /// Get the value stored under `key`, or `None` if the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>, MaturityError>;

    /// Replace the value stored under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<(), MaturityError>;
}

// =============================================================================
// MEMORY STORE
// =============================================================================

/// Volatile in-memory blob store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding one entry.
    #[must_use]
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(key.into(), value.into());
        Self { entries }
    }
}

impl BlobStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, MaturityError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), MaturityError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// =============================================================================
// BACKEND DISPATCH
// =============================================================================

/// Storage backend selected at startup.
#[derive(Debug)]
pub enum StorageBackend {
    /// In-memory store (fast, volatile).
    InMemory(MemoryStore),
    /// Single JSON file.
    File(FileStore),
    /// Disk-backed store using redb (ACID, persistent).
    Persistent(RedbStore),
}

impl Default for StorageBackend {
    fn default() -> Self {
        Self::InMemory(MemoryStore::new())
    }
}

// NOTE: StorageBackend does NOT implement Clone.
// RedbStore (database handle) cannot be safely cloned.

impl StorageBackend {
    /// Names accepted by `open`.
    pub const NAMES: [&'static str; 3] = ["memory", "file", "redb"];

    /// Open the backend named `backend` at `path`.
    ///
    /// `memory` ignores the path.
    pub fn open(backend: &str, path: impl AsRef<Path>) -> Result<Self, MaturityError> {
        match backend {
            "memory" => Ok(Self::InMemory(MemoryStore::new())),
            "file" => Ok(Self::File(FileStore::new(path.as_ref()))),
            "redb" => Ok(Self::Persistent(RedbStore::open(path)?)),
            other => Err(MaturityError::ConfigError(format!(
                "Unknown backend: {}. Use: {}",
                other,
                Self::NAMES.join(", ")
            ))),
        }
    }

    /// Short name of the backend.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::InMemory(_) => "memory",
            Self::File(_) => "file",
            Self::Persistent(_) => "redb",
        }
    }

    /// Check if the backend survives process restarts.
    #[must_use]
    pub fn is_durable(&self) -> bool {
        !matches!(self, Self::InMemory(_))
    }
}

impl BlobStore for StorageBackend {
    fn get(&self, key: &str) -> Result<Option<String>, MaturityError> {
        match self {
            Self::InMemory(store) => store.get(key),
            Self::File(store) => store.get(key),
            Self::Persistent(store) => store.get(key),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), MaturityError> {
        match self {
            Self::InMemory(store) => store.set(key, value),
            Self::File(store) => store.set(key, value),
            Self::Persistent(store) => store.set(key, value),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
