//! # File-backed Blob Store
//!
//! Keeps every key in one JSON object file: `{"<key>": "<value>", ...}`.
//!
//! A missing file is an empty store; any other read failure is an error.
//! Files larger than `MAX_BLOB_SIZE` are rejected before they are read.
//! Writes go to a sibling temp file which
//! is then renamed over the original, so readers never see a half-written
//! file.

use super::BlobStore;
use crate::MaturityError;
use crate::primitives::MAX_BLOB_SIZE;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::PathBuf;

/// Blob store persisted as a single JSON file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store at `path`. The file is created on first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>, MaturityError> {
        let read_error =
            |e: std::io::Error| MaturityError::IoError(format!("Read {:?}: {}", self.path, e));

        let mut file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(read_error(e)),
        };

        let size = file.metadata().map_err(read_error)?.len();
        let max_size = u64::try_from(MAX_BLOB_SIZE).unwrap_or(u64::MAX);
        if size > max_size {
            return Err(MaturityError::CorruptStoreError(format!(
                "Store file {:?} is {} bytes, maximum is {} bytes",
                self.path, size, MAX_BLOB_SIZE
            )));
        }

        let mut data = String::new();
        file.read_to_string(&mut data).map_err(read_error)?;
        serde_json::from_str(&data).map_err(|e| {
            MaturityError::CorruptStoreError(format!("Store file {:?} is not valid: {}", self.path, e))
        })
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl BlobStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, MaturityError> {
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), MaturityError> {
        let mut entries = self.read_entries()?;
        entries.insert(key.to_string(), value.to_string());

        let data = serde_json::to_vec_pretty(&entries)
            .map_err(|e| MaturityError::SerializationError(e.to_string()))?;

        let temp = self.temp_path();
        std::fs::write(&temp, &data)
            .map_err(|e| MaturityError::PersistenceError(format!("Write {:?}: {}", temp, e)))?;
        std::fs::rename(&temp, &self.path).map_err(|e| {
            let _ = std::fs::remove_file(&temp);
            MaturityError::PersistenceError(format!("Replace {:?}: {}", self.path, e))
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileStore::new(dir.path().join("store.json"));
        assert_eq!(store.get("gapAnalysis").expect("get"), None);
    }

    #[test]
    fn set_then_get_survives_reopen() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("store.json");

        let mut store = FileStore::new(&path);
        store.set("a", "1").expect("set");
        store.set("b", "2").expect("set");

        let reopened = FileStore::new(&path);
        assert_eq!(reopened.get("a").expect("get").as_deref(), Some("1"));
        assert_eq!(reopened.get("b").expect("get").as_deref(), Some("2"));
        assert!(!dir.path().join("store.json.tmp").exists());
    }

    #[test]
    fn unparsable_file_is_corrupt() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("store.json");
        std::fs::write(&path, "{{{").expect("write");

        let store = FileStore::new(&path);
        assert!(matches!(
            store.get("a"),
            Err(MaturityError::CorruptStoreError(_))
        ));
    }

    #[test]
    fn write_into_missing_directory_fails() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = FileStore::new(dir.path().join("missing").join("store.json"));
        assert!(matches!(
            store.set("a", "1"),
            Err(MaturityError::PersistenceError(_))
        ));
    }

    #[test]
    fn unreadable_path_is_an_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").expect("write");

        let store = FileStore::new(blocker.join("store.json"));
        assert!(matches!(store.get("a"), Err(MaturityError::IoError(_))));
    }

    #[test]
    fn oversized_file_is_rejected_before_reading() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("store.json");
        let file = File::create(&path).expect("create");
        let oversized = u64::try_from(MAX_BLOB_SIZE).expect("fits") + 1;
        file.set_len(oversized).expect("set_len");

        let store = FileStore::new(&path);
        assert!(matches!(
            store.get("a"),
            Err(MaturityError::CorruptStoreError(_))
        ));
    }
}
