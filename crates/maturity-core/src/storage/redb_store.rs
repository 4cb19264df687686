//! # redb-backed Blob Store
//!
//! A disk-backed blob store using the redb embedded database, providing:
//! - ACID transactions (every `set` is one write transaction)
//! - Crash safety (copy-on-write B-trees)
//! - Zero configuration
//!
//! ## Integration with the Repository
//!
//! `RedbStore` is the `Persistent` variant of `StorageBackend`. The gap
//! analysis collection is one row of the `blobs` table.

use super::BlobStore;
use crate::MaturityError;
use redb::{Database, ReadableDatabase, TableDefinition, TableError};
use std::path::Path;

/// Table for blobs: key string -> value string
const BLOBS: TableDefinition<&str, &str> = TableDefinition::new("blobs");

/// A disk-backed blob store using redb.
pub struct RedbStore {
    /// The redb database handle.
    db: Database,
}

impl std::fmt::Debug for RedbStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedbStore").finish_non_exhaustive()
    }
}

impl RedbStore {
    /// Open or create a blob database at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, MaturityError> {
        let db =
            Database::create(path.as_ref()).map_err(|e| MaturityError::IoError(e.to_string()))?;

        // Initialize the table if it doesn't exist
        {
            let write_txn = db
                .begin_write()
                .map_err(|e| MaturityError::IoError(e.to_string()))?;
            let _ = write_txn
                .open_table(BLOBS)
                .map_err(|e| MaturityError::IoError(e.to_string()))?;
            write_txn
                .commit()
                .map_err(|e| MaturityError::IoError(e.to_string()))?;
        }

        Ok(Self { db })
    }
}

impl BlobStore for RedbStore {
    fn get(&self, key: &str) -> Result<Option<String>, MaturityError> {
        let read_txn = self
            .db
            .begin_read()
            .map_err(|e| MaturityError::IoError(e.to_string()))?;

        let table = match read_txn.open_table(BLOBS) {
            Ok(table) => table,
            Err(TableError::TableDoesNotExist(_)) => return Ok(None),
            Err(e) => return Err(MaturityError::IoError(e.to_string())),
        };

        let value = table
            .get(key)
            .map_err(|e| MaturityError::IoError(e.to_string()))?
            .map(|guard| guard.value().to_string());
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), MaturityError> {
        let write_txn = self
            .db
            .begin_write()
            .map_err(|e| MaturityError::PersistenceError(e.to_string()))?;
        {
            let mut table = write_txn
                .open_table(BLOBS)
                .map_err(|e| MaturityError::PersistenceError(e.to_string()))?;
            table
                .insert(key, value)
                .map_err(|e| MaturityError::PersistenceError(e.to_string()))?;
        }
        write_txn
            .commit()
            .map_err(|e| MaturityError::PersistenceError(e.to_string()))
    }
}

// =============================================================================
// TESTS
// =============================================================================
