//! # Dimension Repository
//!
//! Single source of truth for the `GapAnalysis` collection, backed by one
//! blob in a `BlobStore`.
//!
//! ## Lazy Seed
//!
//! Until the first write, every read returns the seed collection without
//! persisting it. Seed fallback happens only when the key is absent; a key
//! holding an undecodable value is a `CorruptStoreError`.
//!
//! ## Concurrency
//!
//! `upsert` is a read-modify-write of the whole blob and is not atomic
//! across callers: two unserialized upserts on different dimensions can
//! lose one of the edits. The repository is meant to be driven by one
//! caller at a time. Shared use must wrap it in a lock held for the whole
//! read-validate-upsert sequence (the HTTP server uses a `RwLock` for this).

use crate::formats::{analysis_from_str, analysis_to_string};
use crate::primitives::DEFAULT_STORE_KEY;
use crate::storage::{BlobStore, StorageBackend};
use crate::{Action, Dimension, GapAnalysis, GapLevel, MaturityError, Priority, UpsertOutcome};

/// The collection returned while nothing has been persisted.
///
/// The stored gaps are kept exactly as shipped, even where they disagree
/// with the classifier.
#[must_use]
pub fn seed_analysis() -> GapAnalysis {
    let dimensions = vec![
        Dimension::from_parts(
            "Technology",
            1,
            3,
            GapLevel::High,
            vec![Action::new("Ready to continue!", Priority::FollowUp)],
        ),
        Dimension::from_parts("Digital Culture", 1, 2, GapLevel::High, Vec::new()),
        Dimension::from_parts("Skills", 3, 4, GapLevel::High, Vec::new()),
    ];
    GapAnalysis::from_dimensions(dimensions).unwrap_or_default()
}

/// Repository of dimension records over a blob store.
#[derive(Debug)]
pub struct DimensionRepository<S = StorageBackend> {
    /// The durable blob store.
    store: S,
    /// Key holding the whole collection.
    key: String,
}

impl<S: BlobStore + Default> Default for DimensionRepository<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<S: BlobStore> DimensionRepository<S> {
    /// Create a repository using the default store key.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_STORE_KEY)
    }

    /// Create a repository addressing a specific store key.
    #[must_use]
    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// The key holding the collection.
    #[must_use]
    pub fn store_key(&self) -> &str {
        &self.key
    }

    /// Get a reference to the underlying store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consume the repository, returning the store.
    #[must_use]
    pub fn into_store(self) -> S {
        self.store
    }

    /// Check whether a collection has been written to the store.
    pub fn is_persisted(&self) -> Result<bool, MaturityError> {
        Ok(self.store.get(&self.key)?.is_some())
    }

    // =========================================================================
    // READS
    // =========================================================================

    /// Get the whole collection.
    ///
    /// Returns the seed collection (without persisting it) when nothing has
    /// been written yet.
    pub fn fetch_all(&self) -> Result<GapAnalysis, MaturityError> {
        match self.store.get(&self.key)? {
            Some(blob) => analysis_from_str(&blob),
            None => Ok(seed_analysis()),
        }
    }

    /// Get one dimension by name.
    ///
    /// `None` means the dimension has never been edited; callers build a
    /// fresh record with `Dimension::new`.
    pub fn fetch_one(&self, name: &str) -> Result<Option<Dimension>, MaturityError> {
        let analysis = self.fetch_all()?;
        Ok(analysis.get(name).cloned())
    }

    // =========================================================================
    // WRITES
    // =========================================================================

    /// Replace the record with the same name in place, or append it, and
    /// write the whole collection back in one `set`.
    ///
    /// The record is stored as given: the gap is neither recomputed nor
    /// validated here.
    pub fn upsert(&mut self, dimension: Dimension) -> Result<UpsertOutcome, MaturityError> {
        let mut analysis = self.fetch_all()?;
        let outcome = analysis.upsert(dimension);
        let blob = analysis_to_string(&analysis)?;
        self.store.set(&self.key, &blob)?;
        Ok(outcome)
    }

    /// Persist the current collection as it reads now.
    ///
    /// On a fresh store this makes the seed collection durable.
    pub fn persist_current(&mut self) -> Result<usize, MaturityError> {
        let analysis = self.fetch_all()?;
        let blob = analysis_to_string(&analysis)?;
        self.store.set(&self.key, &blob)?;
        Ok(analysis.len())
    }
}

// =============================================================================
// TESTS
// =============================================================================
