//! # Storage Module
//!
//! Durable blob backends addressed by a single string key.

mod blob;
mod file_store;
mod redb_store;

pub use blob::{BlobStore, MemoryStore, StorageBackend};
pub use file_store::FileStore;
pub use redb_store::RedbStore;
