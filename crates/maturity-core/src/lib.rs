//! # maturity-core
//!
//! The gap analysis engine for Maturity - THE LOGIC.
//!
//! An organization rates itself on named dimensions ("Technology",
//! "Digital Culture", "Skills") on a 1..=5 maturity scale. This crate
//! classifies the gap between current and desired maturity and keeps the
//! assessed dimensions persisted in a single blob.
//!
//! ## Layout
//!
//! - `reference` → static maturity scales and recommendations
//! - `classifier` → (current, desired) → HIGH / MEDIUM / LOW
//! - `formats` → text encoding of the collection
//! - `storage` → blob stores (memory, file, redb)
//! - `repository` → fetch / upsert with lazy seeding
//! - `report` → a stored dimension decorated for display
//!
//! ## Architectural Constraints
//!
//! - No async, no network dependencies, no logging dependency
//! - Reference lookups and the classifier never fail
//! - Every other failure is a `MaturityError`; nothing is swallowed

// =============================================================================
// MODULES
// =============================================================================

pub mod classifier;
pub mod formats;
pub mod primitives;
pub mod reference;
pub mod report;
pub mod repository;
pub mod storage;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{
    Action, Dimension, GapAnalysis, GapLevel, MaturityError, MaturityLevelDefinition, Priority,
    Recommendation, UpsertOutcome,
};

// =============================================================================
// RE-EXPORTS: Engine
// =============================================================================

pub use classifier::classify;
pub use formats::{analysis_from_str, analysis_to_string};
pub use report::DimensionReport;
pub use repository::{DimensionRepository, seed_analysis};
pub use storage::{BlobStore, FileStore, MemoryStore, RedbStore, StorageBackend};
