//! # Persistence Format
//!
//! JSON encoding of a `GapAnalysis` for the durable blob.
//!
//! Format: `{"dimensions": [{"name", "currentState", "desiredState", "gap",
//! "customizedActions": [{"action", "priority"}]}]}`.
//!
//! This is a pure transformation - no store I/O.
//!
//! ## Decoding
//!
//! The blob size is checked before parsing, and duplicate dimension names
//! are rejected after parsing. Any decode failure is reported as
//! `MaturityError::CorruptStoreError` so callers can tell a damaged store
//! from an empty one.

use crate::primitives::MAX_BLOB_SIZE;
use crate::{Dimension, GapAnalysis, MaturityError};
use serde::Deserialize;

/// Decoding shape of the persisted blob.
#[derive(Deserialize)]
struct StoredAnalysis {
    dimensions: Vec<Dimension>,
}

/// Encode a gap analysis as the persisted text form.
pub fn analysis_to_string(analysis: &GapAnalysis) -> Result<String, MaturityError> {
    serde_json::to_string(analysis).map_err(|e| MaturityError::SerializationError(e.to_string()))
}

/// Decode a gap analysis from the persisted text form.
pub fn analysis_from_str(blob: &str) -> Result<GapAnalysis, MaturityError> {
    if blob.len() > MAX_BLOB_SIZE {
        return Err(MaturityError::CorruptStoreError(format!(
            "Stored value size {} bytes exceeds maximum allowed {} bytes",
            blob.len(),
            MAX_BLOB_SIZE
        )));
    }

    let stored: StoredAnalysis = serde_json::from_str(blob).map_err(|e| {
        MaturityError::CorruptStoreError(format!("Failed to decode gap analysis: {}", e))
    })?;

    GapAnalysis::from_dimensions(stored.dimensions).map_err(|e| match e {
        MaturityError::DuplicateDimension(name) => {
            MaturityError::CorruptStoreError(format!("Duplicate dimension in store: {}", name))
        }
        other => other,
    })
}

// =============================================================================
// TESTS
// =============================================================================
