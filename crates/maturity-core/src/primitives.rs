//! # Primitives
//!
//! Hardcoded runtime constants for the Maturity CORE.
//!
//! These values are compiled into the binary and are immutable at runtime.
//! Configuration may choose a different store key, but never a different scale.

/// Lowest maturity level on the assessment scale.
pub const MIN_LEVEL: i32 = 1;

/// Highest maturity level on the assessment scale.
pub const MAX_LEVEL: i32 = 5;

/// Gap deltas strictly above this value classify as HIGH.
pub const HIGH_GAP_THRESHOLD: i64 = 2;

/// Gap deltas strictly above this value (and not HIGH) classify as MEDIUM.
pub const MEDIUM_GAP_THRESHOLD: i64 = 1;

/// Key under which the whole gap analysis collection is persisted.
///
/// The collection lives in one blob; there is no per-dimension key.
pub const DEFAULT_STORE_KEY: &str = "gapAnalysis";

// =============================================================================
// INPUT VALIDATION LIMITS
// =============================================================================

/// Maximum size of a persisted blob (16 MiB).
///
/// The file store checks the file length before reading it. The decoder
/// checks again before parsing, which covers values returned by redb.
pub const MAX_BLOB_SIZE: usize = 16 * 1024 * 1024;

/// Check that a level lies on the 1..=5 scale.
#[must_use]
pub const fn is_valid_level(level: i32) -> bool {
    level >= MIN_LEVEL && level <= MAX_LEVEL
}
