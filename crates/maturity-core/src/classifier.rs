//! # Gap Classifier
//!
//! Maps a (current, desired) pair of maturity levels to a severity.
//!
//! | delta = desired - current | severity |
//! |---------------------------|----------|
//! | > 2                       | HIGH     |
//! | 2                         | MEDIUM   |
//! | <= 1 (negative included)  | LOW      |
//!
//! The function is total over all integer pairs. It does not check the
//! 1..=5 scale, and a desired level below the current one classifies as
//! LOW. Callers gate that combination before persisting; the classifier
//! keeps the boundary as is because stored records depend on it.

use crate::GapLevel;
use crate::primitives::{HIGH_GAP_THRESHOLD, MEDIUM_GAP_THRESHOLD};

/// Classify the gap between a current and a desired maturity level.
#[must_use]
pub fn classify(current_state: i32, desired_state: i32) -> GapLevel {
    // Widened so extreme inputs cannot overflow.
    let delta = i64::from(desired_state) - i64::from(current_state);

    if delta > HIGH_GAP_THRESHOLD {
        GapLevel::High
    } else if delta > MEDIUM_GAP_THRESHOLD {
        GapLevel::Medium
    } else {
        GapLevel::Low
    }
}
