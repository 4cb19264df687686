//! # Reference Data Store
//!
//! Static maturity scales and recommendations, compiled into the binary.
//!
//! Lookups are pure and never fail: an unknown dimension yields an empty
//! level slice or `None`. An empty `levels_for` result is how callers tell
//! that a dimension name is not supported.

mod catalog;

use crate::{GapLevel, MaturityLevelDefinition, Recommendation};
use catalog::{CATALOG, ReferenceDimension};

fn find(dimension: &str) -> Option<&'static ReferenceDimension> {
    CATALOG.iter().find(|d| d.name == dimension)
}

/// The five level definitions of a dimension, lowest first.
#[must_use]
pub fn levels_for(dimension: &str) -> &'static [MaturityLevelDefinition] {
    find(dimension).map(|d| &d.levels[..]).unwrap_or(&[])
}

/// The recommendation for a dimension at a given severity.
#[must_use]
pub fn recommendation_for(dimension: &str, severity: GapLevel) -> Option<&'static Recommendation> {
    let reference = find(dimension)?;
    Some(match severity {
        GapLevel::High => &reference.high,
        GapLevel::Medium => &reference.medium,
        GapLevel::Low => &reference.low,
    })
}

/// The definition of one level of a dimension.
#[must_use]
pub fn level_definition(dimension: &str, level: i32) -> Option<&'static MaturityLevelDefinition> {
    levels_for(dimension).iter().find(|l| l.level == level)
}

/// Display name of a level, or `"Level N"` when there is no definition.
#[must_use]
pub fn level_name(dimension: &str, level: i32) -> String {
    level_definition(dimension, level)
        .map(|l| l.name.to_string())
        .unwrap_or_else(|| format!("Level {}", level))
}

/// Names of all dimensions with reference data, in catalog order.
pub fn dimension_names() -> impl Iterator<Item = &'static str> {
    CATALOG.iter().map(|d| d.name)
}

/// Whether a dimension has reference data.
#[must_use]
pub fn is_supported(dimension: &str) -> bool {
    !levels_for(dimension).is_empty()
}
