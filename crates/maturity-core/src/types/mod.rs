//! # Core Type Definitions
//!
//! This module contains all core types for the Maturity gap analysis:
//! - Severity and priority enums (`GapLevel`, `Priority`)
//! - Stored records (`Action`, `Dimension`, `GapAnalysis`)
//! - Static reference records (`MaturityLevelDefinition`, `Recommendation`)
//! - Error types (`MaturityError`)
//!
//! ## Gap Invariant
//!
//! `Dimension::gap` is derived from the two state values. Every mutator on
//! `Dimension` that touches a state recomputes it; the only ways to hold a
//! record whose gap disagrees with the classifier are `Dimension::from_parts`
//! and decoding a persisted blob, both of which trust the stored value.

use crate::classifier::classify;
use crate::primitives::{MIN_LEVEL, is_valid_level};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// =============================================================================
// GAP LEVEL
// =============================================================================

/// Classified size of the difference between desired and current maturity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GapLevel {
    Low,
    Medium,
    High,
}

impl GapLevel {
    /// Wire name of the severity.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            GapLevel::Low => "LOW",
            GapLevel::Medium => "MEDIUM",
            GapLevel::High => "HIGH",
        }
    }
}

impl fmt::Display for GapLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GapLevel {
    type Err = MaturityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "LOW" => Ok(GapLevel::Low),
            "MEDIUM" => Ok(GapLevel::Medium),
            "HIGH" => Ok(GapLevel::High),
            other => Err(MaturityError::SerializationError(format!(
                "Unknown gap level: {}. Use: HIGH, MEDIUM, LOW",
                other
            ))),
        }
    }
}

// =============================================================================
// PRIORITY
// =============================================================================

/// Priority of an action or recommendation.
///
/// Persisted as `"URGENT"`, `"IMPORTANT"` and `"FOLLOW UP"`.
///
/// New actions default to IMPORTANT.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum Priority {
    #[serde(rename = "URGENT")]
    Urgent,
    #[default]
    #[serde(rename = "IMPORTANT")]
    Important,
    #[serde(rename = "FOLLOW UP", alias = "FOLLOW_UP")]
    FollowUp,
}

impl Priority {
    /// Wire name of the priority.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Urgent => "URGENT",
            Priority::Important => "IMPORTANT",
            Priority::FollowUp => "FOLLOW UP",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = MaturityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .collect::<String>()
            .to_ascii_uppercase();
        match normalized.as_str() {
            "URGENT" => Ok(Priority::Urgent),
            "IMPORTANT" => Ok(Priority::Important),
            "FOLLOWUP" => Ok(Priority::FollowUp),
            _ => Err(MaturityError::SerializationError(format!(
                "Unknown priority: {}. Use: urgent, important, follow-up",
                s
            ))),
        }
    }
}

// =============================================================================
// REFERENCE RECORDS
// =============================================================================

/// Definition of one level of a dimension's maturity scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MaturityLevelDefinition {
    pub level: i32,
    pub name: &'static str,
    pub description: &'static str,
}

/// Recommended actions for one (dimension, severity) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub actions: &'static [&'static str],
    pub priority: Priority,
}

// =============================================================================
// ACTION
// =============================================================================

/// A remediation action customized by the user for one dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// Free-text description of the action.
    pub action: String,
    /// How soon the action should be taken.
    pub priority: Priority,
}

impl Action {
    /// Create a new action.
    #[must_use]
    pub fn new(action: impl Into<String>, priority: Priority) -> Self {
        Self {
            action: action.into(),
            priority,
        }
    }
}

// =============================================================================
// DIMENSION
// =============================================================================

/// One assessed dimension: current and desired maturity, gap, custom actions.
///
/// Field names on the wire are `name`, `currentState`, `desiredState`, `gap`
/// and `customizedActions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dimension {
    name: String,
    current_state: i32,
    desired_state: i32,
    gap: GapLevel,
    customized_actions: Vec<Action>,
}

impl Dimension {
    /// Fresh record for a dimension that has never been edited:
    /// current 1, desired 1, gap LOW, no actions.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_states(name, MIN_LEVEL, MIN_LEVEL)
    }

    /// Record with the given states and a classified gap.
    #[must_use]
    pub fn with_states(name: impl Into<String>, current_state: i32, desired_state: i32) -> Self {
        Self {
            name: name.into(),
            current_state,
            desired_state,
            gap: classify(current_state, desired_state),
            customized_actions: Vec::new(),
        }
    }

    /// Record built from stored parts. The gap is taken as given.
    #[must_use]
    pub fn from_parts(
        name: impl Into<String>,
        current_state: i32,
        desired_state: i32,
        gap: GapLevel,
        customized_actions: Vec<Action>,
    ) -> Self {
        Self {
            name: name.into(),
            current_state,
            desired_state,
            gap,
            customized_actions,
        }
    }

    /// Replace the customized actions (builder form).
    #[must_use]
    pub fn with_actions(mut self, actions: Vec<Action>) -> Self {
        self.customized_actions = actions;
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn current_state(&self) -> i32 {
        self.current_state
    }

    #[must_use]
    pub fn desired_state(&self) -> i32 {
        self.desired_state
    }

    /// The gap as stored on this record.
    #[must_use]
    pub fn gap(&self) -> GapLevel {
        self.gap
    }

    #[must_use]
    pub fn customized_actions(&self) -> &[Action] {
        &self.customized_actions
    }

    /// Set both states and recompute the gap.
    pub fn set_states(&mut self, current_state: i32, desired_state: i32) {
        self.current_state = current_state;
        self.desired_state = desired_state;
        self.recompute_gap();
    }

    /// Recompute the gap from the current states.
    pub fn recompute_gap(&mut self) {
        self.gap = classify(self.current_state, self.desired_state);
    }

    /// Whether the stored gap agrees with the classifier.
    #[must_use]
    pub fn is_gap_consistent(&self) -> bool {
        self.gap == classify(self.current_state, self.desired_state)
    }

    /// Check the levels are on the scale and desired is not below current.
    ///
    /// This is the gate callers run before persisting an edit.
    pub fn validate(&self) -> Result<(), MaturityError> {
        for level in [self.current_state, self.desired_state] {
            if !is_valid_level(level) {
                return Err(MaturityError::InvalidLevel(level));
            }
        }
        if self.desired_state < self.current_state {
            return Err(MaturityError::ValidationError {
                current: self.current_state,
                desired: self.desired_state,
            });
        }
        Ok(())
    }

    /// Append an action. The text is trimmed; blank text is rejected.
    pub fn add_action(
        &mut self,
        text: &str,
        priority: Priority,
    ) -> Result<&Action, MaturityError> {
        let action = validate_action_text(text)?;
        self.customized_actions.push(Action::new(action, priority));
        let index = self.customized_actions.len() - 1;
        Ok(&self.customized_actions[index])
    }

    /// Remove the action at `index`, keeping the order of the rest.
    ///
    /// Returns `None` when the index is out of range.
    pub fn remove_action(&mut self, index: usize) -> Option<Action> {
        if index < self.customized_actions.len() {
            Some(self.customized_actions.remove(index))
        } else {
            None
        }
    }

    /// Replace all customized actions, trimming and validating each.
    pub fn replace_actions(&mut self, actions: Vec<Action>) -> Result<(), MaturityError> {
        let mut validated = Vec::with_capacity(actions.len());
        for action in actions {
            let text = validate_action_text(&action.action)?;
            validated.push(Action::new(text, action.priority));
        }
        self.customized_actions = validated;
        Ok(())
    }
}

/// Trim an action description and reject blank text.
fn validate_action_text(text: &str) -> Result<String, MaturityError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(MaturityError::InvalidAction(
            "Action description cannot be empty".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

// =============================================================================
// GAP ANALYSIS
// =============================================================================

/// Where an upsert landed in the ordered collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// An existing record was replaced at this position.
    Replaced(usize),
    /// A new record was appended at this position.
    Appended(usize),
}

impl UpsertOutcome {
    /// Position of the record after the upsert.
    #[must_use]
    pub fn index(&self) -> usize {
        match self {
            UpsertOutcome::Replaced(i) | UpsertOutcome::Appended(i) => *i,
        }
    }
}

/// The full collection of dimensions, in display order, names unique.
///
/// Persisted as `{"dimensions": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GapAnalysis {
    dimensions: Vec<Dimension>,
}

impl GapAnalysis {
    /// Build a collection, rejecting duplicate names.
    pub fn from_dimensions(dimensions: Vec<Dimension>) -> Result<Self, MaturityError> {
        let mut seen = BTreeSet::new();
        for dimension in &dimensions {
            if !seen.insert(dimension.name()) {
                return Err(MaturityError::DuplicateDimension(
                    dimension.name().to_string(),
                ));
            }
        }
        Ok(Self { dimensions })
    }

    #[must_use]
    pub fn dimensions(&self) -> &[Dimension] {
        &self.dimensions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.dimensions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dimensions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Dimension> {
        self.dimensions.iter()
    }

    /// Position of the dimension with this name.
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.dimensions.iter().position(|d| d.name() == name)
    }

    /// Find a dimension by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Dimension> {
        self.dimensions.iter().find(|d| d.name() == name)
    }

    /// Replace the record with the same name in place, or append it.
    pub fn upsert(&mut self, dimension: Dimension) -> UpsertOutcome {
        match self.position(dimension.name()) {
            Some(index) => {
                self.dimensions[index] = dimension;
                UpsertOutcome::Replaced(index)
            }
            None => {
                self.dimensions.push(dimension);
                UpsertOutcome::Appended(self.dimensions.len() - 1)
            }
        }
    }
}

impl<'a> IntoIterator for &'a GapAnalysis {
    type Item = &'a Dimension;
    type IntoIter = std::slice::Iter<'a, Dimension>;

    fn into_iter(self) -> Self::IntoIter {
        self.dimensions.iter()
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the Maturity system.
///
/// - No silent failures
/// - Use `Result<T, MaturityError>` for fallible operations
/// - Reference lookups and the classifier never fail; "not found" is `None`
#[derive(Debug, Error)]
pub enum MaturityError {
    /// Persisted data is present but is not a valid gap analysis encoding.
    #[error("Corrupt store: {0}")]
    CorruptStoreError(String),

    /// Writing to the durable store failed; the operation was not applied.
    #[error("Persistence error: {0}")]
    PersistenceError(String),

    /// Desired state is lower than current state.
    #[error("Desired state ({desired}) cannot be lower than current state ({current})")]
    ValidationError { current: i32, desired: i32 },

    /// A level outside the maturity scale.
    #[error("Level {0} is outside the maturity scale 1..=5")]
    InvalidLevel(i32),

    /// The dimension has no reference data.
    #[error("Dimension not found: {0}")]
    UnknownDimension(String),

    /// Two records share one name.
    #[error("Duplicate dimension: {0}")]
    DuplicateDimension(String),

    /// An action description was rejected.
    #[error("Invalid action: {0}")]
    InvalidAction(String),

    /// A serialization or parse error outside the persisted store.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Reading from the durable store failed.
    #[error("I/O error: {0}")]
    IoError(String),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

// =============================================================================
// TESTS
// =============================================================================
