//! # API Request/Response Types
//!
//! This module defines the JSON structures for the HTTP API.
//!
//! Dimensions keep the persisted field names (`currentState`,
//! `desiredState`, `customizedActions`); envelope fields are snake_case.

use maturity_core::{
    Action, Dimension, DimensionReport, GapLevel, MaturityLevelDefinition, Priority,
    Recommendation,
};
use serde::{Deserialize, Serialize};

// =============================================================================
// HEALTH RESPONSE
// =============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

// =============================================================================
// ERROR RESPONSE
// =============================================================================

/// Body of every failed request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

// =============================================================================
// STATUS RESPONSE
// =============================================================================

/// Store status response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub success: bool,
    pub backend: String,
    pub durable: bool,
    pub store_key: String,
    pub persisted: bool,
    pub dimension_count: usize,
    /// Dimensions whose stored gap differs from the computed one.
    pub stale_gaps: usize,
}

// =============================================================================
// DIMENSION VIEWS
// =============================================================================

/// A level number with its name for the dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelJson {
    pub level: i32,
    pub name: String,
    pub description: Option<String>,
}

impl LevelJson {
    fn from_reference(level: i32, name: &str, definition: Option<&MaturityLevelDefinition>) -> Self {
        Self {
            level,
            name: definition
                .map(|d| d.name.to_string())
                .unwrap_or_else(|| maturity_core::reference::level_name(name, level)),
            description: definition.map(|d| d.description.to_string()),
        }
    }
}

impl From<&MaturityLevelDefinition> for LevelJson {
    fn from(definition: &MaturityLevelDefinition) -> Self {
        Self {
            level: definition.level,
            name: definition.name.to_string(),
            description: Some(definition.description.to_string()),
        }
    }
}

/// A recommendation with owned text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationJson {
    pub actions: Vec<String>,
    pub priority: Priority,
}

impl From<&Recommendation> for RecommendationJson {
    fn from(recommendation: &Recommendation) -> Self {
        Self {
            actions: recommendation
                .actions
                .iter()
                .map(|a| (*a).to_string())
                .collect(),
            priority: recommendation.priority,
        }
    }
}

/// A dimension decorated with its computed gap and reference data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DimensionView {
    /// The record as stored (or the default record if never assessed).
    pub dimension: Dimension,
    /// Whether the record is part of the collection.
    pub stored: bool,
    pub computed_gap: GapLevel,
    pub gap_consistent: bool,
    pub current_level: LevelJson,
    pub desired_level: LevelJson,
    pub recommendation: Option<RecommendationJson>,
    pub actions_summary: String,
}

impl DimensionView {
    pub fn new(dimension: &Dimension, stored: bool) -> Self {
        let report = DimensionReport::assess(dimension);
        Self {
            dimension: dimension.clone(),
            stored,
            computed_gap: report.computed_gap,
            gap_consistent: report.gap_consistent,
            current_level: LevelJson::from_reference(
                dimension.current_state(),
                dimension.name(),
                report.current_level,
            ),
            desired_level: LevelJson::from_reference(
                dimension.desired_state(),
                dimension.name(),
                report.desired_level,
            ),
            recommendation: report.recommendation.map(RecommendationJson::from),
            actions_summary: report.actions_summary(),
        }
    }
}

/// All dimensions, in stored order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DimensionListResponse {
    pub success: bool,
    /// False while the seed collection is being served.
    pub persisted: bool,
    pub dimensions: Vec<DimensionView>,
}

/// A single dimension.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DimensionResponse {
    pub success: bool,
    pub dimension: DimensionView,
}

// =============================================================================
// UPDATE REQUEST/RESPONSE
// =============================================================================

/// Replace a dimension's levels and customized actions.
///
/// The gap is never taken from the client; it is recomputed on save.
/// Omitted fields keep their stored values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDimensionRequest {
    pub current_state: Option<i32>,
    pub desired_state: Option<i32>,
    pub customized_actions: Option<Vec<Action>>,
}

impl UpdateDimensionRequest {
    /// Apply the request to a loaded record. Actions are validated as a whole.
    pub fn apply_to(self, dimension: &mut Dimension) -> Result<(), maturity_core::MaturityError> {
        let current = self.current_state.unwrap_or(dimension.current_state());
        let desired = self.desired_state.unwrap_or(dimension.desired_state());
        if let Some(actions) = self.customized_actions {
            dimension.replace_actions(actions)?;
        }
        dimension.set_states(current, desired);
        Ok(())
    }
}

/// Result of a successful update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateDimensionResponse {
    pub success: bool,
    /// True when the dimension was appended rather than replaced.
    pub created: bool,
    pub index: usize,
    pub dimension: DimensionView,
}

// =============================================================================
// REFERENCE RESPONSES
// =============================================================================

/// The maturity scale of one dimension.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelsResponse {
    pub success: bool,
    pub dimension: String,
    pub levels: Vec<LevelJson>,
}

/// The recommendation for one dimension and gap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub success: bool,
    pub dimension: String,
    pub gap: GapLevel,
    pub recommendation: RecommendationJson,
}
