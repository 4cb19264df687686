//! Unit tests for API types serialization/deserialization.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use axum::http::StatusCode;
use maturity::api::{
    DimensionView, ErrorResponse, HealthResponse, LevelJson, RecommendationJson,
    UpdateDimensionRequest, status_for,
};
use maturity_core::reference::{levels_for, recommendation_for};
use maturity_core::{Dimension, GapLevel, MaturityError, Priority};

// =============================================================================
// HEALTH / ERROR RESPONSES
// =============================================================================

#[test]
fn test_health_response_default() {
    let health = HealthResponse::default();
    assert_eq!(health.status, "ok");
    assert!(!health.version.is_empty());
}

#[test]
fn test_error_response_shape() {
    let json = serde_json::to_string(&ErrorResponse::new("Dimension not found: Data")).unwrap();
    assert_eq!(
        json,
        r#"{"success":false,"error":"Dimension not found: Data"}"#
    );
}

// =============================================================================
// UPDATE REQUEST
// =============================================================================

#[test]
fn test_update_request_camel_case() {
    let json = r#"{"currentState":2,"desiredState":4,"customizedActions":[{"action":"Train staff","priority":"IMPORTANT"}]}"#;
    let request: UpdateDimensionRequest = serde_json::from_str(json).unwrap();

    assert_eq!(request.current_state, Some(2));
    assert_eq!(request.desired_state, Some(4));
    let actions = request.customized_actions.unwrap();
    assert_eq!(actions[0].action, "Train staff");
    assert_eq!(actions[0].priority, Priority::Important);
}

#[test]
fn test_update_request_empty_body() {
    let request: UpdateDimensionRequest = serde_json::from_str("{}").unwrap();
    assert!(request.current_state.is_none());
    assert!(request.desired_state.is_none());
    assert!(request.customized_actions.is_none());
}

#[test]
fn test_update_request_apply_keeps_omitted_values() {
    let mut dimension = Dimension::with_states("Skills", 3, 4);
    let request = UpdateDimensionRequest {
        desired_state: Some(5),
        ..UpdateDimensionRequest::default()
    };

    request.apply_to(&mut dimension).unwrap();
    assert_eq!(dimension.current_state(), 3);
    assert_eq!(dimension.desired_state(), 5);
    assert_eq!(dimension.gap(), GapLevel::Medium);
}

#[test]
fn test_update_request_apply_rejects_blank_action() {
    let mut dimension = Dimension::with_states("Skills", 3, 4);
    let request: UpdateDimensionRequest =
        serde_json::from_str(r#"{"customizedActions":[{"action":"","priority":"URGENT"}]}"#)
            .unwrap();

    let result = request.apply_to(&mut dimension);
    assert!(matches!(result, Err(MaturityError::InvalidAction(_))));
    assert!(dimension.customized_actions().is_empty());
}

// =============================================================================
// VIEWS
// =============================================================================

#[test]
fn test_dimension_view_resolves_levels() {
    let dimension = Dimension::with_states("Technology", 2, 4);
    let view = DimensionView::new(&dimension, false);

    assert!(!view.stored);
    assert_eq!(view.computed_gap, GapLevel::Medium);
    assert!(view.gap_consistent);
    assert_eq!(view.current_level.name, "Basic Digital Tools");
    assert_eq!(view.desired_level.name, "Cloud-Enabled");
    assert_eq!(view.actions_summary, "No actions");
}

#[test]
fn test_dimension_view_without_reference_data() {
    let dimension = Dimension::with_states("Data", 1, 2);
    let view = DimensionView::new(&dimension, true);

    assert_eq!(view.current_level.name, "Level 1");
    assert!(view.current_level.description.is_none());
    assert!(view.recommendation.is_none());
}

#[test]
fn test_level_and_recommendation_conversions() {
    let level = LevelJson::from(&levels_for("Skills")[4]);
    assert_eq!(level.level, 5);
    assert!(level.description.is_some());

    let recommendation =
        RecommendationJson::from(recommendation_for("Skills", GapLevel::Low).unwrap());
    assert_eq!(recommendation.priority, Priority::FollowUp);

    let json = serde_json::to_value(&recommendation).unwrap();
    assert_eq!(json["priority"], "FOLLOW UP");
}

// =============================================================================
// ERROR MAPPING
// =============================================================================

#[test]
fn test_status_mapping() {
    assert_eq!(
        status_for(&MaturityError::ValidationError {
            current: 4,
            desired: 2
        }),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        status_for(&MaturityError::InvalidLevel(0)),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        status_for(&MaturityError::InvalidAction("blank".to_string())),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        status_for(&MaturityError::UnknownDimension("Data".to_string())),
        StatusCode::NOT_FOUND
    );
    for error in [
        MaturityError::CorruptStoreError("x".to_string()),
        MaturityError::PersistenceError("x".to_string()),
        MaturityError::IoError("x".to_string()),
    ] {
        assert_eq!(status_for(&error), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
