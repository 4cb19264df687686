//! # API Endpoint Handlers
//!
//! This module implements the actual HTTP endpoint handlers.

use super::{
    AppState,
    types::{
        DimensionListResponse, DimensionResponse, DimensionView, ErrorResponse, HealthResponse,
        LevelJson, LevelsResponse, RecommendationJson, RecommendationResponse, StatusResponse,
        UpdateDimensionRequest, UpdateDimensionResponse,
    },
};
use crate::edit::{load_for_edit, lookup, require_supported, save_dimension};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maturity_core::reference::{levels_for, recommendation_for};
use maturity_core::{
    Dimension, DimensionRepository, GapLevel, MaturityError, StorageBackend, UpsertOutcome,
};

// =============================================================================
// ERROR MAPPING
// =============================================================================

/// HTTP status for a core error.
pub fn status_for(error: &MaturityError) -> StatusCode {
    match error {
        MaturityError::ValidationError { .. }
        | MaturityError::InvalidLevel(_)
        | MaturityError::InvalidAction(_)
        | MaturityError::DuplicateDimension(_) => StatusCode::BAD_REQUEST,
        MaturityError::UnknownDimension(_) => StatusCode::NOT_FOUND,
        MaturityError::CorruptStoreError(_)
        | MaturityError::PersistenceError(_)
        | MaturityError::SerializationError(_)
        | MaturityError::IoError(_)
        | MaturityError::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(error: &MaturityError) -> Response {
    let status = status_for(error);
    if status.is_server_error() {
        tracing::error!("Request failed: {}", error);
    }
    (status, Json(ErrorResponse::new(error.to_string()))).into_response()
}

// =============================================================================
// HEALTH HANDLER
// =============================================================================

/// Health check endpoint.
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse::default())
}

// =============================================================================
// STATUS HANDLER
// =============================================================================

/// Get store status.
pub async fn status_handler(State(state): State<AppState>) -> Response {
    let repo = state.repository.read().await;

    let result = repo.is_persisted().and_then(|persisted| {
        let analysis = repo.fetch_all()?;
        Ok(StatusResponse {
            success: true,
            backend: repo.store().name().to_string(),
            durable: repo.store().is_durable(),
            store_key: repo.store_key().to_string(),
            persisted,
            dimension_count: analysis.len(),
            stale_gaps: analysis.iter().filter(|d| !d.is_gap_consistent()).count(),
        })
    });

    match result {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => error_response(&e),
    }
}

// =============================================================================
// DIMENSION HANDLERS
// =============================================================================

/// List all dimensions in stored order.
pub async fn list_dimensions_handler(State(state): State<AppState>) -> Response {
    let repo = state.repository.read().await;

    let result = repo.fetch_all().and_then(|analysis| {
        Ok(DimensionListResponse {
            success: true,
            persisted: repo.is_persisted()?,
            dimensions: analysis
                .iter()
                .map(|d| DimensionView::new(d, true))
                .collect(),
        })
    });

    match result {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => error_response(&e),
    }
}

/// Get one dimension. Supported dimensions never assessed get the default record.
pub async fn get_dimension_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Response {
    let repo = state.repository.read().await;

    match lookup(&*repo, &name) {
        Ok((dimension, stored)) => (
            StatusCode::OK,
            Json(DimensionResponse {
                success: true,
                dimension: DimensionView::new(&dimension, stored),
            }),
        )
            .into_response(),
        Err(e) => error_response(&e),
    }
}

/// Update a dimension's levels and customized actions.
///
/// The write lock is held for the whole load, validate, upsert sequence.
pub async fn update_dimension_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
    payload: Result<Json<UpdateDimensionRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(format!(
                    "Invalid request body: {}",
                    rejection.body_text()
                ))),
            )
                .into_response();
        }
    };

    let mut repo = state.repository.write().await;

    match apply_update(&mut repo, &name, request) {
        Ok((dimension, outcome)) => {
            let response = UpdateDimensionResponse {
                success: true,
                created: matches!(outcome, UpsertOutcome::Appended(_)),
                index: outcome.index(),
                dimension: DimensionView::new(&dimension, true),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response(&e),
    }
}

fn apply_update(
    repo: &mut DimensionRepository<StorageBackend>,
    name: &str,
    request: UpdateDimensionRequest,
) -> Result<(Dimension, UpsertOutcome), MaturityError> {
    let mut dimension = load_for_edit(&*repo, name)?;
    request.apply_to(&mut dimension)?;
    let outcome = save_dimension(repo, &mut dimension)?;
    Ok((dimension, outcome))
}

// =============================================================================
// REFERENCE HANDLERS
// =============================================================================

/// Get the five maturity levels of a dimension.
pub async fn levels_handler(Path(name): Path<String>) -> Response {
    let levels = levels_for(&name);
    if levels.is_empty() {
        return error_response(&MaturityError::UnknownDimension(name));
    }

    let response = LevelsResponse {
        success: true,
        levels: levels.iter().map(LevelJson::from).collect(),
        dimension: name,
    };
    (StatusCode::OK, Json(response)).into_response()
}

/// Get the recommendation for a dimension and gap level.
pub async fn recommendation_handler(Path((name, gap)): Path<(String, String)>) -> Response {
    if let Err(e) = require_supported(&name) {
        return error_response(&e);
    }

    let gap: GapLevel = match gap.parse() {
        Ok(gap) => gap,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(e.to_string())),
            )
                .into_response();
        }
    };

    match recommendation_for(&name, gap) {
        Some(recommendation) => (
            StatusCode::OK,
            Json(RecommendationResponse {
                success: true,
                dimension: name,
                gap,
                recommendation: RecommendationJson::from(recommendation),
            }),
        )
            .into_response(),
        None => error_response(&MaturityError::UnknownDimension(name)),
    }
}

// =============================================================================
// FALLBACK
// =============================================================================

/// Unknown routes answer with the error envelope.
pub async fn not_found_handler() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new("Route not found")),
    )
        .into_response()
}
