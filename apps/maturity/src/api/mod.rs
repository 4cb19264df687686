//! # Maturity HTTP API Module
//!
//! This module implements the HTTP REST API server using axum.
//!
//! ## Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /status` - Store status
//! - `GET /dimensions` - All dimensions with computed gaps
//! - `GET /dimensions/{name}` - One dimension
//! - `PUT /dimensions/{name}` - Update levels and customized actions
//! - `GET /reference/{name}/levels` - The five maturity levels
//! - `GET /reference/{name}/recommendations/{gap}` - Recommendation for a gap
//!
//! ## Configuration (Environment Variables)
//!
//! - `MATURITY_CORS_ORIGINS`: Comma-separated list of allowed origins, or "*" for all (default: localhost only)

mod handlers;
mod types;

// Re-export handlers and types for integration tests (via `maturity::api::*`)
pub use handlers::{
    get_dimension_handler, health_handler, levels_handler, list_dimensions_handler,
    not_found_handler, recommendation_handler, status_for, status_handler,
    update_dimension_handler,
};
pub use types::{
    DimensionListResponse, DimensionResponse, DimensionView, ErrorResponse, HealthResponse,
    LevelJson, LevelsResponse, RecommendationJson, RecommendationResponse, StatusResponse,
    UpdateDimensionRequest, UpdateDimensionResponse,
};

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::get,
};
use maturity_core::{DimensionRepository, MaturityError, StorageBackend};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Maximum request body size (64 KB). A dimension update is a few hundred bytes.
const MAX_BODY_SIZE: usize = 64 * 1024;

// =============================================================================
// SERVER STATE
// =============================================================================

/// Shared server state containing the repository.
///
/// Readers share the lock; an update holds the write lock from load to
/// upsert so concurrent edits never interleave.
#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<RwLock<DimensionRepository<StorageBackend>>>,
}

impl AppState {
    /// Create new app state with a repository.
    #[must_use]
    pub fn new(repository: DimensionRepository<StorageBackend>) -> Self {
        Self {
            repository: Arc::new(RwLock::new(repository)),
        }
    }
}

// =============================================================================
// CORS CONFIGURATION
// =============================================================================

/// Build CORS layer from environment configuration.
///
/// Reads `MATURITY_CORS_ORIGINS`:
/// - If "*": allows all origins
/// - If not set: localhost only
/// - Otherwise: comma-separated list of allowed origins
fn build_cors_layer() -> CorsLayer {
    let origins_env = std::env::var("MATURITY_CORS_ORIGINS").ok();

    match origins_env.as_deref() {
        Some("*") => {
            tracing::warn!("CORS: Allowing ALL origins (MATURITY_CORS_ORIGINS=*)");
            CorsLayer::permissive()
        }
        Some(origins) => {
            let allowed_origins: Vec<HeaderValue> = origins
                .split(',')
                .filter_map(|s| {
                    let trimmed = s.trim();
                    match trimmed.parse::<HeaderValue>() {
                        Ok(hv) => {
                            tracing::info!("CORS: Allowing origin: {}", trimmed);
                            Some(hv)
                        }
                        Err(e) => {
                            tracing::warn!("CORS: Invalid origin '{}': {}", trimmed, e);
                            None
                        }
                    }
                })
                .collect();

            if allowed_origins.is_empty() {
                tracing::warn!(
                    "CORS: No valid origins in MATURITY_CORS_ORIGINS, defaulting to localhost only"
                );
                build_localhost_cors()
            } else {
                restricted_cors(allowed_origins)
            }
        }
        None => {
            tracing::info!("CORS: No MATURITY_CORS_ORIGINS set, defaulting to localhost only");
            build_localhost_cors()
        }
    }
}

/// Build a restrictive CORS layer that only allows localhost origins.
fn build_localhost_cors() -> CorsLayer {
    let origins: Vec<HeaderValue> = [
        "http://localhost:3000",
        "http://localhost:8080",
        "http://127.0.0.1:3000",
        "http://127.0.0.1:8080",
    ]
    .iter()
    .filter_map(|o| o.parse::<HeaderValue>().ok())
    .collect();

    restricted_cors(origins)
}

fn restricted_cors(origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::PUT, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

// =============================================================================
// ROUTER CREATION
// =============================================================================

/// Create the axum router with all endpoints and middleware.
///
/// Middleware stack (outer to inner): tracing, CORS, body limit.
pub fn create_router(state: AppState) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer())
        .layer(axum::extract::DefaultBodyLimit::max(MAX_BODY_SIZE));

    Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/status", get(handlers::status_handler))
        .route("/dimensions", get(handlers::list_dimensions_handler))
        .route(
            "/dimensions/{name}",
            get(handlers::get_dimension_handler).put(handlers::update_dimension_handler),
        )
        .route("/reference/{name}/levels", get(handlers::levels_handler))
        .route(
            "/reference/{name}/recommendations/{gap}",
            get(handlers::recommendation_handler),
        )
        .fallback(handlers::not_found_handler)
        .layer(middleware)
        .with_state(state)
}

// =============================================================================
// SERVER STARTUP
// =============================================================================

/// Start the HTTP server.
pub async fn run_server(
    addr: &str,
    repository: DimensionRepository<StorageBackend>,
) -> Result<(), MaturityError> {
    tracing::info!(
        backend = repository.store().name(),
        store_key = repository.store_key(),
        "Opening repository"
    );
    let state = AppState::new(repository);
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| MaturityError::IoError(format!("Bind failed: {}", e)))?;

    tracing::info!("Maturity HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .await
        .map_err(|e| MaturityError::IoError(format!("Server error: {}", e)))
}
