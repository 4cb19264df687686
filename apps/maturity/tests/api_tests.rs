//! Integration tests for the Maturity HTTP API.
//!
//! Uses axum-test to test the API handlers without starting a real server.

// Allow unwrap and panic in tests - these are standard for test code
// Allow holding MutexGuard across await in CORS tests - tests are serialized
// intentionally to avoid env var conflicts
#![allow(clippy::unwrap_used, clippy::panic, clippy::await_holding_lock)]

use axum::http::{HeaderValue, StatusCode, header};
use axum_test::TestServer;
use maturity::api::{
    AppState, DimensionListResponse, DimensionResponse, ErrorResponse, HealthResponse,
    LevelsResponse, RecommendationResponse, StatusResponse, UpdateDimensionResponse,
    create_router,
};
use maturity_core::primitives::DEFAULT_STORE_KEY;
use maturity_core::{DimensionRepository, GapLevel, MemoryStore, Priority, StorageBackend};
use serde_json::json;
use std::future::IntoFuture;
use std::sync::Mutex;

/// Mutex to serialize tests since the router reads env vars.
static ENV_TEST_MUTEX: Mutex<()> = Mutex::new(());

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Guard wrapper that holds the mutex and ensures cleanup on drop.
struct TestGuard {
    _guard: std::sync::MutexGuard<'static, ()>,
}

impl Drop for TestGuard {
    fn drop(&mut self) {
        // SAFETY: Tests run sequentially under ENV_TEST_MUTEX, so no concurrent env access.
        unsafe { std::env::remove_var("MATURITY_CORS_ORIGINS") };
    }
}

fn lock_env() -> TestGuard {
    let guard = ENV_TEST_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    // SAFETY: Tests run sequentially under ENV_TEST_MUTEX, so no concurrent env access.
    unsafe { std::env::remove_var("MATURITY_CORS_ORIGINS") };
    TestGuard { _guard: guard }
}

fn server_for(backend: StorageBackend) -> TestServer {
    let state = AppState::new(DimensionRepository::new(backend));
    TestServer::new(create_router(state)).unwrap()
}

/// Create a test server over a fresh in-memory store.
/// Returns a guard that must be kept alive during the test.
fn create_test_server() -> (TestServer, TestGuard) {
    let guard = lock_env();
    (server_for(StorageBackend::default()), guard)
}

// =============================================================================
// HEALTH / STATUS
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let (server, _guard) = create_test_server();

    let response = server.get("/health").await;

    response.assert_status_ok();
    let health: HealthResponse = response.json();
    assert_eq!(health.status, "ok");
    assert_eq!(health.version, env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_status_fresh_store_serves_seed() {
    let (server, _guard) = create_test_server();

    let response = server.get("/status").await;

    response.assert_status_ok();
    let status: StatusResponse = response.json();
    assert!(status.success);
    assert_eq!(status.backend, "memory");
    assert!(!status.durable);
    assert_eq!(status.store_key, DEFAULT_STORE_KEY);
    assert!(!status.persisted);
    assert_eq!(status.dimension_count, 3);
    assert_eq!(status.stale_gaps, 3);
}

// =============================================================================
// READ ENDPOINTS
// =============================================================================

#[tokio::test]
async fn test_list_returns_seed_in_order() {
    let (server, _guard) = create_test_server();

    let response = server.get("/dimensions").await;

    response.assert_status_ok();
    let list: DimensionListResponse = response.json();
    assert!(list.success);
    assert!(!list.persisted);

    let names: Vec<&str> = list.dimensions.iter().map(|v| v.dimension.name()).collect();
    assert_eq!(names, vec!["Technology", "Digital Culture", "Skills"]);

    let computed: Vec<GapLevel> = list.dimensions.iter().map(|v| v.computed_gap).collect();
    assert_eq!(computed, vec![GapLevel::Medium, GapLevel::Low, GapLevel::Low]);
    assert!(list.dimensions.iter().all(|v| v.dimension.gap() == GapLevel::High));
    assert!(list.dimensions.iter().all(|v| !v.gap_consistent));
}

#[tokio::test]
async fn test_list_uses_persisted_field_names() {
    let (server, _guard) = create_test_server();

    let response = server.get("/dimensions").await;
    let body: serde_json::Value = response.json();

    let technology = &body["dimensions"][0]["dimension"];
    assert_eq!(technology["name"], "Technology");
    assert_eq!(technology["currentState"], 1);
    assert_eq!(technology["desiredState"], 3);
    assert_eq!(technology["gap"], "HIGH");
    assert_eq!(technology["customizedActions"][0]["action"], "Ready to continue!");
    assert_eq!(technology["customizedActions"][0]["priority"], "FOLLOW UP");
}

#[tokio::test]
async fn test_get_dimension_with_reference_data() {
    let (server, _guard) = create_test_server();

    let response = server.get("/dimensions/Technology").await;

    response.assert_status_ok();
    let body: DimensionResponse = response.json();
    let view = body.dimension;
    assert!(view.stored);
    assert_eq!(view.current_level.name, "Legacy Systems");
    assert_eq!(view.desired_level.name, "Partial Automation");
    assert_eq!(view.actions_summary, "1 action");
    let recommendation = view.recommendation.unwrap();
    assert_eq!(recommendation.priority, Priority::Important);
}

#[tokio::test]
async fn test_get_dimension_with_space_in_name() {
    let (server, _guard) = create_test_server();

    let response = server.get("/dimensions/Digital%20Culture").await;

    response.assert_status_ok();
    let body: DimensionResponse = response.json();
    assert_eq!(body.dimension.dimension.name(), "Digital Culture");
}

#[tokio::test]
async fn test_get_unknown_dimension_is_404() {
    let (server, _guard) = create_test_server();

    let response = server.get("/dimensions/Nonexistent").await;

    response.assert_status(StatusCode::NOT_FOUND);
    let error: ErrorResponse = response.json();
    assert!(!error.success);
    assert!(error.error.contains("Nonexistent"));
}

// =============================================================================
// UPDATE ENDPOINT
// =============================================================================

#[tokio::test]
async fn test_update_recomputes_gap_and_persists() {
    let (server, _guard) = create_test_server();

    let response = server
        .put("/dimensions/Skills")
        .json(&json!({"currentState": 1, "desiredState": 3}))
        .await;

    response.assert_status_ok();
    let update: UpdateDimensionResponse = response.json();
    assert!(update.success);
    assert!(!update.created);
    assert_eq!(update.index, 2);
    assert_eq!(update.dimension.dimension.gap(), GapLevel::Medium);
    assert!(update.dimension.gap_consistent);

    let status: StatusResponse = server.get("/status").await.json();
    assert!(status.persisted);
    assert_eq!(status.stale_gaps, 2);

    let fetched: DimensionResponse = server.get("/dimensions/Skills").await.json();
    assert_eq!(fetched.dimension.dimension.current_state(), 1);
    assert_eq!(fetched.dimension.dimension.desired_state(), 3);
}

#[tokio::test]
async fn test_update_ignores_client_gap() {
    let (server, _guard) = create_test_server();

    let response = server
        .put("/dimensions/Technology")
        .json(&json!({"currentState": 1, "desiredState": 5, "gap": "LOW"}))
        .await;

    response.assert_status_ok();
    let update: UpdateDimensionResponse = response.json();
    assert_eq!(update.dimension.dimension.gap(), GapLevel::High);
}

#[tokio::test]
async fn test_update_keeps_omitted_fields() {
    let (server, _guard) = create_test_server();

    let response = server
        .put("/dimensions/Technology")
        .json(&json!({"desiredState": 4}))
        .await;

    response.assert_status_ok();
    let update: UpdateDimensionResponse = response.json();
    let technology = update.dimension.dimension;
    assert_eq!(technology.current_state(), 1);
    assert_eq!(technology.desired_state(), 4);
    assert_eq!(technology.customized_actions().len(), 1);
}

#[tokio::test]
async fn test_update_replaces_actions() {
    let (server, _guard) = create_test_server();

    let response = server
        .put("/dimensions/Digital%20Culture")
        .json(&json!({
            "customizedActions": [
                {"action": "  Run a hackathon ", "priority": "URGENT"},
                {"action": "Share success stories", "priority": "FOLLOW_UP"}
            ]
        }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let actions = &body["dimension"]["dimension"]["customizedActions"];
    assert_eq!(actions[0]["action"], "Run a hackathon");
    assert_eq!(actions[1]["priority"], "FOLLOW UP");
}

#[tokio::test]
async fn test_update_desired_below_current_is_rejected() {
    let (server, _guard) = create_test_server();

    let response = server
        .put("/dimensions/Technology")
        .json(&json!({"currentState": 4, "desiredState": 2}))
        .await;

    response.assert_status_bad_request();
    let error: ErrorResponse = response.json();
    assert!(!error.success);

    let status: StatusResponse = server.get("/status").await.json();
    assert!(!status.persisted, "rejected edit must not be written");
}

#[tokio::test]
async fn test_update_level_off_scale_is_rejected() {
    let (server, _guard) = create_test_server();

    let response = server
        .put("/dimensions/Skills")
        .json(&json!({"currentState": 3, "desiredState": 6}))
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_update_blank_action_is_rejected() {
    let (server, _guard) = create_test_server();

    let response = server
        .put("/dimensions/Skills")
        .json(&json!({"customizedActions": [{"action": "   ", "priority": "URGENT"}]}))
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_update_unknown_dimension_is_404() {
    let (server, _guard) = create_test_server();

    let response = server
        .put("/dimensions/Data")
        .json(&json!({"currentState": 1, "desiredState": 2}))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_malformed_body_is_400() {
    let (server, _guard) = create_test_server();

    let response = server
        .put("/dimensions/Skills")
        .json(&json!({"currentState": "three"}))
        .await;

    response.assert_status_bad_request();
    let error: ErrorResponse = response.json();
    assert!(!error.success);
}

#[tokio::test]
async fn test_concurrent_updates_both_survive() {
    let (server, _guard) = create_test_server();

    let technology = server
        .put("/dimensions/Technology")
        .json(&json!({"currentState": 2, "desiredState": 5}))
        .into_future();
    let skills = server
        .put("/dimensions/Skills")
        .json(&json!({"currentState": 1, "desiredState": 2}))
        .into_future();
    let (first, second) = tokio::join!(technology, skills);
    first.assert_status_ok();
    second.assert_status_ok();

    let list: DimensionListResponse = server.get("/dimensions").await.json();
    assert_eq!(list.dimensions[0].dimension.desired_state(), 5);
    assert_eq!(list.dimensions[2].dimension.current_state(), 1);
}

// =============================================================================
// FAILURE PATHS
// =============================================================================

#[tokio::test]
async fn test_corrupt_store_is_500() {
    let _guard = lock_env();
    let server = server_for(StorageBackend::InMemory(MemoryStore::with_entry(
        DEFAULT_STORE_KEY,
        "{not json",
    )));

    let response = server.get("/dimensions").await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let error: ErrorResponse = response.json();
    assert!(error.error.contains("Corrupt store"));
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let (server, _guard) = create_test_server();

    let response = server.get("/nope").await;

    response.assert_status(StatusCode::NOT_FOUND);
    let error: ErrorResponse = response.json();
    assert!(!error.success);
}

// =============================================================================
// REFERENCE ENDPOINTS
// =============================================================================

#[tokio::test]
async fn test_levels_endpoint() {
    let (server, _guard) = create_test_server();

    let response = server.get("/reference/Skills/levels").await;

    response.assert_status_ok();
    let body: LevelsResponse = response.json();
    assert_eq!(body.dimension, "Skills");
    let numbers: Vec<i32> = body.levels.iter().map(|l| l.level).collect();
    assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
    assert_eq!(body.levels[0].name, "Insufficient Digital Skills");
}

#[tokio::test]
async fn test_levels_unknown_dimension_is_404() {
    let (server, _guard) = create_test_server();

    let response = server.get("/reference/Data/levels").await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_recommendation_priorities_follow_gap() {
    let (server, _guard) = create_test_server();

    for (gap, priority) in [
        ("HIGH", Priority::Urgent),
        ("medium", Priority::Important),
        ("LOW", Priority::FollowUp),
    ] {
        let response = server
            .get(&format!("/reference/Technology/recommendations/{}", gap))
            .await;
        response.assert_status_ok();
        let body: RecommendationResponse = response.json();
        assert_eq!(body.recommendation.priority, priority);
        assert!(!body.recommendation.actions.is_empty());
    }
}

#[tokio::test]
async fn test_recommendation_bad_gap_is_400() {
    let (server, _guard) = create_test_server();

    let response = server
        .get("/reference/Technology/recommendations/SEVERE")
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_recommendation_unknown_dimension_is_404() {
    let (server, _guard) = create_test_server();

    let response = server.get("/reference/Data/recommendations/HIGH").await;

    response.assert_status(StatusCode::NOT_FOUND);
}

// =============================================================================
// DURABLE BACKENDS
// =============================================================================

#[tokio::test]
async fn test_redb_backend_survives_restart() {
    let _guard = lock_env();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("maturity.db");

    {
        let server = server_for(StorageBackend::open("redb", &path).unwrap());
        server
            .put("/dimensions/Skills")
            .json(&json!({"currentState": 2, "desiredState": 5}))
            .await
            .assert_status_ok();
    }

    let server = server_for(StorageBackend::open("redb", &path).unwrap());
    let body: DimensionResponse = server.get("/dimensions/Skills").await.json();
    assert_eq!(body.dimension.dimension.desired_state(), 5);
    assert_eq!(body.dimension.dimension.gap(), GapLevel::High);
}

// =============================================================================
// CORS
// =============================================================================

#[tokio::test]
async fn test_cors_allows_configured_origin() {
    let _guard = lock_env();
    // SAFETY: Tests run sequentially under ENV_TEST_MUTEX, so no concurrent env access.
    unsafe { std::env::set_var("MATURITY_CORS_ORIGINS", "https://assess.example.org") };
    let server = server_for(StorageBackend::default());

    let response = server
        .get("/health")
        .add_header(
            header::ORIGIN,
            "https://assess.example.org".parse::<HeaderValue>().unwrap(),
        )
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.header(header::ACCESS_CONTROL_ALLOW_ORIGIN),
        "https://assess.example.org"
    );
}
