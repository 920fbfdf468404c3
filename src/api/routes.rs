//! API route definitions
//!
//! - /api/solve - guardrailed tutor answer
//! - /api/feedback - reviewer feedback intake
//! - /api/examples - refined few-shot examples
//! - /health - liveness

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{self, AppState};

/// Routes nested under `/api`
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/solve", post(handlers::solve))
        .route("/feedback", post(handlers::submit_feedback))
        .route("/examples", get(handlers::get_examples))
        .with_state(state)
}

/// Root-level health endpoint
pub fn health_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .with_state(state)
}
