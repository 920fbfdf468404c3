//! API route handlers
//!
//! - `POST /api/solve`: one gateway invocation; HTTP status mirrors the
//!   response's status class
//! - `POST /api/feedback`: queue refinement, answer 202 immediately
//! - `GET /api/examples`: stored refined examples
//! - `GET /health`: liveness and collaborator status

use std::sync::Arc;
use std::time::Instant;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tokio_util::task::TaskTracker;
use tracing::{error, info};

use super::envelope::{ApiErrorResponse, ApiResponse};
use crate::agents::RefinementAgent;
use crate::pipeline::Gateway;
use crate::types::{Assessment, FeedbackItem, GatewayRequest, StatusClass};

// ============================================================================
// API State
// ============================================================================

/// Shared state for API handlers
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<Gateway>,
    pub refinement: Arc<RefinementAgent>,
    /// Refinement tasks accepted with 202 and not yet finished
    pub background: TaskTracker,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(gateway: Arc<Gateway>, refinement: Arc<RefinementAgent>) -> Self {
        Self {
            gateway,
            refinement,
            background: TaskTracker::new(),
            started_at: Instant::now(),
        }
    }

    /// Wait for every accepted refinement to finish. Call after the server
    /// has stopped taking requests.
    pub async fn drain_background(&self) {
        self.background.close();
        let pending = self.background.len();
        if pending > 0 {
            info!(pending, "Waiting for background refinements to finish");
        }
        self.background.wait().await;
    }
}

// ============================================================================
// Solve
// ============================================================================

fn http_status(status: StatusClass) -> StatusCode {
    match status {
        StatusClass::Ok => StatusCode::OK,
        StatusClass::BadInput => StatusCode::BAD_REQUEST,
        StatusClass::Forbidden => StatusCode::FORBIDDEN,
    }
}

pub async fn solve(State(state): State<AppState>, Json(request): Json<GatewayRequest>) -> Response {
    let response = state.gateway.process(&request).await;
    (http_status(response.status), Json(response)).into_response()
}

// ============================================================================
// Feedback
// ============================================================================

#[derive(Debug, Serialize)]
pub struct FeedbackAccepted {
    pub assessment: Assessment,
    /// Whether a refinement task was started for this item
    pub refinement_scheduled: bool,
}

pub async fn submit_feedback(
    State(state): State<AppState>,
    Json(feedback): Json<FeedbackItem>,
) -> Response {
    if feedback.query.trim().is_empty() {
        return ApiErrorResponse::bad_request("query must not be empty");
    }

    let refinement_scheduled = feedback.assessment.warrants_refinement();
    info!(
        assessment = %feedback.assessment,
        route_mode = feedback.route_mode.as_deref().unwrap_or("unknown"),
        refinement_scheduled,
        "📝 Feedback received"
    );

    if refinement_scheduled {
        let agent = Arc::clone(&state.refinement);
        let item = feedback.clone();
        state.background.spawn(async move {
            agent.process_feedback(&item).await;
        });
    }

    ApiResponse::accepted(FeedbackAccepted {
        assessment: feedback.assessment,
        refinement_scheduled,
    })
}

// ============================================================================
// Refined Examples
// ============================================================================

pub async fn get_examples(State(state): State<AppState>) -> Response {
    match state.refinement.store().load() {
        Ok(examples) => ApiResponse::ok(examples),
        Err(e) => {
            error!(error = %e, "Failed to load refined examples");
            ApiErrorResponse::internal(format!("failed to load refined examples: {e}"))
        }
    }
}

// ============================================================================
// Health
// ============================================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub uptime_seconds: u64,
    pub knowledge_store: &'static str,
    pub knowledge_store_healthy: bool,
    pub confidence_threshold: f64,
}

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: state.started_at.elapsed().as_secs(),
        knowledge_store: state.gateway.store_name(),
        knowledge_store_healthy: state.gateway.store_healthy(),
        confidence_threshold: state.gateway.router().threshold(),
    })
}
