//! Gateway - single entry point for a tutor query
//!
//! Each invocation awaits its stages strictly in order. The gateway keeps no
//! mutable state, so one instance is shared across requests as `Arc<Gateway>`.

use std::sync::Arc;

use tracing::{debug, info, info_span, Instrument};
use uuid::Uuid;

use super::GatewayStage;
use crate::agents::{KbResponder, WebResponder};
use crate::config::defaults;
use crate::context::KnowledgeStore;
use crate::guardrail::{self, OutputVerdict, REJECTED_INPUT_MESSAGE};
use crate::router::SimilarityRouter;
use crate::types::{GatewayRequest, GatewayResponse, RouteDecision};

/// Guardrailed KB / web routing front door
pub struct Gateway {
    store: Arc<dyn KnowledgeStore>,
    router: SimilarityRouter,
    top_k: usize,
    kb: KbResponder,
    web: WebResponder,
}

impl Gateway {
    /// Gateway with the default threshold and retrieval depth
    pub fn new(store: Arc<dyn KnowledgeStore>, kb: KbResponder, web: WebResponder) -> Self {
        Self {
            store,
            router: SimilarityRouter::default(),
            top_k: defaults::ROUTING_TOP_K,
            kb,
            web,
        }
    }

    pub fn with_router(mut self, router: SimilarityRouter) -> Self {
        self.router = router;
        self
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k.max(1);
        self
    }

    pub fn store_name(&self) -> &'static str {
        self.store.store_name()
    }

    pub fn store_healthy(&self) -> bool {
        self.store.is_healthy()
    }

    pub fn router(&self) -> &SimilarityRouter {
        &self.router
    }

    /// Convenience wrapper for a bare query string
    pub async fn ask(&self, query: &str) -> GatewayResponse {
        self.process(&GatewayRequest {
            query: query.to_string(),
            level: None,
            user_id: None,
        })
        .await
    }

    /// Run one query through guardrails, routing and synthesis.
    ///
    /// Total: every failure surfaces as a structured response.
    pub async fn process(&self, request: &GatewayRequest) -> GatewayResponse {
        let span = info_span!("gateway", request_id = %Uuid::new_v4());
        self.run(request).instrument(span).await
    }

    async fn run(&self, request: &GatewayRequest) -> GatewayResponse {
        let query = request.query.as_str();
        stage(GatewayStage::Received);
        info!(
            level = request.level.as_deref().unwrap_or("unspecified"),
            user_id = request.user_id.as_deref().unwrap_or("anonymous"),
            chars = query.chars().count(),
            "📥 Query received"
        );

        if !guardrail::check_input(query) {
            stage(GatewayStage::Rejected);
            return GatewayResponse::rejected(REJECTED_INPUT_MESSAGE);
        }
        stage(GatewayStage::InputChecked);

        let hits = self.store.search(query, self.top_k).await;
        let routing = self.router.route(hits);
        stage(GatewayStage::Routed);
        info!(
            mode = %routing.decision,
            confidence = routing.confidence,
            context_docs = routing.context.len(),
            "🧭 Query routed"
        );

        let answer = match routing.decision {
            RouteDecision::KbResponse => self.kb.respond(query, &routing.context).await,
            RouteDecision::WebSearch => self.web.respond(query).await,
        };
        stage(GatewayStage::Synthesized);

        if let OutputVerdict::Blocked(message) = guardrail::check_output(&answer) {
            stage(GatewayStage::Blocked);
            return GatewayResponse::blocked(message);
        }
        stage(GatewayStage::OutputChecked);

        stage(GatewayStage::Responded);
        info!(
            mode = %routing.decision,
            confidence = routing.confidence,
            "✅ Answer served"
        );
        GatewayResponse::served(routing.decision, answer, routing.confidence)
    }
}

fn stage(stage: GatewayStage) {
    if stage.is_terminal() {
        info!(stage = %stage, "Gateway finished");
    } else {
        debug!(stage = %stage, "Gateway stage");
    }
}
