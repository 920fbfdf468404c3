//! Similarity Router - KB vs web-search decision
//!
//! The decision looks only at the best (first) hit, but once the KB route is
//! taken the *whole* hit list becomes grounding context for the responder.
//!
//! ```text
//! hits empty            → WEB_SEARCH, confidence 0.0
//! d0 <  threshold       → KB_RESPONSE, confidence 1 - d0, context = all hits
//! d0 >= threshold       → WEB_SEARCH,  confidence 1 - d0, context dropped
//! ```

use tracing::debug;

use crate::config::defaults;
use crate::context::KnowledgeStore;
use crate::types::{RetrievalHit, RouteDecision};

/// Full routing outcome for a gateway invocation
#[derive(Debug, Clone, PartialEq)]
pub struct Routing {
    pub decision: RouteDecision,
    /// `1 - best distance`; informational, not clamped
    pub confidence: f64,
    /// KB grounding context; empty unless `decision` is `KbResponse`
    pub context: Vec<RetrievalHit>,
}

/// Threshold gate over ranked retrieval hits
#[derive(Debug, Clone, Copy)]
pub struct SimilarityRouter {
    threshold: f64,
}

impl Default for SimilarityRouter {
    fn default() -> Self {
        Self::new(defaults::CONFIDENCE_THRESHOLD)
    }
}

impl SimilarityRouter {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// The single comparison shared by every routing entry point.
    fn classify(&self, best_distance: Option<f64>) -> RouteDecision {
        match best_distance {
            Some(d) if d < self.threshold => RouteDecision::KbResponse,
            _ => RouteDecision::WebSearch,
        }
    }

    /// Route a ranked hit list, keeping all hits as context on the KB route.
    pub fn route(&self, hits: Vec<RetrievalHit>) -> Routing {
        let best_distance = hits.first().map(|h| h.distance);
        let decision = self.classify(best_distance);
        let confidence = best_distance.map_or(0.0, |d| 1.0 - d);

        debug!(
            best_distance = ?best_distance,
            threshold = self.threshold,
            hits = hits.len(),
            decision = %decision,
            "Similarity routing"
        );

        let context = match decision {
            RouteDecision::KbResponse => hits,
            RouteDecision::WebSearch => Vec::new(),
        };

        Routing {
            decision,
            confidence,
            context,
        }
    }

    /// Label-only routing: no confidence, no context.
    pub fn route_label(&self, hits: &[RetrievalHit]) -> RouteDecision {
        self.classify(hits.first().map(|h| h.distance))
    }

    /// Run a single-hit search and return only the route label.
    pub async fn decide(&self, store: &dyn KnowledgeStore, query: &str) -> RouteDecision {
        let hits = store.search(query, defaults::ROUTE_LABEL_TOP_K).await;
        let decision = self.route_label(&hits);
        debug!(
            store = store.store_name(),
            decision = %decision,
            "Route-only decision"
        );
        decision
    }
}
