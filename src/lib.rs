//! RAG Gateway: Math Tutor Question Answering
//!
//! Guardrailed routing between a curated knowledge base and web search, with
//! reviewer feedback distilled into few-shot examples.
//!
//! ## Architecture
//!
//! - **Guardrail**: math-relevance input gate and output safety gate
//! - **Router**: similarity threshold between KB and web search
//! - **Pipeline**: the `Gateway` state machine tying the stages together
//! - **Agents**: KB / web answer synthesizers and the refinement agent
//! - **Storage**: JSON-file store of refined examples

pub mod agents;
pub mod api;
pub mod config;
pub mod context;
pub mod guardrail;
pub mod llm;
pub mod pipeline;
pub mod router;
pub mod search;
pub mod storage;
pub mod types;

// Re-export configuration
pub use config::GatewayConfig;

// Re-export commonly used types
pub use types::{
    Assessment, FeedbackItem, GatewayMode, GatewayRequest, GatewayResponse, RefinedExample,
    RetrievalHit, RouteDecision, SearchDepth, StatusClass, WebResult,
};

// Re-export pipeline and agents
pub use agents::{KbResponder, RefinementAgent, WebResponder};
pub use pipeline::Gateway;
pub use router::SimilarityRouter;

// Re-export collaborator traits
pub use context::KnowledgeStore;
pub use llm::LlmBackend;
pub use search::WebSearch;
pub use storage::RefinementStore;
