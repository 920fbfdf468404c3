//! LLM Backend Module
//!
//! Provides a unified interface for text-generation backends.
//!
//! ## Architecture
//!
//! - **LlmBackend**: the collaborator trait every synthesizer and the
//!   refinement agent depend on
//! - **GeminiBackend**: HTTP adapter for the Gemini `generateContent` API
//!
//! Backends are constructed once in `main` and injected as
//! `Arc<dyn LlmBackend>`; there are no global client handles.

use async_trait::async_trait;

mod gemini;

pub use gemini::GeminiBackend;

/// Errors surfaced by a text-generation backend
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("missing API key: set {0}")]
    MissingApiKey(&'static str),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API returned status {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("response contained no text")]
    EmptyResponse,
}

/// Unified trait for LLM backends
#[async_trait]
pub trait LlmBackend: Send + Sync {
    /// Generate a response from the LLM given a prompt
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;

    /// Get the backend name for logging
    fn backend_name(&self) -> &'static str;
}
