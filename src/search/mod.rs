//! Web Search Module
//!
//! Collaborator interface for the web-search fallback route, plus the Tavily
//! HTTP adapter. An empty result list is a normal outcome, not an error.

use async_trait::async_trait;

use crate::types::{SearchDepth, WebResult};

mod tavily;

pub use tavily::TavilyClient;

/// Web search errors
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("missing API key: set {0}")]
    MissingApiKey(&'static str),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("search service returned status {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },
}

/// Trait for web-search backends
#[async_trait]
pub trait WebSearch: Send + Sync {
    async fn search(
        &self,
        query: &str,
        depth: SearchDepth,
        max_results: usize,
    ) -> Result<Vec<WebResult>, SearchError>;

    /// Backend name for logging and health checks
    fn backend_name(&self) -> &'static str;
}
