//! Tavily search API client

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{SearchError, WebSearch};
use crate::config::{defaults, WebSearchConfig};
use crate::types::{SearchDepth, WebResult};

#[derive(Serialize)]
struct SearchRequest<'a> {
    api_key: &'a str,
    query: &'a str,
    search_depth: SearchDepth,
    max_results: usize,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<WebResult>,
}

/// HTTP client for the Tavily search API
#[derive(Clone)]
pub struct TavilyClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl TavilyClient {
    pub fn new(config: &WebSearchConfig, api_key: impl Into<String>) -> Result<Self, SearchError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
            api_key: api_key.into(),
        })
    }

    /// Build from config, reading the key from `TAVILY_API_KEY`
    pub fn from_env(config: &WebSearchConfig) -> Result<Self, SearchError> {
        let api_key = std::env::var(defaults::WEB_SEARCH_API_KEY_ENV)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or(SearchError::MissingApiKey(defaults::WEB_SEARCH_API_KEY_ENV))?;
        Self::new(config, api_key)
    }
}

#[async_trait]
impl WebSearch for TavilyClient {
    async fn search(
        &self,
        query: &str,
        depth: SearchDepth,
        max_results: usize,
    ) -> Result<Vec<WebResult>, SearchError> {
        let body = SearchRequest {
            api_key: &self.api_key,
            query,
            search_depth: depth,
            max_results,
        };

        let resp = self.http.post(&self.endpoint).json(&body).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(SearchError::Api { status, body });
        }

        let parsed: SearchResponse = resp.json().await?;
        tracing::debug!(results = parsed.results.len(), depth = %depth, "Web search complete");
        Ok(parsed.results)
    }

    fn backend_name(&self) -> &'static str {
        "Tavily"
    }
}
