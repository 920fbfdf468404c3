//! Retrieval types produced by the similarity search and web search collaborators

use serde::{Deserialize, Serialize};

/// A single knowledge-base match.
///
/// `distance` is a dissimilarity score: 0 = identical, larger = less similar.
/// Sequences of hits are ordered ascending by distance (best match first).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievalHit {
    pub content: String,
    pub distance: f64,
}

impl RetrievalHit {
    pub fn new(content: impl Into<String>, distance: f64) -> Self {
        Self {
            content: content.into(),
            distance,
        }
    }
}

/// How much effort the web-search service should spend per query
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SearchDepth {
    Basic,
    #[default]
    Advanced,
}

impl SearchDepth {
    pub fn as_str(self) -> &'static str {
        match self {
            SearchDepth::Basic => "basic",
            SearchDepth::Advanced => "advanced",
        }
    }
}

impl std::fmt::Display for SearchDepth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single web-search result snippet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebResult {
    pub url: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: String,
}
