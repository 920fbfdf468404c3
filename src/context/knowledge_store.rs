//! Knowledge Store trait and implementations
//!
//! Abstracts the similarity-search interface so different backends can be swapped:
//! - `StaticKnowledgeBase`: in-memory bag-of-words index over the seeded math corpus
//! - `NoOpStore`: returns empty results (every query goes to web search)

use async_trait::async_trait;

use super::vector_db::{self, VectorIndex};
use crate::types::RetrievalHit;

/// Trait for similarity-search backends
///
/// Every implementation must be thread-safe (Send + Sync) since the gateway
/// is shared across concurrent requests. A backend failure is reported as an
/// empty result, which the router treats as "no confident match".
#[async_trait]
pub trait KnowledgeStore: Send + Sync {
    /// Top-`k` hits ordered ascending by distance
    async fn search(&self, query: &str, k: usize) -> Vec<RetrievalHit>;

    /// Get the store name for logging and health checks
    fn store_name(&self) -> &'static str;

    /// Check if the store is healthy and available
    fn is_healthy(&self) -> bool;
}

/// NoOp knowledge store that returns empty results
pub struct NoOpStore;

#[async_trait]
impl KnowledgeStore for NoOpStore {
    async fn search(&self, _query: &str, _k: usize) -> Vec<RetrievalHit> {
        Vec::new()
    }

    fn store_name(&self) -> &'static str {
        "NoOp"
    }

    fn is_healthy(&self) -> bool {
        true
    }
}

/// In-memory knowledge base over the seeded math/JEE reference documents
pub struct StaticKnowledgeBase {
    index: VectorIndex,
}

impl StaticKnowledgeBase {
    /// Build the index over the built-in corpus
    pub fn new() -> Self {
        Self::with_documents(vector_db::seed_documents().iter().copied())
    }

    pub fn with_documents<I, S>(documents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let index = VectorIndex::build(documents);
        tracing::info!(documents = index.len(), "Static knowledge base indexed");
        Self { index }
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

impl Default for StaticKnowledgeBase {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KnowledgeStore for StaticKnowledgeBase {
    async fn search(&self, query: &str, k: usize) -> Vec<RetrievalHit> {
        let hits = self.index.query(query, k);
        tracing::debug!(retrieved = hits.len(), k, "Knowledge base search");
        hits
    }

    fn store_name(&self) -> &'static str {
        "StaticKB"
    }

    fn is_healthy(&self) -> bool {
        !self.index.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_noop_store() {
        let store = NoOpStore;
        assert!(store.search("anything", 5).await.is_empty());
        assert!(store.is_healthy());
        assert_eq!(store.store_name(), "NoOp");
    }

    #[tokio::test]
    async fn test_static_kb() {
        let store = StaticKnowledgeBase::new();
        let results = store.search("chain rule composite functions", 3).await;
        assert!(!results.is_empty());
        assert!(results.len() <= 3);
        assert!(results[0].content.contains("chain rule"));
        assert!(store.is_healthy());
        assert_eq!(store.store_name(), "StaticKB");
    }

    #[tokio::test]
    async fn test_trait_object() {
        let store: Box<dyn KnowledgeStore> = Box::new(NoOpStore);
        assert!(store.search("test", 3).await.is_empty());
        assert!(store.is_healthy());
    }

    #[tokio::test]
    async fn test_empty_custom_store_unhealthy() {
        let store = StaticKnowledgeBase::with_documents(Vec::<String>::new());
        assert!(store.is_empty());
        assert!(!store.is_healthy());
        assert!(store.search("integral", 5).await.is_empty());
    }
}
