//! Hand-written collaborator mocks shared by the integration tests.
//!
//! Every mock counts its calls so tests can assert which collaborators a
//! gateway invocation touched.

#![allow(dead_code)]

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use rag_gateway::agents::{FewShotSource, KbResponder, RefinementAgent, WebResponder};
use rag_gateway::context::KnowledgeStore;
use rag_gateway::llm::{LlmBackend, LlmError};
use rag_gateway::pipeline::Gateway;
use rag_gateway::search::{SearchError, WebSearch};
use rag_gateway::storage::RefinementStore;
use rag_gateway::types::{RetrievalHit, SearchDepth, WebResult};

pub struct MockStore {
    pub hits: Vec<RetrievalHit>,
    pub calls: AtomicUsize,
}

impl MockStore {
    pub fn with_distances(distances: &[f64]) -> Arc<Self> {
        Arc::new(Self {
            hits: distances
                .iter()
                .enumerate()
                .map(|(i, d)| RetrievalHit::new(format!("reference document {i}"), *d))
                .collect(),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl KnowledgeStore for MockStore {
    async fn search(&self, _query: &str, k: usize) -> Vec<RetrievalHit> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.hits.iter().take(k).cloned().collect()
    }

    fn store_name(&self) -> &'static str {
        "mock"
    }

    fn is_healthy(&self) -> bool {
        true
    }
}

pub struct MockLlm {
    pub reply: Mutex<Result<String, String>>,
    pub calls: AtomicUsize,
    pub prompts: Mutex<Vec<String>>,
}

impl MockLlm {
    pub fn replying(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Mutex::new(Ok(reply.to_string())),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(status_body: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Mutex::new(Err(status_body.to_string())),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl LlmBackend for MockLlm {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply
            .lock()
            .unwrap()
            .clone()
            .map_err(|body| LlmError::Api {
                status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
                body,
            })
    }

    fn backend_name(&self) -> &'static str {
        "mock"
    }
}

pub struct MockSearch {
    pub results: Vec<WebResult>,
    pub calls: AtomicUsize,
}

impl MockSearch {
    pub fn with_snippets(snippets: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            results: snippets
                .iter()
                .enumerate()
                .map(|(i, s)| WebResult {
                    url: format!("example.org/{i}"),
                    title: None,
                    content: (*s).to_string(),
                })
                .collect(),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WebSearch for MockSearch {
    async fn search(
        &self,
        _query: &str,
        _depth: SearchDepth,
        max_results: usize,
    ) -> Result<Vec<WebResult>, SearchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.results.iter().take(max_results).cloned().collect())
    }

    fn backend_name(&self) -> &'static str {
        "mock"
    }
}

/// Gateway plus handles on every mock behind it
pub struct Fixture {
    pub gateway: Gateway,
    pub store: Arc<MockStore>,
    pub llm: Arc<MockLlm>,
    pub search: Arc<MockSearch>,
}

pub fn fixture(distances: &[f64], llm: Arc<MockLlm>) -> Fixture {
    fixture_with_examples(distances, llm, None)
}

pub fn fixture_with_examples(
    distances: &[f64],
    llm: Arc<MockLlm>,
    examples: Option<Arc<RefinementStore>>,
) -> Fixture {
    let store = MockStore::with_distances(distances);
    let search = MockSearch::with_snippets(&["The limit of sin(x)/x as x approaches 0 is 1."]);

    let few_shot = examples
        .map(|s| FewShotSource::new(s, 3))
        .unwrap_or_else(FewShotSource::disabled);

    let gateway = Gateway::new(
        store.clone(),
        KbResponder::new(llm.clone()).with_few_shot(few_shot.clone()),
        WebResponder::new(search.clone(), llm.clone(), SearchDepth::Advanced, 5)
            .with_few_shot(few_shot),
    );

    Fixture {
        gateway,
        store,
        llm,
        search,
    }
}

pub fn refinement_agent(reply: &str, path: &Path) -> (RefinementAgent, Arc<MockLlm>) {
    let llm = MockLlm::replying(reply);
    let store = Arc::new(RefinementStore::open(path));
    (RefinementAgent::new(llm.clone(), store), llm)
}
