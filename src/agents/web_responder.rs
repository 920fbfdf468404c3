//! Web Responder - search-grounded answers with source attribution
//!
//! Runs one web search, then asks the model for a step-by-step answer that
//! cites `[Source X]` tags and refuses when the snippets are insufficient.

use std::sync::Arc;

use tracing::{info, warn};

use super::FewShotSource;
use crate::llm::LlmBackend;
use crate::search::WebSearch;
use crate::types::{SearchDepth, WebResult};

/// Answer returned when the search finds nothing (also the model's refusal phrase)
pub const INSUFFICIENT_CONTEXT_MESSAGE: &str = "Insufficient context: I cannot construct a complete, grounded solution based only on the provided web snippets.";

const WEB_RESEARCH_INSTRUCTION: &str = "You are a highly constrained, expert research agent specializing in Math and (JEE/Advanced level). \
Your response MUST adhere to the following **Model Context Protocol (MCP) rules**:
1. **Attribution:** Cite the [Source X] URL(s) immediately after every factual statement or step you use from the context.
2. **Grounding (Zero Hallucination):** You MUST use ONLY the content explicitly provided in the [SEARCH CONTEXT]. Do not use any internal knowledge or external information.
3. **Refusal:** If the provided [SEARCH CONTEXT] does not contain sufficient information to generate a complete, step-by-step solution, you must output the exact phrase: 'Insufficient context: I cannot construct a complete, grounded solution based only on the provided web snippets.'
4. **Format:** Generate the answer as a simplified, numbered, step-by-step solution. Preserve mathematical notation (like LaTeX) exactly.
";

/// Synthesizer for the `WEB_SEARCH` route
pub struct WebResponder {
    search: Arc<dyn WebSearch>,
    llm: Arc<dyn LlmBackend>,
    depth: SearchDepth,
    max_results: usize,
    few_shot: FewShotSource,
}

impl WebResponder {
    pub fn new(
        search: Arc<dyn WebSearch>,
        llm: Arc<dyn LlmBackend>,
        depth: SearchDepth,
        max_results: usize,
    ) -> Self {
        Self {
            search,
            llm,
            depth,
            max_results,
            few_shot: FewShotSource::disabled(),
        }
    }

    pub fn with_few_shot(mut self, few_shot: FewShotSource) -> Self {
        self.few_shot = few_shot;
        self
    }

    /// Search, then synthesize. Never fails: errors come back as answer text.
    pub async fn respond(&self, query: &str) -> String {
        info!(
            backend = self.search.backend_name(),
            depth = %self.depth,
            max_results = self.max_results,
            "🌐 Web responder searching"
        );

        let results = match self.search.search(query, self.depth, self.max_results).await {
            Ok(results) => results,
            Err(e) => {
                warn!(error = %e, "Web search failed");
                return format!(" Tavily Search Error: {e}");
            }
        };

        if results.is_empty() {
            info!("Web search returned no results");
            return INSUFFICIENT_CONTEXT_MESSAGE.to_string();
        }

        let prompt = build_prompt(query, &results, &self.few_shot.prompt_section());
        info!(
            sources = results.len(),
            backend = self.llm.backend_name(),
            "Web responder synthesizing grounded answer"
        );

        match self.llm.generate(&prompt).await {
            Ok(answer) => answer,
            Err(e) => {
                warn!(error = %e, "Web responder generation failed");
                format!(" LLM Generation Error: {e}")
            }
        }
    }
}

/// Instruction, optional reference examples, attributed sources, question.
pub(crate) fn build_prompt(query: &str, results: &[WebResult], examples: &str) -> String {
    let context = results
        .iter()
        .enumerate()
        .map(|(i, result)| {
            let content = if result.content.is_empty() {
                "No content available."
            } else {
                result.content.as_str()
            };
            format!(
                "--- [Source {}] ---\nURL: {}\nContent: {}\n",
                i + 1,
                result.url,
                content
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "{WEB_RESEARCH_INSTRUCTION}{examples}\n\n\
         ============================\n\
         [SEARCH CONTEXT]\n\
         {context}\n\
         ============================\n\n\
         [USER QUESTION]\n\
         Provide the step-by-step, grounded solution for: '{query}'"
    )
}
