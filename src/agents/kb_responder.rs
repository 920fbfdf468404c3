//! KB Responder - grounded tutor answers from knowledge-base context
//!
//! The prompt restricts the model to the supplied `[CONTEXT]` documents and
//! fixes the output format (`### Step X` headings, `$$` block LaTeX).

use std::fmt::Write as _;
use std::sync::Arc;

use tracing::{debug, info, warn};

use super::FewShotSource;
use crate::llm::{LlmBackend, LlmError};
use crate::types::RetrievalHit;

/// Answer returned when the router hands over no context
pub const NO_CONTEXT_MESSAGE: &str = "KB Response Agent failed: No relevant context was provided.";

const KB_TUTOR_INSTRUCTION: &str = "You are an expert Math and JEE tutor. Your task is to provide a comprehensive, \
simplified, and step-by-step solution to the user's question. \
**You MUST ONLY use the information provided in the [CONTEXT] section below.** \
If the context does not contain the answer, you must politely state: \
'The necessary information for a complete answer is not available in the knowledge base.'
**CRITICAL OUTPUT FORMATTING RULES:**
1. **Structure:** The entire output MUST be structured using **Markdown Headings** (`### Step X: Concept`) for each step.
2. **LaTeX:** You MUST use perfect **block LaTeX** for all final equations, formulas, and symbolic results. Use double dollar signs (`$$`) to enclose block equations.
3. **Readability:** Use bold text and numbered lists within steps to clearly explain the reasoning.
4. **No conversational filler:** Do NOT include introductory phrases like 'Here is the solution' or concluding sentences. Start immediately with '### Step 1:'
**EXAMPLE REQUIRED FORMAT:**
### Step 1: Identify Given Values
The problem is based on the **Binomial Theorem** from Document 2. The formula is:
$$ (x+y)^n = \\sum_{k=0}^n \\binom{n}{k} x^{n-k} y^k $$
### Step 2: Apply Formula
...";

fn generation_error(e: &LlmError) -> String {
    format!(
        " LLM Generation Error: Could not connect to the model or process the request. Details: {e}"
    )
}

/// Synthesizer for the `KB_RESPONSE` route
pub struct KbResponder {
    llm: Arc<dyn LlmBackend>,
    few_shot: FewShotSource,
}

impl KbResponder {
    pub fn new(llm: Arc<dyn LlmBackend>) -> Self {
        Self {
            llm,
            few_shot: FewShotSource::disabled(),
        }
    }

    pub fn with_few_shot(mut self, few_shot: FewShotSource) -> Self {
        self.few_shot = few_shot;
        self
    }

    /// Generate an answer grounded in `context`. Never fails: errors come
    /// back as descriptive answer text.
    pub async fn respond(&self, query: &str, context: &[RetrievalHit]) -> String {
        if context.is_empty() {
            warn!("KB responder called without context");
            return NO_CONTEXT_MESSAGE.to_string();
        }

        let prompt = build_prompt(query, context, &self.few_shot.prompt_section());
        info!(
            backend = self.llm.backend_name(),
            documents = context.len(),
            "📚 KB responder generating answer"
        );

        match self.llm.generate(&prompt).await {
            Ok(answer) => {
                debug!(chars = answer.len(), "KB answer generated");
                answer
            }
            Err(e) => {
                warn!(error = %e, "KB responder generation failed");
                generation_error(&e)
            }
        }
    }
}

/// Tutor instruction, optional reference examples, numbered context, question.
pub(crate) fn build_prompt(query: &str, context: &[RetrievalHit], examples: &str) -> String {
    let mut context_text = String::from("\n\n[CONTEXT]\n");
    for (i, hit) in context.iter().enumerate() {
        let _ = writeln!(
            context_text,
            "Document {} (Distance: {:.4}): {}",
            i + 1,
            hit.distance,
            hit.content
        );
    }

    format!("{KB_TUTOR_INSTRUCTION}{examples}\n\n{context_text}\n\n[USER QUESTION]: {query}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::LlmError;
    use crate::storage::RefinementStore;
    use crate::types::RefinedExample;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct RecordingLlm {
        reply: Result<String, ()>,
        prompts: Mutex<Vec<String>>,
    }

    impl RecordingLlm {
        fn ok(reply: &str) -> Self {
            Self {
                reply: Ok(reply.to_string()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                reply: Err(()),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl LlmBackend for RecordingLlm {
        async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.reply.clone().map_err(|()| LlmError::EmptyResponse)
        }

        fn backend_name(&self) -> &'static str {
            "recording"
        }
    }

    fn hits() -> Vec<RetrievalHit> {
        vec![
            RetrievalHit::new("The chain rule: dy/dx = f'(g(x)) g'(x)", 0.2),
            RetrievalHit::new("Differentiability implies continuity", 0.5),
        ]
    }

    #[tokio::test]
    async fn test_empty_context_skips_llm() {
        let llm = Arc::new(RecordingLlm::ok("unused"));
        let responder = KbResponder::new(llm.clone());

        let answer = responder.respond("chain rule", &[]).await;
        assert_eq!(answer, NO_CONTEXT_MESSAGE);
        assert!(llm.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_answer_passthrough_and_prompt_layout() {
        let llm = Arc::new(RecordingLlm::ok("### Step 1: Differentiate"));
        let responder = KbResponder::new(llm.clone());

        let answer = responder.respond("Explain the chain rule", &hits()).await;
        assert_eq!(answer, "### Step 1: Differentiate");

        let prompts = llm.prompts.lock().unwrap();
        let prompt = &prompts[0];
        assert!(prompt.contains("[CONTEXT]"));
        assert!(prompt.contains("Document 1 (Distance: 0.2000): The chain rule"));
        assert!(prompt.contains("Document 2 (Distance: 0.5000)"));
        assert!(prompt.ends_with("[USER QUESTION]: Explain the chain rule"));
        assert!(!prompt.contains("[REFERENCE EXAMPLES]"));
    }

    #[tokio::test]
    async fn test_llm_failure_becomes_answer_text() {
        let responder = KbResponder::new(Arc::new(RecordingLlm::failing()));
        let answer = responder.respond("chain rule", &hits()).await;
        assert!(answer.starts_with(" LLM Generation Error: Could not connect to the model"));
        assert!(answer.contains("Details: response contained no text"));
    }

    #[tokio::test]
    async fn test_reference_examples_injected() {
        let tmp = tempfile::TempDir::new().unwrap();
        let store = Arc::new(RefinementStore::open(tmp.path().join("examples.json")));
        store
            .append(RefinedExample {
                question: "Sum of first n naturals".into(),
                ideal_answer: "n(n+1)/2".into(),
            })
            .await
            .unwrap();

        let llm = Arc::new(RecordingLlm::ok("ok"));
        let responder =
            KbResponder::new(llm.clone()).with_few_shot(FewShotSource::new(store, 3));
        responder.respond("sum of naturals", &hits()).await;

        let prompts = llm.prompts.lock().unwrap();
        let prompt = &prompts[0];
        let examples_at = prompt.find("[REFERENCE EXAMPLES]").unwrap();
        let context_at = prompt.find("\n[CONTEXT]\n").unwrap();
        assert!(examples_at < context_at);
        assert!(prompt[..examples_at].starts_with(KB_TUTOR_INSTRUCTION));
        assert!(prompt.contains("Question: Sum of first n naturals\nIdeal Answer: n(n+1)/2"));
    }
}
