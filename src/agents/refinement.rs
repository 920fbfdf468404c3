//! Refinement Agent - reviewer corrections into few-shot examples
//!
//! Only `INCORRECT` and `COMPLEX` verdicts are refined. The model is asked to
//! restate the correction as a single `{"question", "ideal_answer"}` object;
//! anything else is a parse failure and the store is left untouched.
//! Failures are not retried.

use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::llm::{LlmBackend, LlmError};
use crate::storage::{RefinementStore, StoreError};
use crate::types::{FeedbackItem, RefinedExample};

/// Refinement failures
#[derive(Debug, thiserror::Error)]
pub enum RefinementError {
    #[error("generation failed: {0}")]
    Llm(#[from] LlmError),
    #[error("could not parse refined example: {0}")]
    Parse(String),
    #[error("could not persist refined example: {0}")]
    Store(#[from] StoreError),
}

/// Turns reviewer feedback into persisted few-shot examples
pub struct RefinementAgent {
    llm: Arc<dyn LlmBackend>,
    store: Arc<RefinementStore>,
}

impl RefinementAgent {
    pub fn new(llm: Arc<dyn LlmBackend>, store: Arc<RefinementStore>) -> Self {
        Self { llm, store }
    }

    pub fn store(&self) -> &Arc<RefinementStore> {
        &self.store
    }

    /// Refine one feedback item.
    ///
    /// `Ok(None)` means the verdict does not warrant refinement and nothing
    /// was called or written.
    pub async fn refine(
        &self,
        feedback: &FeedbackItem,
    ) -> Result<Option<RefinedExample>, RefinementError> {
        if !feedback.assessment.warrants_refinement() {
            debug!(assessment = %feedback.assessment, "Feedback does not warrant refinement");
            return Ok(None);
        }

        info!(
            assessment = %feedback.assessment,
            backend = self.llm.backend_name(),
            "🧠 Refinement agent analyzing human correction"
        );

        let prompt = build_refinement_prompt(&feedback.query, &feedback.correction_text);
        let reply = self.llm.generate(&prompt).await?;
        let example = parse_refined_example(&reply)?;

        let total = self.store.append(example.clone()).await?;
        info!(total, "Refined example stored");
        Ok(Some(example))
    }

    /// Fire-and-forget wrapper around [`Self::refine`]: logs the outcome and
    /// never propagates an error.
    pub async fn process_feedback(&self, feedback: &FeedbackItem) {
        let preview: String = feedback.query.chars().take(30).collect();
        match self.refine(feedback).await {
            Ok(Some(_)) => info!(query = %preview, "Refinement successful"),
            Ok(None) => debug!(query = %preview, "Feedback recorded without refinement"),
            Err(e) => warn!(query = %preview, error = %e, "Refinement failed"),
        }
    }
}

/// Extraction prompt embedding the original query and the gold correction
pub(crate) fn build_refinement_prompt(query: &str, correction: &str) -> String {
    format!(
        r#"You are a prompt engineer for an AI Math Tutor. Your job is to extract the
core knowledge from a human correction to create a reusable, high-quality
"Few-Shot Example" for future LLM responses.

Create a single JSON object with two keys: "question" and "ideal_answer".

--- INPUT ---
Original Query: {query}
Human Correction (Gold Standard): {correction}

--- INSTRUCTIONS ---
1. The "question" must be the core math problem from the query.
2. The "ideal_answer" must be the clean, simplified, step-by-step solution provided
   in the Human Correction, formatted with numbered steps and proper LaTeX.

--- REQUIRED JSON OUTPUT ---
{{
    "question": "[Extracted core question]",
    "ideal_answer": "[Cleaned, step-by-step solution]"
}}"#
    )
}

/// Exact shape the model is asked to produce
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RefinementReply {
    question: String,
    ideal_answer: String,
}

/// Drop a surrounding Markdown code fence and its language tag, if any
fn strip_code_fence(reply: &str) -> &str {
    let trimmed = reply.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // The tag runs to the end of the opening line; a one-line fence has none
    let body = match inner.split_once('\n') {
        Some((_tag, rest)) => rest,
        None => inner,
    };
    body.trim_end().trim_end_matches("```").trim()
}

/// Parse the model reply into a [`RefinedExample`].
///
/// Accepts the bare object or one wrapped in a Markdown code fence with any
/// language tag. Extra keys and blank values are rejected.
pub(crate) fn parse_refined_example(reply: &str) -> Result<RefinedExample, RefinementError> {
    let reply: RefinementReply = serde_json::from_str(strip_code_fence(reply))
        .map_err(|e| RefinementError::Parse(e.to_string()))?;

    if reply.question.trim().is_empty() || reply.ideal_answer.trim().is_empty() {
        return Err(RefinementError::Parse(
            "question and ideal_answer must not be blank".to_string(),
        ));
    }
    Ok(RefinedExample {
        question: reply.question,
        ideal_answer: reply.ideal_answer,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Assessment;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    struct CannedLlm {
        reply: String,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl LlmBackend for CannedLlm {
        async fn generate(&self, _prompt: &str) -> Result<String, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.reply.clone())
        }

        fn backend_name(&self) -> &'static str {
            "canned"
        }
    }

    fn agent(reply: &str, tmp: &TempDir) -> (RefinementAgent, Arc<CannedLlm>) {
        let llm = Arc::new(CannedLlm {
            reply: reply.to_string(),
            calls: AtomicUsize::new(0),
        });
        let store = Arc::new(RefinementStore::open(tmp.path().join("examples.json")));
        (RefinementAgent::new(llm.clone(), store), llm)
    }

    const GOOD_REPLY: &str = r#"{"question": "Integrate x e^x", "ideal_answer": "1. Parts: x e^x - e^x + C"}"#;

    #[tokio::test]
    async fn test_correct_feedback_is_noop() {
        let tmp = TempDir::new().unwrap();
        let (agent, llm) = agent(GOOD_REPLY, &tmp);

        let item = FeedbackItem::new("integrate x e^x", Assessment::Correct, "");
        assert!(agent.refine(&item).await.unwrap().is_none());
        assert_eq!(llm.calls.load(Ordering::SeqCst), 0);
        assert!(!agent.store().path().exists());
    }

    #[tokio::test]
    async fn test_incorrect_feedback_appends_one_example() {
        let tmp = TempDir::new().unwrap();
        let (agent, llm) = agent(GOOD_REPLY, &tmp);

        let item = FeedbackItem::new("integrate x e^x", Assessment::Incorrect, "Use parts");
        let example = agent.refine(&item).await.unwrap().unwrap();
        assert_eq!(example.question, "Integrate x e^x");
        assert_eq!(llm.calls.load(Ordering::SeqCst), 1);
        assert_eq!(agent.store().load().unwrap(), vec![example]);
    }

    #[tokio::test]
    async fn test_unparseable_reply_leaves_store_untouched() {
        let tmp = TempDir::new().unwrap();
        let (agent, _) = agent("Sure! Here is the example you asked for.", &tmp);

        let item = FeedbackItem::new("q", Assessment::Complex, "c");
        assert!(matches!(
            agent.refine(&item).await,
            Err(RefinementError::Parse(_))
        ));
        assert!(agent.store().load().unwrap().is_empty());

        // process_feedback swallows the same failure
        agent.process_feedback(&item).await;
        assert!(agent.store().load().unwrap().is_empty());
    }

    #[test]
    fn test_parse_strips_code_fence() {
        let fenced = format!("```json\n{GOOD_REPLY}\n```");
        let example = parse_refined_example(&fenced).unwrap();
        assert_eq!(example.ideal_answer, "1. Parts: x e^x - e^x + C");
    }

    #[test]
    fn test_parse_accepts_any_fence_tag() {
        for fence in ["```JSON", "```Json", "```", "``` json"] {
            let wrapped = format!("{fence}\n{GOOD_REPLY}\n```");
            let example = parse_refined_example(&wrapped).unwrap();
            assert_eq!(example.question, "Integrate x e^x");
        }
        let one_line = format!("```{GOOD_REPLY}```");
        assert!(parse_refined_example(&one_line).is_ok());
    }

    #[tokio::test]
    async fn test_legacy_record_with_extra_keys_does_not_block_append() {
        let tmp = TempDir::new().unwrap();
        let (agent, _) = agent(GOOD_REPLY, &tmp);
        std::fs::write(
            agent.store().path(),
            r#"[{"question":"q","ideal_answer":"a","topic":"calculus"}]"#,
        )
        .unwrap();

        let item = FeedbackItem::new("integrate x e^x", Assessment::Incorrect, "Use parts");
        agent.refine(&item).await.unwrap().unwrap();

        let stored = agent.store().load().unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].question, "q");
        assert_eq!(stored[1].question, "Integrate x e^x");
    }

    #[test]
    fn test_parse_rejects_extra_or_blank_fields() {
        assert!(parse_refined_example(r#"{"question":"q","ideal_answer":"a","note":"x"}"#).is_err());
        assert!(parse_refined_example(r#"{"question":"q"}"#).is_err());
        assert!(parse_refined_example(r#"{"question":"  ","ideal_answer":"a"}"#).is_err());
    }

    #[test]
    fn test_prompt_embeds_query_and_correction() {
        let prompt = build_refinement_prompt("find dy/dx of sin(x^2)", "2x cos(x^2)");
        assert!(prompt.contains("Original Query: find dy/dx of sin(x^2)"));
        assert!(prompt.contains("Human Correction (Gold Standard): 2x cos(x^2)"));
        assert!(prompt.contains(r#""ideal_answer": "[Cleaned, step-by-step solution]""#));
    }
}
