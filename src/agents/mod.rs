//! Synthesis and refinement agents
//!
//! ## Answer synthesizers
//!
//! - **KbResponder**: grounded tutor answer from knowledge-base hits
//! - **WebResponder**: web search followed by an attribution-constrained answer
//!
//! Both convert every collaborator failure into a descriptive answer string,
//! so the gateway never sees an error from synthesis.
//!
//! ## Feedback
//!
//! - **RefinementAgent**: turns reviewer corrections into few-shot examples

pub mod kb_responder;
pub mod refinement;
pub mod web_responder;

pub use kb_responder::KbResponder;
pub use refinement::{RefinementAgent, RefinementError};
pub use web_responder::WebResponder;

use std::fmt::Write as _;
use std::sync::Arc;

use tracing::warn;

use crate::storage::RefinementStore;

/// Refined examples attached to a synthesizer prompt
#[derive(Debug, Clone, Default)]
pub struct FewShotSource {
    store: Option<Arc<RefinementStore>>,
    limit: usize,
}

impl FewShotSource {
    pub fn new(store: Arc<RefinementStore>, limit: usize) -> Self {
        Self {
            store: Some(store),
            limit,
        }
    }

    /// No examples are ever injected
    pub fn disabled() -> Self {
        Self::default()
    }

    /// `[REFERENCE EXAMPLES]` block, or an empty string when there is nothing
    /// to inject. Store read failures degrade to no examples.
    pub(crate) fn prompt_section(&self) -> String {
        let Some(store) = self.store.as_ref().filter(|_| self.limit > 0) else {
            return String::new();
        };

        let examples = match store.recent(self.limit) {
            Ok(examples) => examples,
            Err(e) => {
                warn!(error = %e, "Could not read refined examples, continuing without them");
                return String::new();
            }
        };
        if examples.is_empty() {
            return String::new();
        }

        let mut section = String::from("\n\n[REFERENCE EXAMPLES]\n");
        for (i, example) in examples.iter().enumerate() {
            let _ = write!(
                section,
                "Example {}\nQuestion: {}\nIdeal Answer: {}\n\n",
                i + 1,
                example.question,
                example.ideal_answer
            );
        }
        section
    }
}
