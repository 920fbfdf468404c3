//! Human feedback and refined few-shot example types

use serde::{Deserialize, Serialize};

/// Reviewer's verdict on a served answer
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Assessment {
    /// Correct and well grounded; nothing to learn
    Correct,
    /// Factually wrong; the correction is a gold answer
    Incorrect,
    /// Correct but too complex or vague; the correction is a cleaner answer
    Complex,
    /// Off-topic or a guardrail failure
    OffTopic,
    /// Anything else the feedback channel sends, including an empty selection
    #[serde(other)]
    Other,
}

impl Assessment {
    /// Whether this verdict carries a correction worth turning into an example
    pub fn warrants_refinement(self) -> bool {
        matches!(self, Assessment::Incorrect | Assessment::Complex)
    }
}

impl std::fmt::Display for Assessment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Assessment::Correct => write!(f, "CORRECT"),
            Assessment::Incorrect => write!(f, "INCORRECT"),
            Assessment::Complex => write!(f, "COMPLEX"),
            Assessment::OffTopic => write!(f, "OFF_TOPIC"),
            Assessment::Other => write!(f, "OTHER"),
        }
    }
}

impl std::str::FromStr for Assessment {
    type Err = String;

    /// Strict parse of the four reviewer verdicts (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().replace('-', "_").as_str() {
            "CORRECT" => Ok(Assessment::Correct),
            "INCORRECT" => Ok(Assessment::Incorrect),
            "COMPLEX" => Ok(Assessment::Complex),
            "OFF_TOPIC" => Ok(Assessment::OffTopic),
            other => Err(format!(
                "unknown assessment '{other}' (expected CORRECT, INCORRECT, COMPLEX or OFF_TOPIC)"
            )),
        }
    }
}

/// One feedback event from the review channel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackItem {
    pub query: String,
    pub assessment: Assessment,
    /// Human-provided gold answer
    #[serde(default)]
    pub correction_text: String,
    #[serde(default)]
    pub generated_solution: Option<String>,
    #[serde(default)]
    pub route_mode: Option<String>,
    #[serde(default)]
    pub confidence_score: Option<f64>,
}

impl FeedbackItem {
    pub fn new(
        query: impl Into<String>,
        assessment: Assessment,
        correction_text: impl Into<String>,
    ) -> Self {
        Self {
            query: query.into(),
            assessment,
            correction_text: correction_text.into(),
            generated_solution: None,
            route_mode: None,
            confidence_score: None,
        }
    }
}

/// Human-validated (question, ideal answer) pair used as a few-shot example.
///
/// Extra keys in stored records are ignored on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefinedExample {
    pub question: String,
    pub ideal_answer: String,
}
