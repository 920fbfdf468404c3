//! Guardrail Filter - input relevance and output safety gates
//!
//! Both checks are pure and total: they never fail and never touch a
//! collaborator. The gateway runs [`check_input`] before any retrieval or
//! generation call and [`check_output`] on every synthesized answer.

mod keywords;

pub use keywords::{BANNED_OUTPUT_PATTERNS, MATH_KEYWORDS};

use tracing::{debug, info};

/// Replacement text surfaced when an answer is blocked.
pub const BLOCKED_OUTPUT_MESSAGE: &str = " Output blocked for safety reasons.";

/// Message returned for queries outside the math domain.
pub const REJECTED_INPUT_MESSAGE: &str =
    "Input rejected: Query does not meet the strict Math relevancy policy.";

/// Result of the output safety check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputVerdict {
    /// Answer may be returned unchanged
    Passed,
    /// Answer must be discarded; carries the replacement message
    Blocked(&'static str),
}

impl OutputVerdict {
    pub fn is_blocked(&self) -> bool {
        matches!(self, OutputVerdict::Blocked(_))
    }
}

/// Returns true iff the text mentions at least one allow-listed math term.
///
/// Case-insensitive substring containment; empty text never passes.
pub fn check_input(text: &str) -> bool {
    let lowered = text.to_lowercase();
    let matched = MATH_KEYWORDS.iter().find(|kw| lowered.contains(*kw));

    match matched {
        Some(keyword) => {
            debug!(keyword, "Input guardrail matched");
            true
        }
        None => {
            info!("Input rejected: query is not recognized as math related");
            false
        }
    }
}

/// Scan a candidate answer for banned patterns (case-sensitive).
pub fn check_output(text: &str) -> OutputVerdict {
    match BANNED_OUTPUT_PATTERNS.iter().find(|p| text.contains(*p)) {
        Some(pattern) => {
            info!(pattern, "Output guardrail blocked answer");
            OutputVerdict::Blocked(BLOCKED_OUTPUT_MESSAGE)
        }
        None => OutputVerdict::Passed,
    }
}

/// Legacy string-in/string-out form of [`check_output`].
///
/// Returns the input unchanged when it passes, otherwise the fixed block
/// message; callers detect a block by comparing the result to the input.
pub fn output_guardrail(answer: &str) -> String {
    match check_output(answer) {
        OutputVerdict::Passed => answer.to_string(),
        OutputVerdict::Blocked(message) => message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_math_query_passes() {
        assert!(check_input("What is the integral of x^2?"));
        assert!(check_input("Explain the chain rule with calculus"));
    }

    #[test]
    fn test_match_is_case_insensitive() {
        assert!(check_input("INTEGRAL of sin x"));
        assert!(check_input("Fourier Transform basics"));
    }

    #[test]
    fn test_off_topic_query_rejected() {
        assert!(!check_input("what is the capital of France"));
        assert!(!check_input("random trivia question about movies"));
    }

    #[test]
    fn test_mentioning_the_word_math_is_enough() {
        // "math" is itself an allow-listed term
        assert!(check_input("random trivia question unrelated to math"));
    }

    #[test]
    fn test_empty_input_rejected() {
        assert!(!check_input(""));
        assert!(!check_input("   "));
    }

    #[test]
    fn test_substring_match_inside_other_words() {
        // "sum" inside "summer" and "set" inside "sunset" both count
        assert!(check_input("summer holidays"));
        assert!(check_input("sunset photos"));
    }

    #[test]
    fn test_clean_output_passes_unchanged() {
        let answer = "### Step 1: Apply the formula\n$$ S_n = n(n+1)/2 $$";
        assert_eq!(check_output(answer), OutputVerdict::Passed);
        assert_eq!(output_guardrail(answer), answer);
    }

    #[test]
    fn test_link_marker_blocked() {
        let answer = "See https://example.com for details";
        assert!(check_output(answer).is_blocked());
        assert_eq!(output_guardrail(answer), BLOCKED_OUTPUT_MESSAGE);
    }

    #[test]
    fn test_unsafe_marker_blocked() {
        assert_eq!(
            check_output("this is malicious content"),
            OutputVerdict::Blocked(BLOCKED_OUTPUT_MESSAGE)
        );
    }

    #[test]
    fn test_output_check_is_case_sensitive() {
        assert_eq!(check_output("HTTP is a protocol"), OutputVerdict::Passed);
        assert_eq!(check_output("Malicious"), OutputVerdict::Passed);
    }

    #[test]
    fn test_empty_output_passes() {
        assert_eq!(check_output(""), OutputVerdict::Passed);
        assert_eq!(output_guardrail(""), "");
    }
}
