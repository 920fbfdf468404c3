//! Route decision types

use serde::{Deserialize, Serialize};

/// Which answer synthesizer handles a query
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RouteDecision {
    /// Confident knowledge-base match: answer from KB context
    KbResponse,
    /// No confident match: answer from web search results
    WebSearch,
}

impl std::fmt::Display for RouteDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RouteDecision::KbResponse => write!(f, "KB_RESPONSE"),
            RouteDecision::WebSearch => write!(f, "WEB_SEARCH"),
        }
    }
}
