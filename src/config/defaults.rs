//! System-wide default constants.
//!
//! Grouped by subsystem for easy discovery. Every value here can be
//! overridden from `gateway_config.toml` unless noted otherwise.

// ============================================================================
// Server
// ============================================================================

/// HTTP bind address.
pub const SERVER_ADDR: &str = "0.0.0.0:8000";

/// Maximum accepted request body (bytes).
pub const MAX_REQUEST_BODY_BYTES: usize = 64 * 1024;

// ============================================================================
// Routing
// ============================================================================

/// Best-hit distance below which the knowledge base is trusted.
///
/// Strict less-than: a distance equal to the threshold goes to web search.
pub const CONFIDENCE_THRESHOLD: f64 = 0.45;

/// Number of knowledge-base hits retrieved per gateway invocation.
pub const ROUTING_TOP_K: usize = 5;

/// Hits retrieved by the label-only router.
pub const ROUTE_LABEL_TOP_K: usize = 1;

// ============================================================================
// LLM
// ============================================================================

pub const LLM_MODEL: &str = "gemini-2.5-flash";

pub const LLM_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

pub const LLM_TIMEOUT_SECS: u64 = 60;

/// Environment variable holding the LLM API key (never read from TOML).
pub const LLM_API_KEY_ENV: &str = "GEMINI_API_KEY";

// ============================================================================
// Web Search
// ============================================================================

pub const WEB_SEARCH_ENDPOINT: &str = "https://api.tavily.com/search";

pub const WEB_SEARCH_MAX_RESULTS: usize = 5;

/// Upper bound accepted by config validation.
pub const WEB_SEARCH_MAX_RESULTS_LIMIT: usize = 20;

pub const WEB_SEARCH_TIMEOUT_SECS: u64 = 30;

/// Environment variable holding the web-search API key (never read from TOML).
pub const WEB_SEARCH_API_KEY_ENV: &str = "TAVILY_API_KEY";

// ============================================================================
// Refinement
// ============================================================================

/// Persistent store of human-validated few-shot examples.
pub const REFINED_EXAMPLES_FILE: &str = "optimized_examples.json";

/// Most recent refined examples injected into synthesizer prompts.
pub const FEW_SHOT_LIMIT: usize = 3;
