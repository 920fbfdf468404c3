//! Gateway Configuration - operator-tunable TOML values
//!
//! Each struct implements `Default` with the values from [`super::defaults`],
//! so a missing file or a missing section behaves exactly like the built-in
//! configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::defaults;
use crate::types::SearchDepth;

/// Environment variable pointing at the config file.
pub const CONFIG_ENV_VAR: &str = "GATEWAY_CONFIG";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "gateway_config.toml";

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration for a gateway deployment.
///
/// Load with `GatewayConfig::load()` which searches:
/// 1. `$GATEWAY_CONFIG` env var
/// 2. `./gateway_config.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default)]
    pub server: ServerConfig,

    /// Similarity routing parameters
    #[serde(default)]
    pub routing: RoutingConfig,

    /// Text-generation collaborator
    #[serde(default)]
    pub llm: LlmConfig,

    /// Web-search collaborator
    #[serde(default)]
    pub web_search: WebSearchConfig,

    /// Feedback refinement store
    #[serde(default)]
    pub refinement: RefinementConfig,
}

impl GatewayConfig {
    /// Load configuration using the standard search order:
    /// 1. `$GATEWAY_CONFIG` environment variable
    /// 2. `./gateway_config.toml` in the current working directory
    /// 3. Built-in defaults
    pub fn load() -> Self {
        // 1. Check env var
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(path = %p.display(), "Loaded gateway config from {}", CONFIG_ENV_VAR);
                        return config;
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load config from {}, falling back", CONFIG_ENV_VAR);
                    }
                }
            } else {
                warn!(path = %path, "{} points to non-existent file, falling back", CONFIG_ENV_VAR);
            }
        }

        // 2. Check ./gateway_config.toml
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!("Loaded gateway config from ./{}", LOCAL_CONFIG_FILE);
                    return config;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./{}, using defaults", LOCAL_CONFIG_FILE);
                }
            }
        }

        // 3. Defaults
        info!("No {} found, using built-in defaults", LOCAL_CONFIG_FILE);
        Self::default()
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        let config: Self = toml::from_str(&contents)
            .map_err(|e| ConfigError::Parse(path.to_path_buf(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize config to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Check every value range, collecting all problems before failing.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors: Vec<String> = Vec::new();

        let threshold = self.routing.confidence_threshold;
        if !threshold.is_finite() || threshold <= 0.0 || threshold > 1.0 {
            errors.push(format!(
                "routing.confidence_threshold: {threshold} must be in (0, 1]"
            ));
        }
        if self.routing.top_k == 0 {
            errors.push("routing.top_k: must be at least 1".to_string());
        }

        if self.llm.model.trim().is_empty() {
            errors.push("llm.model: must not be empty".to_string());
        }
        if self.llm.timeout_secs == 0 {
            errors.push("llm.timeout_secs: must be greater than 0".to_string());
        }

        let max_results = self.web_search.max_results;
        if max_results == 0 || max_results > defaults::WEB_SEARCH_MAX_RESULTS_LIMIT {
            errors.push(format!(
                "web_search.max_results: {max_results} must be in 1..={}",
                defaults::WEB_SEARCH_MAX_RESULTS_LIMIT
            ));
        }
        if self.web_search.timeout_secs == 0 {
            errors.push("web_search.timeout_secs: must be greater than 0".to_string());
        }

        if self.refinement.store_path.as_os_str().is_empty() {
            errors.push("refinement.store_path: must not be empty".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(PathBuf, std::io::Error),
    Parse(PathBuf, toml::de::Error),
    Serialize(toml::ser::Error),
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(path, e) => write!(f, "Config I/O error ({}): {}", path.display(), e),
            ConfigError::Parse(path, e) => {
                write!(f, "Config parse error ({}): {}", path.display(), e)
            }
            ConfigError::Serialize(e) => write!(f, "Config serialization error: {}", e),
            ConfigError::Validation(errors) => {
                writeln!(f, "Config validation failed:")?;
                for e in errors {
                    writeln!(f, "  - {}", e)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Sections
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_addr")]
    pub addr: String,
}

fn default_server_addr() -> String {
    defaults::SERVER_ADDR.to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: default_server_addr(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// Best-hit distance below which the KB route is taken
    #[serde(default = "default_confidence_threshold")]
    pub confidence_threshold: f64,

    /// Hits retrieved per query and handed to the KB responder
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

fn default_confidence_threshold() -> f64 {
    defaults::CONFIDENCE_THRESHOLD
}

fn default_top_k() -> usize {
    defaults::ROUTING_TOP_K
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: default_confidence_threshold(),
            top_k: default_top_k(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_llm_model")]
    pub model: String,

    /// API base URL (the model path is appended per request)
    #[serde(default = "default_llm_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_llm_timeout")]
    pub timeout_secs: u64,
}

fn default_llm_model() -> String {
    defaults::LLM_MODEL.to_string()
}

fn default_llm_endpoint() -> String {
    defaults::LLM_ENDPOINT.to_string()
}

fn default_llm_timeout() -> u64 {
    defaults::LLM_TIMEOUT_SECS
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: default_llm_model(),
            endpoint: default_llm_endpoint(),
            timeout_secs: default_llm_timeout(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebSearchConfig {
    #[serde(default = "default_web_endpoint")]
    pub endpoint: String,

    #[serde(default)]
    pub depth: SearchDepth,

    #[serde(default = "default_web_max_results")]
    pub max_results: usize,

    #[serde(default = "default_web_timeout")]
    pub timeout_secs: u64,
}

fn default_web_endpoint() -> String {
    defaults::WEB_SEARCH_ENDPOINT.to_string()
}

fn default_web_max_results() -> usize {
    defaults::WEB_SEARCH_MAX_RESULTS
}

fn default_web_timeout() -> u64 {
    defaults::WEB_SEARCH_TIMEOUT_SECS
}

impl Default for WebSearchConfig {
    fn default() -> Self {
        Self {
            endpoint: default_web_endpoint(),
            depth: SearchDepth::default(),
            max_results: default_web_max_results(),
            timeout_secs: default_web_timeout(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefinementConfig {
    /// JSON file holding the refined few-shot examples
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,

    /// Most recent examples injected into synthesizer prompts (0 disables)
    #[serde(default = "default_few_shot_limit")]
    pub few_shot_limit: usize,
}

fn default_store_path() -> PathBuf {
    PathBuf::from(defaults::REFINED_EXAMPLES_FILE)
}

fn default_few_shot_limit() -> usize {
    defaults::FEW_SHOT_LIMIT
}

impl Default for RefinementConfig {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            few_shot_limit: default_few_shot_limit(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let config = GatewayConfig::default();
        assert!(config.validate().is_ok());
        assert!((config.routing.confidence_threshold - 0.45).abs() < f64::EPSILON);
        assert_eq!(config.routing.top_k, 5);
        assert_eq!(config.web_search.depth, SearchDepth::Advanced);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: GatewayConfig = toml::from_str(
            r#"
[routing]
top_k = 8

[web_search]
depth = "basic"
"#,
        )
        .unwrap();
        assert_eq!(config.routing.top_k, 8);
        assert!((config.routing.confidence_threshold - 0.45).abs() < f64::EPSILON);
        assert_eq!(config.web_search.depth, SearchDepth::Basic);
        assert_eq!(config.llm.model, "gemini-2.5-flash");
    }

    #[test]
    fn test_validation_collects_all_errors() {
        let mut config = GatewayConfig::default();
        config.routing.confidence_threshold = 1.5;
        config.routing.top_k = 0;
        config.web_search.max_results = 0;

        match config.validate() {
            Err(ConfigError::Validation(errors)) => assert_eq!(errors.len(), 3),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = GatewayConfig::default();
        let toml_str = config.to_toml().unwrap();
        let parsed: GatewayConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.server.addr, config.server.addr);
        assert_eq!(parsed.refinement.store_path, config.refinement.store_path);
    }
}
