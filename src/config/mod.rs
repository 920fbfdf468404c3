//! Gateway Configuration Module
//!
//! Provides the runtime configuration loaded from a TOML file.
//!
//! ## Loading Order
//!
//! 1. `GATEWAY_CONFIG` environment variable (path to TOML file)
//! 2. `gateway_config.toml` in the current working directory
//! 3. Built-in defaults (see [`defaults`])
//!
//! API keys are never part of the TOML file; collaborator adapters read them
//! from the environment (`GEMINI_API_KEY`, `TAVILY_API_KEY`).

mod gateway_config;
pub mod defaults;

pub use gateway_config::*;
