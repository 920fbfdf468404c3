//! Gateway Pipeline
//!
//! ```text
//! Received ──(input guardrail)──► InputChecked ──► Routed ──► Synthesized
//!    │                                                            │
//!    └──► Rejected (400)                   Blocked (403) ◄──(output guardrail)
//!                                                                 │
//!                                                            OutputChecked ──► Responded (200)
//! ```
//!
//! CRITICAL GUARANTEE: a rejected query never reaches the knowledge store,
//! the LLM, or web search.

mod gateway;
mod state;

pub use gateway::Gateway;
pub use state::GatewayStage;
