//! Shared data structures for the math tutor gateway
//!
//! This module defines the core types passed between pipeline stages:
//! - RetrievalHit / WebResult (collaborator outputs)
//! - RouteDecision (similarity router output)
//! - GatewayMode, StatusClass, GatewayResponse (gateway output)
//! - FeedbackItem, Assessment, RefinedExample (refinement loop)

mod retrieval;
mod routing;
mod gateway;
mod feedback;

pub use retrieval::*;
pub use routing::*;
pub use gateway::*;
pub use feedback::*;
