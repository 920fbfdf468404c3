//! Gateway request/response types

use serde::{Deserialize, Serialize};

use super::RouteDecision;

/// Incoming question for the gateway
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayRequest {
    pub query: String,
    /// Free-form difficulty tag (e.g. "JEE"); informational only
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Final mode reported to the caller
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GatewayMode {
    /// Input guardrail refused the query
    Rejected,
    /// Output guardrail suppressed the generated answer
    Blocked,
    KbResponse,
    WebSearch,
}

impl From<RouteDecision> for GatewayMode {
    fn from(decision: RouteDecision) -> Self {
        match decision {
            RouteDecision::KbResponse => GatewayMode::KbResponse,
            RouteDecision::WebSearch => GatewayMode::WebSearch,
        }
    }
}

impl std::fmt::Display for GatewayMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GatewayMode::Rejected => write!(f, "REJECTED"),
            GatewayMode::Blocked => write!(f, "BLOCKED"),
            GatewayMode::KbResponse => write!(f, "KB_RESPONSE"),
            GatewayMode::WebSearch => write!(f, "WEB_SEARCH"),
        }
    }
}

/// Status class of a gateway response
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum StatusClass {
    #[serde(rename = "200_OK")]
    Ok,
    #[serde(rename = "400_BAD_INPUT")]
    BadInput,
    #[serde(rename = "403_FORBIDDEN")]
    Forbidden,
}

impl StatusClass {
    /// Numeric HTTP status for this class
    pub fn code(self) -> u16 {
        match self {
            StatusClass::Ok => 200,
            StatusClass::BadInput => 400,
            StatusClass::Forbidden => 403,
        }
    }
}

impl std::fmt::Display for StatusClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusClass::Ok => write!(f, "200_OK"),
            StatusClass::BadInput => write!(f, "400_BAD_INPUT"),
            StatusClass::Forbidden => write!(f, "403_FORBIDDEN"),
        }
    }
}

/// Structured result of one gateway invocation.
///
/// Exactly one of `message` / `solution` is populated. `confidence` only
/// accompanies a served `solution`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayResponse {
    pub mode: GatewayMode,
    pub status: StatusClass,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solution: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl GatewayResponse {
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            mode: GatewayMode::Rejected,
            status: StatusClass::BadInput,
            message: Some(message.into()),
            solution: None,
            confidence: None,
        }
    }

    pub fn blocked(message: impl Into<String>) -> Self {
        Self {
            mode: GatewayMode::Blocked,
            status: StatusClass::Forbidden,
            message: Some(message.into()),
            solution: None,
            confidence: None,
        }
    }

    pub fn served(decision: RouteDecision, solution: String, confidence: f64) -> Self {
        Self {
            mode: decision.into(),
            status: StatusClass::Ok,
            message: None,
            solution: Some(solution),
            confidence: Some(confidence),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_serializes_message_only() {
        let resp = GatewayResponse::rejected("nope");
        let v = serde_json::to_value(&resp).unwrap();
        assert_eq!(v["mode"], "REJECTED");
        assert_eq!(v["status"], "400_BAD_INPUT");
        assert_eq!(v["message"], "nope");
        assert!(v.get("solution").is_none());
        assert!(v.get("confidence").is_none());
    }

    #[test]
    fn test_served_serializes_solution_and_confidence() {
        let resp = GatewayResponse::served(RouteDecision::KbResponse, "answer".into(), 0.8);
        let v = serde_json::to_value(&resp).unwrap();
        assert_eq!(v["mode"], "KB_RESPONSE");
        assert_eq!(v["status"], "200_OK");
        assert_eq!(v["solution"], "answer");
        assert!(v.get("message").is_none());
    }

    #[test]
    fn test_request_optional_fields_default() {
        let req: GatewayRequest = serde_json::from_str(r#"{"query":"solve x"}"#).unwrap();
        assert_eq!(req.query, "solve x");
        assert!(req.level.is_none());
        assert!(req.user_id.is_none());
    }
}
