//! Gateway invocation stages

use serde::Serialize;

/// Position of one invocation in the gateway state machine.
///
/// Stages only advance; `Rejected`, `Blocked` and `Responded` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GatewayStage {
    Received,
    InputChecked,
    Routed,
    Synthesized,
    OutputChecked,
    Responded,
    Rejected,
    Blocked,
}

impl GatewayStage {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            GatewayStage::Responded | GatewayStage::Rejected | GatewayStage::Blocked
        )
    }
}

impl std::fmt::Display for GatewayStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GatewayStage::Received => "received",
            GatewayStage::InputChecked => "input_checked",
            GatewayStage::Routed => "routed",
            GatewayStage::Synthesized => "synthesized",
            GatewayStage::OutputChecked => "output_checked",
            GatewayStage::Responded => "responded",
            GatewayStage::Rejected => "rejected",
            GatewayStage::Blocked => "blocked",
        };
        f.write_str(name)
    }
}
