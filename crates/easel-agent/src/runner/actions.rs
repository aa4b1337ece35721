//! Approval-gated action proposals

use crate::runner::step::RunStep;
use crate::tools::{ActionType, PendingConfirmation, ToolOutput};
use crate::types::Id;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A proposed effect awaiting human approval
///
/// Derived 1:1 from steps whose result is a pending-confirmation envelope.
/// The engine never mutates an action after creating it; approval happens
/// outside this subsystem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Action {
    /// Freshly generated identifier
    pub id: Id,
    /// Kind of effect proposed
    #[serde(rename = "type")]
    pub action_type: ActionType,
    /// Human-readable description of the proposal
    pub description: String,
    /// Always false at creation
    pub approved: bool,
    /// The entire result payload the tool produced
    pub data: serde_json::Value,
}

impl Action {
    /// Promote a pending-confirmation result into a proposal
    pub fn from_pending(pending: &PendingConfirmation) -> Self {
        let action_type = pending.action_type.unwrap_or(ActionType::Other);
        let description = pending
            .description
            .clone()
            .unwrap_or_else(|| format!("Proposed {action_type} change awaiting approval"));

        Self {
            id: Uuid::new_v4(),
            action_type,
            description,
            approved: false,
            data: pending.payload(),
        }
    }
}

/// Collect the proposals among a run's recorded steps
///
/// Every other step result stays in history and never produces an action.
pub fn collect_actions(steps: &[RunStep]) -> Vec<Action> {
    steps
        .iter()
        .filter_map(|step| match &step.result {
            Some(ToolOutput::Pending(pending)) => Some(Action::from_pending(pending)),
            _ => None,
        })
        .collect()
}
