//! Core Tool trait definition

use crate::error::AgentResult;
use crate::tools::types::{ToolCall, ToolOutput, ToolSchema};
use async_trait::async_trait;

/// Base trait for all tools
///
/// Tools are capabilities the model may invoke during a run. Each tool has a
/// schema describing its input and an implementation that returns either a
/// plain result or a pending-confirmation proposal.
#[async_trait]
pub trait Tool: Send + Sync {
    /// The tool's unique name (e.g., "delete_card")
    fn name(&self) -> &str;

    /// The tool's description, written for the model
    fn description(&self) -> &str;

    /// The tool's JSON schema for input parameters
    fn schema(&self) -> ToolSchema;

    /// Execute the tool with the given call
    ///
    /// # Errors
    ///
    /// Returns `AgentError::Tool` if arguments are invalid or execution
    /// fails. Tools that would apply destructive effects should instead
    /// succeed with `ToolOutput::Pending` so the effect is routed to a
    /// human approver rather than applied unattended.
    async fn invoke(&self, call: &ToolCall) -> AgentResult<ToolOutput>;
}
