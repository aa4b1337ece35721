//! Tool definitions and the tool-set registry
//!
//! Tools are the named capabilities the model may invoke during a run. The
//! engine does not implement any tool itself; it defines the invocation seam
//! and the result envelope, including the pending-confirmation convention
//! that routes destructive effects to a human approver.

pub mod registry;
pub mod tool_trait;
pub mod types;

pub use registry::ToolSet;
pub use tool_trait::Tool;
pub use types::{
    ActionType, PendingConfirmation, ToolCall, ToolOutput, ToolParameter, ToolSchema,
};
