//! Easel Agent — guardrailed agent execution engine
//!
//! This crate wraps a single multi-step, tool-calling language-model
//! invocation with step limits, wall-clock timeouts, cost budgets, loop
//! detection, and cancellation, and normalizes every possible outcome into
//! one uniform [`RunResult`]. It is an in-process orchestration layer:
//! providers, tools, and request handlers live with the application.

pub mod config;
pub mod cost;
pub mod error;
pub mod interrupt;
pub mod llm;
pub mod runner;
pub mod tools;
pub mod types;

// Re-export commonly used types
pub use config::RunConfig;
pub use cost::{ModelPricing, PricingRegistry, TokenPrice};
pub use error::{AgentError, AgentResult};
pub use interrupt::RunInterrupt;
pub use llm::{ModelCall, ModelRequest, ModelTurn, SamplingParameters};
pub use runner::{
    Action, AgentRunner, OnStep, RunResult, RunStatus, RunStep, StepControl, StepObserver,
    StepReport,
};
pub use tools::{ActionType, PendingConfirmation, Tool, ToolCall, ToolOutput, ToolSchema, ToolSet};
pub use types::TokenUsage;
