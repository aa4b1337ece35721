//! Cooperative per-step hook between the engine and a model call
//!
//! Providers report each completed tool-call step and receive a
//! continue/abort decision in return. This replaces exception-based
//! unwinding across the async boundary: a provider told to abort winds
//! down normally and the engine classifies the run from its own records.

use crate::runner::step::RunStep;
use crate::tools::ToolOutput;
use std::collections::HashMap;

/// A completed step as reported by the provider
///
/// The engine assigns the index and timestamp when it records the step.
#[derive(Debug, Clone)]
pub struct StepReport {
    /// Name of the tool that was called
    pub tool_name: String,
    /// Arguments the model supplied
    pub args: HashMap<String, serde_json::Value>,
    /// The tool's result, if any
    pub result: Option<ToolOutput>,
}

/// The engine's decision after observing a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepControl {
    /// Keep going
    Continue,
    /// Wind down the model call promptly
    Abort,
}

/// Receives steps from the model call, strictly in call order
pub trait StepObserver: Send + Sync {
    /// Observe one completed step and decide whether the call continues
    fn on_step(&self, report: StepReport) -> StepControl;
}

/// Caller-supplied progress callback, invoked once per recorded step
pub type OnStep = Box<dyn Fn(&RunStep) + Send + Sync>;
