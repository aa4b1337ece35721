//! The guardrailed agent run
//!
//! One `execute()` call wraps one multi-step, tool-calling model invocation
//! with step limits, a wall-clock timeout, a cost budget, loop detection,
//! and cancellation, and folds every termination path into a `RunResult`.

pub mod actions;
pub mod executor;
pub mod loop_detector;
pub mod observer;
pub mod result;
pub mod state;
pub mod step;

pub use actions::{collect_actions, Action};
pub use executor::AgentRunner;
pub use loop_detector::{args_hash, is_looping, ToolCallRecord, DEFAULT_LOOP_WINDOW};
pub use observer::{OnStep, StepControl, StepObserver, StepReport};
pub use result::{FailureKind, RunResult, RunStatus};
pub use state::RunPhase;
pub use step::RunStep;
