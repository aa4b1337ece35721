//! Run lifecycle state

use serde::{Deserialize, Serialize};

/// Lifecycle state of a single run
///
/// A run moves NotStarted → Running → one terminal state. Terminal states
/// are final for the call; the engine issues no retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPhase {
    /// `execute()` has not begun driving the model call
    NotStarted,
    /// The model call is in flight
    Running,
    /// The call completed and passed the budget check
    Succeeded,
    /// The wall-clock limit elapsed, at the timer or mid-stream
    TimedOut,
    /// The trailing call windows repeated
    LoopDetected,
    /// The cancellation token fired
    Cancelled,
    /// The measured spend crossed the ceiling
    CostExceeded,
    /// The provider or configuration failed
    Errored,
}

impl std::fmt::Display for RunPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunPhase::NotStarted => write!(f, "not_started"),
            RunPhase::Running => write!(f, "running"),
            RunPhase::Succeeded => write!(f, "succeeded"),
            RunPhase::TimedOut => write!(f, "timed_out"),
            RunPhase::LoopDetected => write!(f, "loop_detected"),
            RunPhase::Cancelled => write!(f, "cancelled"),
            RunPhase::CostExceeded => write!(f, "cost_exceeded"),
            RunPhase::Errored => write!(f, "errored"),
        }
    }
}

impl RunPhase {
    /// Check if the phase is terminal
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RunPhase::NotStarted | RunPhase::Running)
    }

    /// Check if the phase is a successful completion
    pub fn is_successful(&self) -> bool {
        matches!(self, RunPhase::Succeeded)
    }
}
