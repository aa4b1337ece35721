//! The uniform run result

use crate::cost::BudgetBreach;
use crate::runner::actions::Action;
use crate::runner::state::RunPhase;
use crate::runner::step::RunStep;
use crate::types::TokenUsage;
use serde::{Deserialize, Serialize};

/// Wire status of a completed run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    /// The model call completed within every guardrail
    Success,
    /// The run failed (provider error, loop, or budget breach)
    Error,
    /// The cancellation token fired
    Cancelled,
    /// The wall-clock limit elapsed
    Timeout,
}

/// Why a run did not succeed
///
/// Carries enough context to synthesize both the machine-oriented `error`
/// string and the human-readable `summary`.
#[derive(Debug, Clone)]
pub enum FailureKind {
    /// The wall-clock limit elapsed
    Timeout { limit_ms: u64 },
    /// The cancellation token fired
    Cancelled,
    /// The trailing call windows repeated
    LoopDetected { tool_name: String },
    /// The measured spend crossed the ceiling
    CostExceeded(BudgetBreach),
    /// Anything else, carrying the underlying message
    Generic { message: String },
}

impl FailureKind {
    /// The wire status this failure maps to
    pub fn status(&self) -> RunStatus {
        match self {
            FailureKind::Timeout { .. } => RunStatus::Timeout,
            FailureKind::Cancelled => RunStatus::Cancelled,
            FailureKind::LoopDetected { .. }
            | FailureKind::CostExceeded(_)
            | FailureKind::Generic { .. } => RunStatus::Error,
        }
    }

    /// The terminal lifecycle phase this failure maps to
    pub fn phase(&self) -> RunPhase {
        match self {
            FailureKind::Timeout { .. } => RunPhase::TimedOut,
            FailureKind::Cancelled => RunPhase::Cancelled,
            FailureKind::LoopDetected { .. } => RunPhase::LoopDetected,
            FailureKind::CostExceeded(_) => RunPhase::CostExceeded,
            FailureKind::Generic { .. } => RunPhase::Errored,
        }
    }

    /// Machine-oriented reason, distinct from the prose summary
    pub fn reason(&self) -> String {
        match self {
            FailureKind::Timeout { limit_ms } => {
                format!("run_timeout: exceeded {limit_ms}ms wall-clock limit")
            }
            FailureKind::Cancelled => "cancelled: run cancelled by caller".to_string(),
            FailureKind::LoopDetected { tool_name } => {
                format!("loop_detected: tool '{tool_name}' repeating identical calls")
            }
            FailureKind::CostExceeded(breach) => {
                format!("cost_budget_exceeded: {breach}")
            }
            FailureKind::Generic { message } => format!("generic_error: {message}"),
        }
    }

    /// Human-readable explanation of the abort
    pub fn summary(&self) -> String {
        match self {
            FailureKind::Timeout { limit_ms } => {
                format!("The run was stopped after exceeding its {limit_ms}ms time limit.")
            }
            FailureKind::Cancelled => "The run was cancelled before it could finish.".to_string(),
            FailureKind::LoopDetected { tool_name } => format!(
                "The run was stopped because the agent kept repeating the same '{tool_name}' call."
            ),
            FailureKind::CostExceeded(breach) => format!(
                "The run finished but its estimated cost ${:.4} exceeded the ${:.4} budget.",
                breach.estimated_usd, breach.limit_usd
            ),
            FailureKind::Generic { message } => format!("The run failed: {message}"),
        }
    }
}

/// The terminal value of a run, returned exactly once per `execute()`
///
/// Every termination path — success, provider error, loop, budget breach,
/// timeout, cancellation — is folded into this one shape, so callers branch
/// on `status` instead of a try/catch hierarchy. A run that fails after
/// partial progress still carries the steps and actions collected so far.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    /// Exactly one status per run
    pub status: RunStatus,
    /// Proposals awaiting human approval, derived from `steps`
    pub actions: Vec<Action>,
    /// Every recorded step, in call order
    pub steps: Vec<RunStep>,
    /// Always-populated prose: the model's final text on success, a
    /// synthesized explanation otherwise
    pub summary: String,
    /// Token accounting, all zero when unavailable
    pub usage: TokenUsage,
    /// Machine-oriented reason, present iff `status` is not success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RunResult {
    /// Assemble a successful result
    pub fn success(
        final_text: impl Into<String>,
        steps: Vec<RunStep>,
        actions: Vec<Action>,
        usage: TokenUsage,
    ) -> Self {
        let text = final_text.into();
        let summary = if text.trim().is_empty() {
            "The run completed successfully.".to_string()
        } else {
            text
        };

        Self {
            status: RunStatus::Success,
            actions,
            steps,
            summary,
            usage,
            error: None,
        }
    }

    /// Assemble a failed result, keeping whatever was collected
    pub fn failure(
        kind: &FailureKind,
        steps: Vec<RunStep>,
        actions: Vec<Action>,
        usage: TokenUsage,
    ) -> Self {
        Self {
            status: kind.status(),
            actions,
            steps,
            summary: kind.summary(),
            usage,
            error: Some(kind.reason()),
        }
    }

    /// Check if the run succeeded
    pub fn is_success(&self) -> bool {
        self.status == RunStatus::Success
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_keeps_final_text_as_summary() {
        let result = RunResult::success(
            "Renamed two cards.",
            Vec::new(),
            Vec::new(),
            TokenUsage::new(10, 5),
        );
        assert_eq!(result.status, RunStatus::Success);
        assert_eq!(result.summary, "Renamed two cards.");
        assert!(result.error.is_none());
        assert!(result.is_success());
    }

    #[test]
    fn test_success_with_empty_text_synthesizes_summary() {
        let result = RunResult::success("  ", Vec::new(), Vec::new(), TokenUsage::default());
        assert!(!result.summary.is_empty());
        assert!(result.error.is_none());
    }

    #[test]
    fn test_every_failure_kind_populates_error_and_summary() {
        let kinds = [
            FailureKind::Timeout { limit_ms: 60_000 },
            FailureKind::Cancelled,
            FailureKind::LoopDetected {
                tool_name: "search_cards".to_string(),
            },
            FailureKind::CostExceeded(BudgetBreach {
                estimated_usd: 0.75,
                limit_usd: 0.50,
            }),
            FailureKind::Generic {
                message: "provider returned 500".to_string(),
            },
        ];

        for kind in &kinds {
            let result = RunResult::failure(kind, Vec::new(), Vec::new(), TokenUsage::default());
            assert!(!result.is_success());
            assert!(!result.summary.is_empty());
            let error = result.error.expect("non-success must carry an error");
            assert_ne!(error, result.summary);
        }
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            FailureKind::Timeout { limit_ms: 1 }.status(),
            RunStatus::Timeout
        );
        assert_eq!(FailureKind::Cancelled.status(), RunStatus::Cancelled);
        assert_eq!(
            FailureKind::LoopDetected {
                tool_name: "t".to_string()
            }
            .status(),
            RunStatus::Error
        );
        assert_eq!(
            FailureKind::CostExceeded(BudgetBreach {
                estimated_usd: 1.0,
                limit_usd: 0.5
            })
            .status(),
            RunStatus::Error
        );
    }

    #[test]
    fn test_phase_mapping() {
        assert_eq!(
            FailureKind::Timeout { limit_ms: 1 }.phase(),
            RunPhase::TimedOut
        );
        assert_eq!(FailureKind::Cancelled.phase(), RunPhase::Cancelled);
        assert_eq!(
            FailureKind::Generic {
                message: "x".to_string()
            }
            .phase(),
            RunPhase::Errored
        );
    }

    #[test]
    fn test_machine_reasons_are_prefixed() {
        assert!(FailureKind::Cancelled.reason().starts_with("cancelled:"));
        assert!(
            FailureKind::LoopDetected {
                tool_name: "t".to_string()
            }
            .reason()
            .starts_with("loop_detected:")
        );
        assert!(
            FailureKind::Generic {
                message: "boom".to_string()
            }
            .reason()
            .starts_with("generic_error:")
        );
    }

    #[test]
    fn test_wire_status_serialization() {
        assert_eq!(
            serde_json::to_string(&RunStatus::Success).unwrap(),
            "\"success\""
        );
        assert_eq!(
            serde_json::to_string(&RunStatus::Timeout).unwrap(),
            "\"timeout\""
        );
    }
}
