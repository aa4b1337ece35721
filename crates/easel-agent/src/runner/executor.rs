//! The guardrailed agent loop

use crate::config::RunConfig;
use crate::cost::{enforce_budget, estimate_cost_usd, PricingRegistry};
use crate::llm::{ModelCall, ModelRequest, SamplingParameters};
use crate::runner::actions::Action;
use crate::runner::loop_detector::{is_looping, ToolCallRecord, DEFAULT_LOOP_WINDOW};
use crate::runner::observer::{OnStep, StepControl, StepObserver, StepReport};
use crate::runner::result::{FailureKind, RunResult};
use crate::runner::state::RunPhase;
use crate::runner::step::RunStep;
use crate::tools::{ToolOutput, ToolSet};
use crate::types::TokenUsage;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Why the observer told the model call to wind down
#[derive(Debug, Clone)]
enum AbortReason {
    LoopDetected { tool_name: String },
    DeadlineExceeded,
}

/// Everything a run accumulates, shared between the executor and the
/// observer it hands to the model call
struct RunLedger {
    phase: RunPhase,
    steps: Vec<RunStep>,
    records: Vec<ToolCallRecord>,
    actions: Vec<Action>,
    abort: Option<AbortReason>,
}

impl RunLedger {
    fn new() -> Self {
        Self {
            phase: RunPhase::NotStarted,
            steps: Vec::new(),
            records: Vec::new(),
            actions: Vec::new(),
            abort: None,
        }
    }
}

/// Observer wired into the model call: records steps and runs the per-step
/// guardrails, strictly in reported order
struct GuardrailObserver {
    ledger: Arc<Mutex<RunLedger>>,
    on_step: Option<OnStep>,
    started: Instant,
    timeout: Duration,
}

impl StepObserver for GuardrailObserver {
    fn on_step(&self, report: StepReport) -> StepControl {
        let mut ledger = self.ledger.lock();

        // Steps are only accepted while the run is live; a provider that
        // keeps reporting after an abort decision gets the same answer again.
        if ledger.phase != RunPhase::Running || ledger.abort.is_some() {
            return StepControl::Abort;
        }

        let index = ledger.steps.len() as u32;
        let step = RunStep::new(index, report.tool_name, report.args, report.result);

        if let Some(callback) = &self.on_step {
            callback(&step);
        }

        if let Some(ToolOutput::Pending(pending)) = &step.result {
            ledger.actions.push(Action::from_pending(pending));
        }

        ledger
            .records
            .push(ToolCallRecord::new(step.tool_name.clone(), &step.args));
        ledger.steps.push(step);

        if is_looping(&ledger.records, DEFAULT_LOOP_WINDOW) {
            let tool_name = ledger
                .records
                .last()
                .map(|record| record.tool_name.clone())
                .unwrap_or_default();
            tracing::warn!(tool = %tool_name, steps = ledger.steps.len(), "loop detected, aborting run");
            ledger.abort = Some(AbortReason::LoopDetected { tool_name });
            return StepControl::Abort;
        }

        if self.started.elapsed() >= self.timeout {
            tracing::warn!(
                steps = ledger.steps.len(),
                timeout_ms = self.timeout.as_millis() as u64,
                "wall-clock limit exceeded mid-run, aborting"
            );
            ledger.abort = Some(AbortReason::DeadlineExceeded);
            return StepControl::Abort;
        }

        StepControl::Continue
    }
}

/// How the race between the model call, the token, and the timer settled
enum RaceOutcome {
    Settled(crate::error::AgentResult<crate::llm::ModelTurn>),
    Cancelled,
    TimerElapsed,
}

/// The guardrailed agent execution engine
///
/// Wraps one multi-step, tool-calling model invocation with step limits, a
/// wall-clock timeout, a cost budget, loop detection, and cancellation.
/// `execute()` never panics the caller out and never returns an `Err`:
/// every outcome is folded into a `RunResult`.
pub struct AgentRunner {
    provider: Arc<dyn ModelCall>,
    pricing: PricingRegistry,
    sampling: SamplingParameters,
}

impl AgentRunner {
    /// Create a runner over the given model call capability
    pub fn new(provider: Arc<dyn ModelCall>) -> Self {
        Self {
            provider,
            pricing: PricingRegistry::with_defaults(),
            sampling: SamplingParameters::default(),
        }
    }

    /// Replace the pricing table
    pub fn with_pricing(mut self, pricing: PricingRegistry) -> Self {
        self.pricing = pricing;
        self
    }

    /// Set the sampling parameters forwarded to the provider
    pub fn with_sampling(mut self, sampling: SamplingParameters) -> Self {
        self.sampling = sampling;
        self
    }

    /// Run one guardrailed agent invocation
    ///
    /// Returns within `config.timeout_ms` plus a small fixed overhead even
    /// if the model call never resolves. A token that is already cancelled
    /// short-circuits the whole run; the model is never invoked.
    pub async fn execute(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        tools: &ToolSet,
        config: &RunConfig,
        cancellation: Option<CancellationToken>,
        on_step: Option<OnStep>,
    ) -> RunResult {
        let token = cancellation.unwrap_or_default();

        if token.is_cancelled() {
            tracing::info!(model = %config.model_id, "run cancelled before start");
            return RunResult::failure(
                &FailureKind::Cancelled,
                Vec::new(),
                Vec::new(),
                TokenUsage::default(),
            );
        }

        if let Err(err) = config.validate() {
            tracing::error!(error = %err, "invalid run configuration");
            return RunResult::failure(
                &FailureKind::Generic {
                    message: err.to_string(),
                },
                Vec::new(),
                Vec::new(),
                TokenUsage::default(),
            );
        }

        tracing::info!(
            model = %config.model_id,
            max_steps = config.max_steps,
            timeout_ms = config.timeout_ms,
            max_cost_usd = config.max_cost_usd,
            tools = tools.len(),
            "starting guardrailed run"
        );

        let ledger = Arc::new(Mutex::new(RunLedger::new()));
        ledger.lock().phase = RunPhase::Running;

        let observer: Arc<dyn StepObserver> = Arc::new(GuardrailObserver {
            ledger: ledger.clone(),
            on_step,
            started: Instant::now(),
            timeout: config.timeout(),
        });

        let request = ModelRequest {
            model_id: config.model_id.clone(),
            api_key: config.api_key.clone(),
            system_prompt: system_prompt.to_string(),
            user_prompt: user_prompt.to_string(),
            parameters: self.sampling.clone(),
            max_steps: config.max_steps,
        };

        let call = self.provider.complete(request, tools, token.clone(), observer);

        // First to settle wins; a timer or token win discards the call.
        let outcome = tokio::select! {
            result = call => RaceOutcome::Settled(result),
            _ = token.cancelled() => RaceOutcome::Cancelled,
            _ = tokio::time::sleep(config.timeout()) => RaceOutcome::TimerElapsed,
        };

        let (steps, actions, abort) = {
            let mut ledger = ledger.lock();
            (
                std::mem::take(&mut ledger.steps),
                std::mem::take(&mut ledger.actions),
                ledger.abort.take(),
            )
        };

        // Classify the race into a success turn or a failure kind, keeping
        // the usage that was actually measured on each path.
        let disposition: Result<(String, TokenUsage), (FailureKind, TokenUsage)> = match outcome {
            RaceOutcome::Cancelled => Err((FailureKind::Cancelled, TokenUsage::default())),
            RaceOutcome::TimerElapsed => Err((
                FailureKind::Timeout {
                    limit_ms: config.timeout_ms,
                },
                TokenUsage::default(),
            )),
            RaceOutcome::Settled(Ok(turn)) => match abort {
                Some(AbortReason::LoopDetected { tool_name }) => {
                    Err((FailureKind::LoopDetected { tool_name }, turn.usage))
                }
                Some(AbortReason::DeadlineExceeded) => Err((
                    FailureKind::Timeout {
                        limit_ms: config.timeout_ms,
                    },
                    turn.usage,
                )),
                None => {
                    let cost = estimate_cost_usd(&self.pricing, &config.model_id, &turn.usage);
                    tracing::debug!(
                        cost_usd = cost,
                        total_tokens = turn.usage.total_tokens,
                        "run cost estimated"
                    );
                    match enforce_budget(cost, config.max_cost_usd) {
                        Err(breach) => {
                            tracing::warn!(
                                estimated_usd = breach.estimated_usd,
                                limit_usd = breach.limit_usd,
                                "run exceeded its cost budget"
                            );
                            Err((FailureKind::CostExceeded(breach), turn.usage))
                        }
                        Ok(()) => Ok((turn.text, turn.usage)),
                    }
                }
            },
            RaceOutcome::Settled(Err(err)) => {
                let kind = if token.is_cancelled()
                    || matches!(err, crate::error::AgentError::Cancelled)
                {
                    FailureKind::Cancelled
                } else {
                    match abort {
                        Some(AbortReason::LoopDetected { tool_name }) => {
                            FailureKind::LoopDetected { tool_name }
                        }
                        Some(AbortReason::DeadlineExceeded) => FailureKind::Timeout {
                            limit_ms: config.timeout_ms,
                        },
                        None => FailureKind::Generic {
                            message: err.to_string(),
                        },
                    }
                };
                Err((kind, TokenUsage::default()))
            }
        };

        let (result, phase) = match disposition {
            Ok((text, usage)) => (
                RunResult::success(text, steps, actions, usage),
                RunPhase::Succeeded,
            ),
            Err((kind, usage)) => {
                let phase = kind.phase();
                (RunResult::failure(&kind, steps, actions, usage), phase)
            }
        };
        let final_phase = {
            let mut ledger = ledger.lock();
            ledger.phase = phase;
            ledger.phase
        };

        tracing::info!(
            phase = %final_phase,
            steps = result.steps.len(),
            actions = result.actions.len(),
            total_tokens = result.usage.total_tokens,
            "run finished"
        );

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn args(pairs: &[(&str, serde_json::Value)]) -> HashMap<String, serde_json::Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn observer(
        ledger: &Arc<Mutex<RunLedger>>,
        on_step: Option<OnStep>,
        timeout: Duration,
    ) -> GuardrailObserver {
        ledger.lock().phase = RunPhase::Running;
        GuardrailObserver {
            ledger: ledger.clone(),
            on_step,
            started: Instant::now(),
            timeout,
        }
    }

    #[tokio::test]
    async fn test_observer_records_steps_in_order() {
        let ledger = Arc::new(Mutex::new(RunLedger::new()));
        let seen = Arc::new(AtomicUsize::new(0));
        let seen_cb = seen.clone();
        let obs = observer(
            &ledger,
            Some(Box::new(move |_step| {
                seen_cb.fetch_add(1, Ordering::SeqCst);
            })),
            Duration::from_secs(60),
        );

        for i in 0..3 {
            let control = obs.on_step(StepReport {
                tool_name: "search_cards".to_string(),
                args: args(&[("query", json!(i))]),
                result: Some(ToolOutput::plain("hit")),
            });
            assert_eq!(control, StepControl::Continue);
        }

        let ledger = ledger.lock();
        assert_eq!(ledger.steps.len(), 3);
        assert_eq!(ledger.steps[0].index, 0);
        assert_eq!(ledger.steps[2].index, 2);
        assert_eq!(seen.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_observer_collects_pending_actions() {
        let ledger = Arc::new(Mutex::new(RunLedger::new()));
        let obs = observer(&ledger, None, Duration::from_secs(60));

        obs.on_step(StepReport {
            tool_name: "delete_card".to_string(),
            args: args(&[("card_id", json!("c1"))]),
            result: Some(ToolOutput::from_value(json!({
                "status": "pending_confirmation",
                "actionType": "delete",
                "description": "Delete card",
                "cardId": "c1"
            }))),
        });
        obs.on_step(StepReport {
            tool_name: "summarize_card".to_string(),
            args: args(&[("card_id", json!("c2"))]),
            result: Some(ToolOutput::plain("summary")),
        });

        let ledger = ledger.lock();
        assert_eq!(ledger.steps.len(), 2);
        assert_eq!(ledger.actions.len(), 1);
        assert!(!ledger.actions[0].approved);
    }

    #[tokio::test]
    async fn test_observer_aborts_on_loop() {
        let ledger = Arc::new(Mutex::new(RunLedger::new()));
        let obs = observer(&ledger, None, Duration::from_secs(60));

        let report = || StepReport {
            tool_name: "read_card".to_string(),
            args: args(&[("card_id", json!("c1"))]),
            result: Some(ToolOutput::plain("content")),
        };

        // Identical calls: the sixth completes both windows.
        for _ in 0..5 {
            assert_eq!(obs.on_step(report()), StepControl::Continue);
        }
        assert_eq!(obs.on_step(report()), StepControl::Abort);
        assert!(matches!(
            ledger.lock().abort,
            Some(AbortReason::LoopDetected { .. })
        ));

        // A provider that keeps reporting gets the same answer.
        assert_eq!(obs.on_step(report()), StepControl::Abort);
        assert_eq!(ledger.lock().steps.len(), 6);
    }

    #[tokio::test(start_paused = true)]
    async fn test_observer_aborts_past_deadline() {
        let ledger = Arc::new(Mutex::new(RunLedger::new()));
        let obs = observer(&ledger, None, Duration::from_millis(100));

        tokio::time::advance(Duration::from_millis(150)).await;

        let control = obs.on_step(StepReport {
            tool_name: "search_cards".to_string(),
            args: HashMap::new(),
            result: None,
        });
        assert_eq!(control, StepControl::Abort);
        assert!(matches!(
            ledger.lock().abort,
            Some(AbortReason::DeadlineExceeded)
        ));
        // The step itself is still recorded; partial progress is never lost.
        assert_eq!(ledger.lock().steps.len(), 1);
    }
}
