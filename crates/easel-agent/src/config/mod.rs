//! Per-run configuration

mod validation;

pub use validation::validate_run_config;

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Immutable configuration for a single agent run
///
/// One instance is supplied per `execute()` call; the engine never mutates
/// it and nothing in it survives the run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunConfig {
    /// Maximum number of tool-call steps the model may take (at least 1)
    pub max_steps: u32,
    /// Wall-clock limit for the whole run in milliseconds (greater than 0)
    pub timeout_ms: u64,
    /// Spend ceiling for the run in USD (non-negative)
    pub max_cost_usd: f64,
    /// Identifier of the model to invoke
    pub model_id: String,
    /// API key handed through to the model provider
    pub api_key: String,
}

impl RunConfig {
    /// Create a config with the default guardrails for an interactive run
    pub fn new(model_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            max_steps: 10,
            timeout_ms: 60_000,
            max_cost_usd: 0.50,
            model_id: model_id.into(),
            api_key: api_key.into(),
        }
    }

    /// Set the step limit
    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Set the wall-clock limit in milliseconds
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set the spend ceiling in USD
    pub fn with_max_cost_usd(mut self, max_cost_usd: f64) -> Self {
        self.max_cost_usd = max_cost_usd;
        self
    }

    /// The wall-clock limit as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns `AgentError::Config` if any limit is out of range or the
    /// model identifier is empty.
    pub fn validate(&self) -> crate::error::AgentResult<()> {
        validate_run_config(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RunConfig::new("claude-sonnet-4-5", "sk-test");
        assert_eq!(config.max_steps, 10);
        assert_eq!(config.timeout_ms, 60_000);
        assert!((config.max_cost_usd - 0.50).abs() < f64::EPSILON);
        assert_eq!(config.timeout(), Duration::from_millis(60_000));
    }

    #[test]
    fn test_builder_setters() {
        let config = RunConfig::new("gpt-4o", "sk-test")
            .with_max_steps(3)
            .with_timeout_ms(5_000)
            .with_max_cost_usd(0.05);
        assert_eq!(config.max_steps, 3);
        assert_eq!(config.timeout_ms, 5_000);
        assert!((config.max_cost_usd - 0.05).abs() < f64::EPSILON);
    }
}
