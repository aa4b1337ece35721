//! Run configuration limits validation

use crate::config::RunConfig;
use crate::error::{AgentError, AgentResult};

/// Validate limits and constraints of a run configuration
pub fn validate_run_config(config: &RunConfig) -> AgentResult<()> {
    if config.max_steps == 0 {
        return Err(AgentError::config("max_steps must be at least 1"));
    }

    if config.timeout_ms == 0 {
        return Err(AgentError::config("timeout_ms must be greater than 0"));
    }

    if !config.max_cost_usd.is_finite() || config.max_cost_usd < 0.0 {
        return Err(AgentError::config(format!(
            "max_cost_usd must be a non-negative number, got {}",
            config.max_cost_usd
        )));
    }

    if config.model_id.trim().is_empty() {
        return Err(AgentError::config("model_id must not be empty"));
    }

    Ok(())
}
