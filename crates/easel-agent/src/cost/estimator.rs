//! Cost estimation and spend-ceiling enforcement

use crate::cost::pricing::PricingRegistry;
use crate::types::TokenUsage;

/// A run's estimated spend crossed its configured ceiling
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetBreach {
    /// Estimated cost of the run in USD
    pub estimated_usd: f64,
    /// The configured ceiling in USD
    pub limit_usd: f64,
}

impl std::fmt::Display for BudgetBreach {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "estimated cost ${:.4} exceeds budget ${:.4}",
            self.estimated_usd, self.limit_usd
        )
    }
}

/// Estimate the USD cost of a run from its measured usage
///
/// Evaluated exactly once, after the model call has fully completed; this
/// bounds total-run spend, not per-step spend. An unknown model estimates
/// as zero cost rather than failing the run.
pub fn estimate_cost_usd(pricing: &PricingRegistry, model_id: &str, usage: &TokenUsage) -> f64 {
    match pricing.calculate_cost(model_id, usage.prompt_tokens, usage.completion_tokens) {
        Some(cost) => cost,
        None => {
            tracing::warn!(model_id, "no pricing entry for model, estimating $0");
            0.0
        }
    }
}

/// Compare an estimated cost to the run's spend ceiling
pub fn enforce_budget(estimated_usd: f64, limit_usd: f64) -> Result<(), BudgetBreach> {
    if estimated_usd > limit_usd {
        return Err(BudgetBreach {
            estimated_usd,
            limit_usd,
        });
    }
    Ok(())
}
