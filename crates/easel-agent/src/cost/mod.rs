//! Cost estimation and budget enforcement
//!
//! Pricing is a static lookup from model identifier to per-token cost; the
//! estimator converts a run's measured usage into USD exactly once, after
//! the model call has settled, and the enforcer compares that figure to the
//! run's spend ceiling.

pub mod estimator;
pub mod pricing;

pub use estimator::{enforce_budget, estimate_cost_usd, BudgetBreach};
pub use pricing::{ModelPricing, PricingRegistry, TokenPrice};
