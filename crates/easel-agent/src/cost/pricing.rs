//! Model pricing definitions

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Price per 1M tokens
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TokenPrice {
    /// Price per 1M input tokens (USD)
    pub input: f64,
    /// Price per 1M output tokens (USD)
    pub output: f64,
}

impl TokenPrice {
    /// Create new token price
    pub const fn new(input: f64, output: f64) -> Self {
        Self { input, output }
    }

    /// Calculate cost for given token counts
    pub fn calculate(&self, input_tokens: u64, output_tokens: u64) -> f64 {
        let input_cost = (input_tokens as f64 / 1_000_000.0) * self.input;
        let output_cost = (output_tokens as f64 / 1_000_000.0) * self.output;
        input_cost + output_cost
    }
}

/// Model pricing information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelPricing {
    /// Model identifier
    pub model_id: String,
    /// Provider name
    pub provider: String,
    /// Display name
    pub display_name: String,
    /// Token pricing
    pub price: TokenPrice,
}

impl ModelPricing {
    /// Create new model pricing
    pub fn new(
        model_id: impl Into<String>,
        provider: impl Into<String>,
        price: TokenPrice,
    ) -> Self {
        let model_id = model_id.into();
        Self {
            display_name: model_id.clone(),
            model_id,
            provider: provider.into(),
            price,
        }
    }

    /// Set display name
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = name.into();
        self
    }

    /// Calculate cost for given usage
    pub fn calculate_cost(&self, input_tokens: u64, output_tokens: u64) -> f64 {
        self.price.calculate(input_tokens, output_tokens)
    }
}

/// Pricing registry for all known models
#[derive(Debug, Clone, Default)]
pub struct PricingRegistry {
    /// Model pricing by model ID
    models: HashMap<String, ModelPricing>,
    /// Aliases for model IDs
    aliases: HashMap<String, String>,
}

impl PricingRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create registry with default pricing
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register_defaults();
        registry
    }

    /// Register a model
    pub fn register(&mut self, pricing: ModelPricing) {
        self.models.insert(pricing.model_id.clone(), pricing);
    }

    /// Register an alias
    pub fn register_alias(&mut self, alias: impl Into<String>, model_id: impl Into<String>) {
        self.aliases.insert(alias.into(), model_id.into());
    }

    /// Get pricing for a model
    pub fn get(&self, model_id: &str) -> Option<&ModelPricing> {
        // Check direct match
        if let Some(pricing) = self.models.get(model_id) {
            return Some(pricing);
        }

        // Check aliases
        if let Some(actual_id) = self.aliases.get(model_id) {
            return self.models.get(actual_id);
        }

        // Try partial match
        self.models
            .values()
            .find(|p| model_id.contains(&p.model_id) || p.model_id.contains(model_id))
    }

    /// Calculate cost for a model
    pub fn calculate_cost(
        &self,
        model_id: &str,
        input_tokens: u64,
        output_tokens: u64,
    ) -> Option<f64> {
        self.get(model_id)
            .map(|p| p.calculate_cost(input_tokens, output_tokens))
    }

    /// List all models (returns iterator to avoid allocation)
    pub fn list_models(&self) -> impl Iterator<Item = &ModelPricing> {
        self.models.values()
    }

    /// Register default model pricing (as of mid 2026)
    fn register_defaults(&mut self) {
        // Anthropic models
        self.register(
            ModelPricing::new(
                "claude-sonnet-4-5-20250929",
                "anthropic",
                TokenPrice::new(3.0, 15.0),
            )
            .with_display_name("Claude Sonnet 4.5"),
        );
        self.register_alias("claude-sonnet-4-5", "claude-sonnet-4-5-20250929");
        self.register_alias("sonnet", "claude-sonnet-4-5-20250929");

        self.register(
            ModelPricing::new(
                "claude-haiku-4-5-20251001",
                "anthropic",
                TokenPrice::new(1.0, 5.0),
            )
            .with_display_name("Claude Haiku 4.5"),
        );
        self.register_alias("claude-haiku-4-5", "claude-haiku-4-5-20251001");
        self.register_alias("haiku", "claude-haiku-4-5-20251001");

        self.register(
            ModelPricing::new(
                "claude-opus-4-5-20251101",
                "anthropic",
                TokenPrice::new(15.0, 75.0),
            )
            .with_display_name("Claude Opus 4.5"),
        );
        self.register_alias("opus", "claude-opus-4-5-20251101");

        // OpenAI models
        self.register(
            ModelPricing::new("gpt-4o", "openai", TokenPrice::new(2.50, 10.0))
                .with_display_name("GPT-4o"),
        );

        self.register(
            ModelPricing::new("gpt-4o-mini", "openai", TokenPrice::new(0.15, 0.60))
                .with_display_name("GPT-4o Mini"),
        );

        self.register(
            ModelPricing::new("o3-mini", "openai", TokenPrice::new(1.10, 4.40))
                .with_display_name("o3 Mini"),
        );

        // Google models
        self.register(
            ModelPricing::new("gemini-2.5-pro", "google", TokenPrice::new(1.25, 10.0))
                .with_display_name("Gemini 2.5 Pro"),
        );

        self.register(
            ModelPricing::new("gemini-2.5-flash", "google", TokenPrice::new(0.30, 2.50))
                .with_display_name("Gemini 2.5 Flash"),
        );
    }
}
