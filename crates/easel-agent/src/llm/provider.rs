//! Provider trait and request/response types

use crate::error::AgentResult;
use crate::runner::observer::StepObserver;
use crate::tools::ToolSet;
use crate::types::TokenUsage;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Sampling parameters forwarded to the provider
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SamplingParameters {
    /// Sampling temperature
    pub temperature: Option<f64>,
    /// Nucleus sampling probability mass
    pub top_p: Option<f64>,
    /// Maximum completion tokens per model response
    pub max_tokens: Option<u32>,
}

/// One complete request to the model call capability
#[derive(Debug, Clone)]
pub struct ModelRequest {
    /// Identifier of the model to invoke
    pub model_id: String,
    /// API key for the provider
    pub api_key: String,
    /// System prompt establishing the agent's role
    pub system_prompt: String,
    /// The user's goal for this run
    pub user_prompt: String,
    /// Sampling parameters
    pub parameters: SamplingParameters,
    /// Hard cap on the number of tool-call steps
    pub max_steps: u32,
}

/// What a completed model call returns
#[derive(Debug, Clone, Default)]
pub struct ModelTurn {
    /// The model's final text
    pub text: String,
    /// Token accounting reported by the provider
    pub usage: TokenUsage,
}

/// The model call capability consumed by the engine
///
/// Implementations drive the provider's multi-step tool-calling loop:
/// invoke tools from `tools` as the model requests them, and report every
/// completed step to `observer` strictly in order. When the observer answers
/// `StepControl::Abort`, or `cancellation` fires, the call must wind down
/// promptly and return whatever partial turn it has — the engine classifies
/// the run from its own records, so the exact return value after an abort
/// does not matter.
#[async_trait]
pub trait ModelCall: Send + Sync {
    /// Run one complete model call
    async fn complete(
        &self,
        request: ModelRequest,
        tools: &ToolSet,
        cancellation: CancellationToken,
        observer: Arc<dyn StepObserver>,
    ) -> AgentResult<ModelTurn>;
}
