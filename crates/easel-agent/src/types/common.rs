//! Identifier and token accounting types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for runs, actions, and other entities
pub type Id = Uuid;

/// Token usage statistics for a model call
///
/// All fields are non-negative counters; a default instance (all zero) is
/// used whenever a run aborts before any accounting was available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TokenUsage {
    /// Number of prompt (input) tokens
    pub prompt_tokens: u64,
    /// Number of completion (output) tokens
    pub completion_tokens: u64,
    /// Total tokens (prompt + completion)
    pub total_tokens: u64,
}

impl TokenUsage {
    /// Create a new usage record; the total is derived
    pub fn new(prompt_tokens: u64, completion_tokens: u64) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens + completion_tokens,
        }
    }

    /// Add usage from another record
    pub fn add(&mut self, other: &TokenUsage) {
        self.prompt_tokens += other.prompt_tokens;
        self.completion_tokens += other.completion_tokens;
        self.total_tokens += other.total_tokens;
    }

    /// Whether any tokens were accounted at all
    pub fn is_empty(&self) -> bool {
        self.total_tokens == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_is_derived() {
        let usage = TokenUsage::new(500, 200);
        assert_eq!(usage.total_tokens, 700);
    }

    #[test]
    fn test_default_is_zero() {
        let usage = TokenUsage::default();
        assert_eq!(usage.prompt_tokens, 0);
        assert_eq!(usage.completion_tokens, 0);
        assert_eq!(usage.total_tokens, 0);
        assert!(usage.is_empty());
    }

    #[test]
    fn test_add_accumulates() {
        let mut usage = TokenUsage::new(100, 50);
        usage.add(&TokenUsage::new(10, 5));
        assert_eq!(usage.prompt_tokens, 110);
        assert_eq!(usage.completion_tokens, 55);
        assert_eq!(usage.total_tokens, 165);
    }

    #[test]
    fn test_serialized_field_names() {
        let json = serde_json::to_value(TokenUsage::new(1, 2)).unwrap();
        assert_eq!(json["promptTokens"], 1);
        assert_eq!(json["completionTokens"], 2);
        assert_eq!(json["totalTokens"], 3);
    }
}
