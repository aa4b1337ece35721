//! Core error types for the agent engine

use thiserror::Error;

/// Result type alias for agent engine operations
pub type AgentResult<T> = Result<T, AgentError>;

/// Main error type for the agent engine
///
/// These errors circulate between the engine and its collaborators (model
/// providers, tools). None of them ever escape `AgentRunner::execute` —
/// every failure is folded into a `RunResult` before returning.
#[derive(Error, Debug, Clone)]
pub enum AgentError {
    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Model provider errors
    #[error("Model error: {message}")]
    Model {
        message: String,
        provider: Option<String>,
    },

    /// Tool execution errors
    #[error("Tool error: {tool_name}: {message}")]
    Tool { tool_name: String, message: String },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {message}")]
    Json { message: String },

    /// Invalid input errors
    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
        field: Option<String>,
    },

    /// Run exceeded its wall-clock limit
    #[error("Run timed out after {ms} ms")]
    Timeout { ms: u64 },

    /// Run was cancelled
    #[error("Run was cancelled")]
    Cancelled,

    /// Generic error with context
    #[error("Error: {message}")]
    Other { message: String },
}

impl AgentError {
    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new model provider error
    pub fn model(message: impl Into<String>) -> Self {
        Self::Model {
            message: message.into(),
            provider: None,
        }
    }

    /// Create a model provider error attributed to a provider
    pub fn model_with_provider(message: impl Into<String>, provider: impl Into<String>) -> Self {
        Self::Model {
            message: message.into(),
            provider: Some(provider.into()),
        }
    }

    /// Create a new tool error
    pub fn tool(tool_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Tool {
            tool_name: tool_name.into(),
            message: message.into(),
        }
    }

    /// Create a new invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
            field: None,
        }
    }

    /// Create an invalid input error for a specific field
    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Create a generic error
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for AgentError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json {
            message: err.to_string(),
        }
    }
}
