//! Tool-related type definitions

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A tool call reported by the model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Unique identifier for this tool call
    pub id: String,
    /// Name of the tool to call
    pub name: String,
    /// Arguments to pass to the tool
    pub arguments: HashMap<String, serde_json::Value>,
}

impl ToolCall {
    /// Create a new tool call
    pub fn new<S: Into<String>>(
        id: S,
        name: S,
        arguments: HashMap<String, serde_json::Value>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            arguments,
        }
    }

    /// Get a typed argument value
    pub fn get_argument<T>(&self, key: &str) -> Option<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        self.arguments
            .get(key)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    /// Get a string argument
    pub fn get_string(&self, key: &str) -> Option<String> {
        self.get_argument::<String>(key)
    }
}

/// The kind of effect a pending-confirmation proposal would apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    /// Delete a card from the canvas
    Delete,
    /// Rename a card
    Rename,
    /// Create a new branch from a card
    CreateBranch,
    /// Create a new document card
    CreateDocument,
    /// Catch-all for tags this engine version does not know
    Other,
}

impl<'de> Deserialize<'de> for ActionType {
    // Unknown tags fold into `Other` so a proposal from a newer tool set
    // still reaches the approver instead of degrading to a plain result.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let tag = String::deserialize(deserializer)?;
        Ok(match tag.as_str() {
            "delete" => ActionType::Delete,
            "rename" => ActionType::Rename,
            "create_branch" => ActionType::CreateBranch,
            "create_document" => ActionType::CreateDocument,
            _ => ActionType::Other,
        })
    }
}

impl std::fmt::Display for ActionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionType::Delete => write!(f, "delete"),
            ActionType::Rename => write!(f, "rename"),
            ActionType::CreateBranch => write!(f, "create_branch"),
            ActionType::CreateDocument => write!(f, "create_document"),
            ActionType::Other => write!(f, "other"),
        }
    }
}

/// Marker for the `status` field of a pending-confirmation envelope
///
/// Only the literal string `"pending_confirmation"` deserializes into this
/// type, which is what lets `ToolOutput`'s untagged representation classify
/// a raw payload exactly once, at the tool boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PendingStatus {
    #[serde(rename = "pending_confirmation")]
    PendingConfirmation,
}

/// A tool result proposing an effect that needs human approval
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingConfirmation {
    /// Envelope marker, always `"pending_confirmation"` on the wire
    pub status: PendingStatus,
    /// Kind of effect proposed, if the tool tagged one
    #[serde(rename = "actionType", skip_serializing_if = "Option::is_none")]
    pub action_type: Option<ActionType>,
    /// Human-readable description of the proposed effect
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Everything else the tool put in the envelope
    #[serde(flatten)]
    pub data: serde_json::Map<String, serde_json::Value>,
}

impl PendingConfirmation {
    /// Create a new proposal
    pub fn new(action_type: ActionType, description: impl Into<String>) -> Self {
        Self {
            status: PendingStatus::PendingConfirmation,
            action_type: Some(action_type),
            description: Some(description.into()),
            data: serde_json::Map::new(),
        }
    }

    /// Attach a payload field
    pub fn with_data<V: Into<serde_json::Value>>(mut self, key: impl Into<String>, value: V) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// The entire envelope as a JSON value, marker and tags included
    pub fn payload(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

/// Result of a tool invocation
///
/// The two cases are decided once, here at the tool boundary: a plain value
/// flows back into the conversation, while a pending confirmation is
/// additionally promoted into an approval-gated `Action` by the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ToolOutput {
    /// An effect that must be approved by a human before it is applied
    Pending(PendingConfirmation),
    /// Any other result value, opaque to the engine
    Plain(serde_json::Value),
}

impl ToolOutput {
    /// Wrap an opaque result value
    pub fn plain<V: Into<serde_json::Value>>(value: V) -> Self {
        Self::Plain(value.into())
    }

    /// Classify a raw payload, recognizing the pending-confirmation envelope
    pub fn from_value(value: serde_json::Value) -> Self {
        match serde_json::from_value::<PendingConfirmation>(value.clone()) {
            Ok(pending) => Self::Pending(pending),
            Err(_) => Self::Plain(value),
        }
    }

    /// Whether this result proposes an approval-gated effect
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }
}

/// Parameter definition for a tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolParameter {
    /// Parameter name
    pub name: String,
    /// Parameter description
    pub description: String,
    /// Parameter type (string, number, boolean, object, array)
    pub param_type: String,
    /// Whether this parameter is required
    pub required: bool,
}

impl ToolParameter {
    /// Create a required string parameter
    pub fn string<S: Into<String>>(name: S, description: S) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            param_type: "string".to_string(),
            required: true,
        }
    }

    /// Create a boolean parameter
    pub fn boolean<S: Into<String>>(name: S, description: S) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            param_type: "boolean".to_string(),
            required: true,
        }
    }

    /// Create a number parameter
    pub fn number<S: Into<String>>(name: S, description: S) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            param_type: "number".to_string(),
            required: true,
        }
    }

    /// Make parameter optional
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }
}

/// JSON schema for a tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSchema {
    /// Tool name
    pub name: String,
    /// Tool description
    pub description: String,
    /// Input parameters schema
    pub parameters: serde_json::Value,
}

impl ToolSchema {
    /// Create a new tool schema
    pub fn new<S: Into<String>>(name: S, description: S, parameters: Vec<ToolParameter>) -> Self {
        let mut properties = serde_json::Map::new();
        let mut required = Vec::new();

        for param in parameters {
            if param.required {
                required.push(param.name.clone());
            }

            let mut param_schema = serde_json::Map::new();
            param_schema.insert("type".to_string(), param.param_type.into());
            param_schema.insert("description".to_string(), param.description.into());

            properties.insert(param.name, param_schema.into());
        }

        let parameters_schema = serde_json::json!({
            "type": "object",
            "properties": properties,
            "required": required
        });

        Self {
            name: name.into(),
            description: description.into(),
            parameters: parameters_schema,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tool_call_typed_arguments() {
        let mut arguments = HashMap::new();
        arguments.insert("card_id".to_string(), json!("card-42"));
        arguments.insert("recursive".to_string(), json!(true));
        let call = ToolCall::new("call-1", "delete_card", arguments);

        assert_eq!(call.get_string("card_id").unwrap(), "card-42");
        assert_eq!(call.get_argument::<bool>("recursive").unwrap(), true);
        assert!(call.get_string("missing").is_none());
    }

    #[test]
    fn test_pending_envelope_roundtrip() {
        let pending = PendingConfirmation::new(ActionType::Delete, "Delete card 'Notes'")
            .with_data("cardId", "x");

        let value = pending.payload();
        assert_eq!(value["status"], "pending_confirmation");
        assert_eq!(value["actionType"], "delete");
        assert_eq!(value["cardId"], "x");

        let back: PendingConfirmation = serde_json::from_value(value).unwrap();
        assert_eq!(back, pending);
    }

    #[test]
    fn test_from_value_classifies_envelope() {
        let output = ToolOutput::from_value(json!({
            "status": "pending_confirmation",
            "actionType": "rename",
            "description": "Rename card",
            "cardId": "c1",
            "newTitle": "Ideas"
        }));
        assert!(output.is_pending());
        match output {
            ToolOutput::Pending(p) => {
                assert_eq!(p.action_type, Some(ActionType::Rename));
                assert_eq!(p.data["cardId"], "c1");
                assert_eq!(p.data["newTitle"], "Ideas");
            }
            ToolOutput::Plain(_) => panic!("expected pending"),
        }
    }

    #[test]
    fn test_from_value_plain_results_stay_plain() {
        let output = ToolOutput::from_value(json!({"summary": "Three cards about pricing"}));
        assert!(!output.is_pending());

        // A status field with any other value is not the envelope.
        let output = ToolOutput::from_value(json!({"status": "done"}));
        assert!(!output.is_pending());
    }

    #[test]
    fn test_unknown_action_type_still_classifies() {
        let output = ToolOutput::from_value(json!({
            "status": "pending_confirmation",
            "actionType": "archive",
        }));
        match output {
            ToolOutput::Pending(p) => assert_eq!(p.action_type, Some(ActionType::Other)),
            ToolOutput::Plain(_) => panic!("expected pending"),
        }
    }

    #[test]
    fn test_tool_schema_builder() {
        let schema = ToolSchema::new(
            "rename_card",
            "Rename a card on the canvas",
            vec![
                ToolParameter::string("card_id", "Card to rename"),
                ToolParameter::string("new_title", "New title"),
                ToolParameter::boolean("notify", "Notify collaborators").optional(),
            ],
        );

        assert_eq!(schema.name, "rename_card");
        let required = schema.parameters["required"].as_array().unwrap();
        assert_eq!(required.len(), 2);
        assert_eq!(
            schema.parameters["properties"]["notify"]["type"],
            "boolean"
        );
    }
}
