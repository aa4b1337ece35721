//! Recorded tool-call steps

use crate::tools::ToolOutput;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One recorded tool-call-and-result pair within a run
///
/// Steps are append-only and strictly chronological; the vector they live in
/// is owned exclusively by the run that produced them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunStep {
    /// Position in the run, starting at 0
    pub index: u32,
    /// Name of the tool that was called
    pub tool_name: String,
    /// Arguments the model supplied
    pub args: HashMap<String, serde_json::Value>,
    /// The tool's result, absent if the tool produced none
    pub result: Option<ToolOutput>,
    /// When the step completed
    pub timestamp: DateTime<Utc>,
}

impl RunStep {
    /// Record a completed step
    pub fn new(
        index: u32,
        tool_name: impl Into<String>,
        args: HashMap<String, serde_json::Value>,
        result: Option<ToolOutput>,
    ) -> Self {
        Self {
            index,
            tool_name: tool_name.into(),
            args,
            result,
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serialized_field_names() {
        let mut args = HashMap::new();
        args.insert("card_id".to_string(), json!("c1"));
        let step = RunStep::new(0, "delete_card", args, Some(ToolOutput::plain("ok")));

        let value = serde_json::to_value(&step).unwrap();
        assert_eq!(value["index"], 0);
        assert_eq!(value["toolName"], "delete_card");
        assert_eq!(value["args"]["card_id"], "c1");
        assert_eq!(value["result"], "ok");
        assert!(value["timestamp"].is_string());
    }
}
