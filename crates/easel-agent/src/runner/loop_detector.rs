//! Detection of repeated tool-call patterns

use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, HashMap};

/// Default comparison window: the last three calls against the three before
pub const DEFAULT_LOOP_WINDOW: usize = 3;

/// The identity of one tool call, as loop detection sees it
///
/// Kept only for the lifetime of the run and never serialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCallRecord {
    /// Name of the tool
    pub tool_name: String,
    /// Deterministic hash of the call arguments
    pub args_hash: String,
}

impl ToolCallRecord {
    /// Record a call
    pub fn new(tool_name: impl Into<String>, args: &HashMap<String, serde_json::Value>) -> Self {
        Self {
            tool_name: tool_name.into(),
            args_hash: args_hash(args),
        }
    }
}

/// Deterministic hash of a tool call's arguments
///
/// Nested objects already serialize with sorted keys; only the top-level map
/// needs explicit ordering. If serialization fails the hash falls back to
/// the debug rendering, accepting that two different unserializable argument
/// sets may collide and falsely trigger detection.
pub fn args_hash(args: &HashMap<String, serde_json::Value>) -> String {
    let ordered: BTreeMap<&String, &serde_json::Value> = args.iter().collect();
    let canonical = serde_json::to_string(&ordered).unwrap_or_else(|_| format!("{ordered:?}"));

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Judge whether the recent call history repeats
///
/// Compares the last `window_size` records against the `window_size` records
/// immediately preceding them; true iff every pair matches on both tool name
/// and argument hash. Histories shorter than `2 * window_size` are undecided
/// and return false — not "safe", just not enough evidence.
pub fn is_looping(history: &[ToolCallRecord], window_size: usize) -> bool {
    if window_size == 0 || history.len() < 2 * window_size {
        return false;
    }

    let recent = &history[history.len() - window_size..];
    let previous = &history[history.len() - 2 * window_size..history.len() - window_size];
    recent.iter().zip(previous.iter()).all(|(a, b)| a == b)
}
