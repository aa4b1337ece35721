//! Common types used throughout the agent engine

mod common;

pub use common::{Id, TokenUsage};
