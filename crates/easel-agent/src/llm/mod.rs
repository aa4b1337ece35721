//! Model call seam
//!
//! The engine invokes the model through the `ModelCall` trait exactly once
//! per run. Implementations live with the application's provider clients;
//! the wire protocol is out of scope here.

pub mod provider;

pub use provider::{ModelCall, ModelRequest, ModelTurn, SamplingParameters};
