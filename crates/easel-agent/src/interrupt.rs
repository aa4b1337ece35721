//! Per-run cancellation handle
//!
//! A thin wrapper over `CancellationToken` so callers hold one handle per
//! run. There is deliberately no global or thread-local registry: runs share
//! nothing with each other.

use tokio_util::sync::CancellationToken;

/// Cancellation handle for a single run
#[derive(Debug, Clone, Default)]
pub struct RunInterrupt {
    token: CancellationToken,
}

impl RunInterrupt {
    /// Create a new interrupt handle
    pub fn new() -> Self {
        Self::default()
    }

    /// The token to pass into `execute()`
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Cancel the run
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Check if the run was cancelled
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Create a child token for scoped sub-operations
    pub fn child_token(&self) -> CancellationToken {
        self.token.child_token()
    }
}
