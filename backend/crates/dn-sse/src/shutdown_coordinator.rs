use crate::ShutdownGuard;

use tokio_util::sync::CancellationToken;

/// Graceful shutdown coordinator.
///
/// Every push connection runs on a child of the root token, so one
/// `shutdown()` ends all open streams.
#[derive(Clone)]
pub struct ShutdownCoordinator {
    token: CancellationToken,
}

impl ShutdownCoordinator {
    pub fn new() -> Self {
        Self {
            token: CancellationToken::new(),
        }
    }

    /// Trigger shutdown (call this from signal handler)
    pub fn shutdown(&self) {
        log::info!("Shutdown signal received, closing all push connections");
        self.token.cancel();
    }

    /// Check if shutdown has been triggered (non-blocking)
    pub fn is_shutdown(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Token cancelled on shutdown, or independently by its owner
    pub fn child_token(&self) -> CancellationToken {
        self.token.child_token()
    }

    /// Convenience method to create a guard (used by background tasks)
    pub fn subscribe_guard(&self) -> ShutdownGuard {
        ShutdownGuard::new(self)
    }

    pub(crate) fn token(&self) -> &CancellationToken {
        &self.token
    }
}

impl Default for ShutdownCoordinator {
    fn default() -> Self {
        Self::new()
    }
}
