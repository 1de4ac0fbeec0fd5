use crate::ShutdownCoordinator;

use tokio_util::sync::CancellationToken;

/// Helper for gracefully handling shutdown in async tasks
#[derive(Clone)]
pub struct ShutdownGuard {
    token: CancellationToken,
}

impl ShutdownGuard {
    pub fn new(coordinator: &ShutdownCoordinator) -> Self {
        Self {
            token: coordinator.token().clone(),
        }
    }

    /// Wait for shutdown signal
    pub async fn wait(&self) {
        self.token.cancelled().await;
    }

    /// Poll for shutdown signal (non-blocking)
    pub fn poll_shutdown(&self) -> bool {
        self.token.is_cancelled()
    }
}
