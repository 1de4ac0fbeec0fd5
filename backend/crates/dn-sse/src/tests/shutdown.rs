use crate::{ShutdownCoordinator, ShutdownGuard};

use tokio::time::{Duration, timeout};

#[tokio::test]
async fn given_coordinator_when_shutdown_triggered_then_guards_notified() {
    let coordinator = ShutdownCoordinator::new();
    let guard = ShutdownGuard::new(&coordinator);

    let coord_clone = coordinator.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(10)).await;
        coord_clone.shutdown();
    });

    let result = timeout(Duration::from_millis(100), guard.wait()).await;
    assert!(result.is_ok(), "Shutdown signal should be received");
    assert!(coordinator.is_shutdown());
}

#[tokio::test]
async fn given_guard_created_after_shutdown_when_waiting_then_returns_immediately() {
    let coordinator = ShutdownCoordinator::new();
    coordinator.shutdown();

    let guard = coordinator.subscribe_guard();

    let result = timeout(Duration::from_millis(10), guard.wait()).await;
    assert!(result.is_ok());
    assert!(guard.poll_shutdown());
}

#[test]
fn given_new_coordinator_when_checked_then_not_shutdown() {
    let coordinator = ShutdownCoordinator::new();
    let guard = ShutdownGuard::new(&coordinator);

    assert!(!guard.poll_shutdown());
    assert!(!coordinator.is_shutdown());
}

#[test]
fn given_child_token_when_shutdown_then_child_cancelled() {
    let coordinator = ShutdownCoordinator::new();
    let child = coordinator.child_token();

    coordinator.shutdown();

    assert!(child.is_cancelled());
}

#[test]
fn given_child_token_when_cancelled_alone_then_coordinator_unaffected() {
    let coordinator = ShutdownCoordinator::new();
    let child = coordinator.child_token();

    child.cancel();

    assert!(!coordinator.is_shutdown());
}
