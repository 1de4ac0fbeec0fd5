//! Process signals that start a graceful shutdown

use dn_sse::ShutdownCoordinator;

use std::fmt;
use std::future::{Future, pending};

use log::{error, info};
use tokio::task::JoinHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownSignal {
    Interrupt,
    Terminate,
}

impl fmt::Display for ShutdownSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShutdownSignal::Interrupt => write!(f, "SIGINT"),
            ShutdownSignal::Terminate => write!(f, "SIGTERM"),
        }
    }
}

/// Wait for SIGINT or (on unix) SIGTERM, then trigger `shutdown`.
///
/// The SIGTERM handler is installed before this returns. A signal that cannot
/// be listened for is logged and ignored; the other one still works.
pub fn spawn_signal_listener(shutdown: ShutdownCoordinator) -> JoinHandle<ShutdownSignal> {
    let terminate = terminate();

    tokio::spawn(async move {
        let signal = tokio::select! {
            signal = interrupt() => signal,
            signal = terminate => signal,
        };

        info!("Received {}, initiating graceful shutdown", signal);
        shutdown.shutdown();
        signal
    })
}

async fn interrupt() -> ShutdownSignal {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for SIGINT: {}", e);
        pending::<()>().await;
    }
    ShutdownSignal::Interrupt
}

#[cfg(unix)]
fn terminate() -> impl Future<Output = ShutdownSignal> + Send + 'static {
    use tokio::signal::unix::{SignalKind, signal};

    let registered = signal(SignalKind::terminate());
    async move {
        match registered {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                pending::<()>().await;
            }
        }
        ShutdownSignal::Terminate
    }
}

#[cfg(not(unix))]
fn terminate() -> impl Future<Output = ShutdownSignal> + Send + 'static {
    pending()
}
