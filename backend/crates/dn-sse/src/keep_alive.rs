use crate::{EventSink, Metrics, ServerEvent, SubscriberId};

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use log::{debug, warn};
use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeepAliveState {
    Active,
    /// Terminal
    Cancelled,
}

/// Periodic `ping` for one connection.
///
/// Cancelling the token, whether through `cancel()`, a parent token or a
/// dead peer, is the only way to stop it. The state check and the delivery
/// share one lock, so nothing is delivered once `cancel()` has returned.
pub struct KeepAliveScheduler {
    shared: Arc<Shared>,
    task: JoinHandle<()>,
}

struct Shared {
    subscriber_id: SubscriberId,
    sink: Arc<dyn EventSink>,
    token: CancellationToken,
    state: Mutex<KeepAliveState>,
    ticks: AtomicU64,
    metrics: Metrics,
}

impl KeepAliveScheduler {
    /// First ping goes out one full `interval` after start
    pub fn start(
        subscriber_id: SubscriberId,
        sink: Arc<dyn EventSink>,
        interval: Duration,
        token: CancellationToken,
        metrics: Metrics,
    ) -> Self {
        let shared = Arc::new(Shared {
            subscriber_id,
            sink,
            token,
            state: Mutex::new(KeepAliveState::Active),
            ticks: AtomicU64::new(0),
            metrics,
        });

        let task = tokio::spawn(run(Arc::clone(&shared), interval));
        debug!("Keep-alive started for {subscriber_id} every {interval:?}");

        Self { shared, task }
    }

    /// Idempotent
    pub fn cancel(&self) {
        let mut state = self.shared.state.lock();
        if *state == KeepAliveState::Active {
            *state = KeepAliveState::Cancelled;
            self.shared.token.cancel();
            debug!("Keep-alive cancelled for {}", self.shared.subscriber_id);
        }
    }

    pub fn state(&self) -> KeepAliveState {
        *self.shared.state.lock()
    }

    /// Pings delivered so far
    pub fn ticks(&self) -> u64 {
        self.shared.ticks.load(Ordering::Relaxed)
    }

    pub fn token(&self) -> &CancellationToken {
        &self.shared.token
    }
}

impl Drop for KeepAliveScheduler {
    fn drop(&mut self) {
        self.cancel();
        self.task.abort();
    }
}

async fn run(shared: Arc<Shared>, interval: Duration) {
    let mut ticker = interval_at(Instant::now() + interval, interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = shared.token.cancelled() => break,
            _ = ticker.tick() => {
                if !shared.tick() {
                    break;
                }
            }
        }
    }

    // Parent cancellation (server shutdown) lands here without going through cancel()
    *shared.state.lock() = KeepAliveState::Cancelled;
}

impl Shared {
    /// Returns false once the scheduler should stop
    fn tick(&self) -> bool {
        let mut state = self.state.lock();
        if *state == KeepAliveState::Cancelled || self.token.is_cancelled() {
            *state = KeepAliveState::Cancelled;
            return false;
        }

        match self.sink.deliver(&ServerEvent::ping()) {
            Ok(()) => {
                self.ticks.fetch_add(1, Ordering::Relaxed);
                self.metrics.keep_alive_sent();
                true
            }
            Err(e) if e.is_disconnect() => {
                warn!(
                    "Keep-alive for {} found peer gone, closing connection: {e}",
                    self.subscriber_id
                );
                *state = KeepAliveState::Cancelled;
                self.token.cancel();
                false
            }
            Err(e) => {
                // Full buffer: the stream is still alive, try again next interval
                debug!("Keep-alive for {} skipped: {e}", self.subscriber_id);
                self.metrics.delivery_failed(e.error_code());
                true
            }
        }
    }
}
