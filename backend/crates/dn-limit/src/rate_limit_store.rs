use crate::RateLimitEntry;

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

/// Outcome of evaluating one request against its key's window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowDecision {
    /// Request counted; `count` includes it
    Allowed {
        count: u32,
        reset_at: Instant,
        reset_epoch_secs: i64,
    },
    /// Window already full; nothing counted
    Exhausted {
        reset_at: Instant,
        reset_epoch_secs: i64,
    },
}

/// Windowed counters keyed by client identity.
///
/// Evaluation and sweeping both hold the same lock, so a sweep never observes
/// or deletes an entry mid-update. A swept key that returns simply starts a
/// fresh window, the same state lazy rollover would have produced.
#[derive(Debug, Default)]
pub struct RateLimitStore {
    entries: Mutex<HashMap<String, RateLimitEntry>>,
}

impl RateLimitStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn evaluate(
        &self,
        key: &str,
        max_requests: u32,
        window: Duration,
        now: Instant,
    ) -> WindowDecision {
        let mut entries = self.entries.lock().await;

        let entry = entries
            .entry(key.to_owned())
            .or_insert_with(|| RateLimitEntry::new(now, window));

        entry.roll_over_if_expired(now, window);

        if entry.count >= max_requests {
            return WindowDecision::Exhausted {
                reset_at: entry.reset_at,
                reset_epoch_secs: entry.reset_epoch_secs,
            };
        }

        entry.count += 1;
        WindowDecision::Allowed {
            count: entry.count,
            reset_at: entry.reset_at,
            reset_epoch_secs: entry.reset_epoch_secs,
        }
    }

    /// Drop entries whose window has passed. Returns how many were removed.
    pub async fn sweep(&self, now: Instant) -> usize {
        let mut entries = self.entries.lock().await;
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(now));
        before - entries.len()
    }

    pub async fn get(&self, key: &str) -> Option<RateLimitEntry> {
        self.entries.lock().await.get(key).copied()
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}
