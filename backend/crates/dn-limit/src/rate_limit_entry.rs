use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use tokio::time::Instant;

/// Counter for one key inside its current window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitEntry {
    pub count: u32,
    pub reset_at: Instant,
    /// Wall-clock end of the window, fixed when the window opens
    pub reset_epoch_secs: i64,
}

impl RateLimitEntry {
    pub fn new(now: Instant, window: Duration) -> Self {
        Self {
            count: 0,
            reset_at: now + window,
            reset_epoch_secs: epoch_secs_after(window),
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now > self.reset_at
    }

    /// Lazy rollover: start a fresh window if the current one has passed.
    /// Returns true when the window was reset.
    pub fn roll_over_if_expired(&mut self, now: Instant, window: Duration) -> bool {
        if self.is_expired(now) {
            *self = Self::new(now, window);
            true
        } else {
            false
        }
    }
}

/// Epoch seconds, rounded up, `window` from now
fn epoch_secs_after(window: Duration) -> i64 {
    let reset_at = TimeDelta::from_std(window)
        .ok()
        .and_then(|delta| Utc::now().checked_add_signed(delta))
        .unwrap_or(DateTime::<Utc>::MAX_UTC);
    let reset_at_ms = reset_at.timestamp_millis();
    reset_at_ms.div_euclid(1000) + i64::from(reset_at_ms.rem_euclid(1000) > 0)
}
