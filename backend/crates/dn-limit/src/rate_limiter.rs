use crate::{
    LimitError, RateLimitConfig, RateLimitStatus, RateLimitStore, Result as LimitErrorResult,
    WindowDecision,
};

use std::panic::Location;
use std::sync::Arc;
use std::time::Duration;

use error_location::ErrorLocation;
use log::{debug, info, warn};
use metrics::counter;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tokio_util::sync::CancellationToken;

/// Fixed-window rate limiter.
///
/// Each instance owns its own store; the global and strict limiters never share
/// counters. Cloning shares the store.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    name: Arc<str>,
    config: Arc<RateLimitConfig>,
    store: Arc<RateLimitStore>,
}

impl RateLimiter {
    pub fn new(name: impl Into<Arc<str>>, config: RateLimitConfig) -> Self {
        Self {
            name: name.into(),
            config: Arc::new(config),
            store: Arc::new(RateLimitStore::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    pub fn store(&self) -> &RateLimitStore {
        &self.store
    }

    /// Count a request for `key`, or reject it if the window is full
    pub async fn check(&self, key: &str) -> LimitErrorResult<RateLimitStatus> {
        self.check_at(key, Instant::now()).await
    }

    pub async fn check_at(&self, key: &str, now: Instant) -> LimitErrorResult<RateLimitStatus> {
        let limit = self.config.max_requests;
        let decision = self
            .store
            .evaluate(key, limit, self.config.window, now)
            .await;

        match decision {
            WindowDecision::Allowed {
                count,
                reset_epoch_secs,
                ..
            } => {
                counter!("dn_limit.requests.allowed", "limiter" => self.name.to_string())
                    .increment(1);

                Ok(RateLimitStatus {
                    limit,
                    remaining: limit - count,
                    reset_epoch_secs,
                })
            }
            WindowDecision::Exhausted {
                reset_at,
                reset_epoch_secs,
            } => {
                let until_reset = reset_at.saturating_duration_since(now);
                warn!("Rate limit reached for {} on '{}' limiter", key, self.name);
                counter!("dn_limit.requests.rejected", "limiter" => self.name.to_string())
                    .increment(1);

                Err(LimitError::RateLimitExceeded {
                    key: key.to_owned(),
                    message: self.config.message.clone(),
                    status_code: self.config.status_code,
                    limit,
                    reset_epoch_secs,
                    retry_after_secs: ceil_secs(until_reset),
                    location: ErrorLocation::from(Location::caller()),
                })
            }
        }
    }

    /// Periodically reclaim expired entries, once per window, until `token` is
    /// cancelled. Memory reclamation only; rollover happens lazily in `check`.
    pub fn spawn_sweeper(&self, token: CancellationToken) -> JoinHandle<()> {
        let store = Arc::clone(&self.store);
        let name = Arc::clone(&self.name);
        let period = self.config.window;

        tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            info!("Started '{}' rate limit sweeper ({:?} period)", name, period);

            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = ticker.tick() => {
                        let removed = store.sweep(Instant::now()).await;
                        if removed > 0 {
                            debug!("Swept {} expired '{}' rate limit entries", removed, name);
                        }
                    }
                }
            }

            info!("Stopped '{}' rate limit sweeper", name);
        })
    }
}

fn ceil_secs(duration: Duration) -> u64 {
    duration.as_millis().div_ceil(1000) as u64
}
