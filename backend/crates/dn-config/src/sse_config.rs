use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

// Per-connection outgoing queue
pub const MIN_SEND_BUFFER_SIZE: usize = 1;
pub const MAX_SEND_BUFFER_SIZE: usize = 10000;
pub const DEFAULT_SEND_BUFFER_SIZE: usize = 100;

// Keep-alive ping interval (seconds)
pub const MIN_KEEP_ALIVE_INTERVAL_SECS: u64 = 5;
pub const MAX_KEEP_ALIVE_INTERVAL_SECS: u64 = 300;
pub const DEFAULT_KEEP_ALIVE_INTERVAL_SECS: u64 = 30;

/// Server-Sent Events connection settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SseConfig {
    /// Events buffered per connection before deliveries start failing
    pub send_buffer_size: usize,
    /// Seconds between `ping` events on an idle connection
    pub keep_alive_interval_secs: u64,
}

impl Default for SseConfig {
    fn default() -> Self {
        Self {
            send_buffer_size: DEFAULT_SEND_BUFFER_SIZE,
            keep_alive_interval_secs: DEFAULT_KEEP_ALIVE_INTERVAL_SECS,
        }
    }
}

impl SseConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.send_buffer_size < MIN_SEND_BUFFER_SIZE
            || self.send_buffer_size > MAX_SEND_BUFFER_SIZE
        {
            return Err(ConfigError::sse(format!(
                "sse.send_buffer_size must be {}-{}, got {}",
                MIN_SEND_BUFFER_SIZE, MAX_SEND_BUFFER_SIZE, self.send_buffer_size
            )));
        }

        if self.keep_alive_interval_secs < MIN_KEEP_ALIVE_INTERVAL_SECS
            || self.keep_alive_interval_secs > MAX_KEEP_ALIVE_INTERVAL_SECS
        {
            return Err(ConfigError::sse(format!(
                "sse.keep_alive_interval_secs must be {}-{}, got {}",
                MIN_KEEP_ALIVE_INTERVAL_SECS,
                MAX_KEEP_ALIVE_INTERVAL_SECS,
                self.keep_alive_interval_secs
            )));
        }

        Ok(())
    }
}
