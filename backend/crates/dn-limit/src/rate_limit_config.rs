use crate::{LimitError, Result as LimitErrorResult};

use std::panic::Location;
use std::time::Duration;

use error_location::ErrorLocation;

pub const DEFAULT_MAX_REQUESTS: u32 = 100;
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(60);
pub const DEFAULT_STATUS_CODE: u16 = 429;
pub const DEFAULT_MESSAGE: &str = "Too many requests, please try again later.";

pub const STRICT_MAX_REQUESTS: u32 = 30;
pub const STRICT_WINDOW: Duration = Duration::from_secs(15 * 60);

/// Fixed-window policy for one limiter instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Requests allowed per key and window
    pub max_requests: u32,
    /// Window length; also the sweep period
    pub window: Duration,
    /// HTTP status used when rejecting
    pub status_code: u16,
    /// Human-readable rejection message
    pub message: String,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: DEFAULT_MAX_REQUESTS,
            window: DEFAULT_WINDOW,
            status_code: DEFAULT_STATUS_CODE,
            message: String::from(DEFAULT_MESSAGE),
        }
    }
}

impl RateLimitConfig {
    /// Preset for sensitive routes: 30 requests per 15 minutes
    pub fn strict() -> Self {
        Self {
            max_requests: STRICT_MAX_REQUESTS,
            window: STRICT_WINDOW,
            ..Self::default()
        }
    }

    #[track_caller]
    pub fn validate(&self) -> LimitErrorResult<()> {
        let problem = if self.max_requests == 0 {
            Some(String::from("max_requests must be at least 1"))
        } else if self.window.is_zero() {
            Some(String::from("window must be non-zero"))
        } else if !(400..=599).contains(&self.status_code) {
            Some(format!(
                "status_code must be 4xx or 5xx, got {}",
                self.status_code
            ))
        } else {
            None
        };

        match problem {
            Some(message) => Err(LimitError::InvalidConfig {
                message,
                location: ErrorLocation::from(Location::caller()),
            }),
            None => Ok(()),
        }
    }
}
