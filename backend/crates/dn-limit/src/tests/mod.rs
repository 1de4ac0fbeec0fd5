mod rate_limiter;

use crate::RateLimitConfig;

use std::time::Duration;

/// 3 requests per second, the shape used throughout these tests
pub(crate) fn small_window_config() -> RateLimitConfig {
    RateLimitConfig {
        max_requests: 3,
        window: Duration::from_millis(1000),
        ..RateLimitConfig::default()
    }
}
