pub mod error;
pub mod rate_limit_config;
pub mod rate_limit_entry;
pub mod rate_limit_status;
pub mod rate_limit_store;
pub mod rate_limiter;

pub use error::{LimitError, Result};
pub use rate_limit_config::RateLimitConfig;
pub use rate_limit_entry::RateLimitEntry;
pub use rate_limit_status::RateLimitStatus;
pub use rate_limit_store::{RateLimitStore, WindowDecision};
pub use rate_limiter::RateLimiter;

#[cfg(test)]
mod tests;
