use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LimitError {
    #[error("Rate limit exceeded for {key}: {limit} requests per window, retry in {retry_after_secs}s {location}")]
    RateLimitExceeded {
        key: String,
        message: String,
        status_code: u16,
        limit: u32,
        reset_epoch_secs: i64,
        retry_after_secs: u64,
        location: ErrorLocation,
    },

    #[error("Invalid rate limit configuration: {message} {location}")]
    InvalidConfig {
        message: String,
        location: ErrorLocation,
    },
}

impl LimitError {
    /// Machine-readable code for response bodies
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::RateLimitExceeded { .. } => "RATE_LIMIT_EXCEEDED",
            Self::InvalidConfig { .. } => "INVALID_RATE_LIMIT_CONFIG",
        }
    }
}

pub type Result<T> = std::result::Result<T, LimitError>;
