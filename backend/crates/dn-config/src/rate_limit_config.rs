use crate::{ConfigError, ConfigErrorResult};

use serde::{Deserialize, Deserializer};

pub const MIN_RATE_LIMIT_REQUESTS: u32 = 1;
pub const MAX_RATE_LIMIT_REQUESTS: u32 = 100_000;
pub const DEFAULT_RATE_LIMIT_REQUESTS: u32 = 100;
pub const DEFAULT_STRICT_RATE_LIMIT_REQUESTS: u32 = 30;

pub const MIN_RATE_LIMIT_WINDOW_SECS: u64 = 1;
pub const MAX_RATE_LIMIT_WINDOW_SECS: u64 = 86_400;
pub const DEFAULT_RATE_LIMIT_WINDOW_SECS: u64 = 60;
pub const DEFAULT_STRICT_RATE_LIMIT_WINDOW_SECS: u64 = 15 * 60;

pub const DEFAULT_RATE_LIMIT_STATUS_CODE: u16 = 429;

/// One fixed-window limiter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Requests allowed per window and client
    pub max_requests: u32,
    /// Window duration in seconds
    pub window_secs: u64,
    /// HTTP status returned on rejection
    pub status_code: u16,
}

impl RateLimitConfig {
    pub fn global_default() -> Self {
        Self {
            max_requests: DEFAULT_RATE_LIMIT_REQUESTS,
            window_secs: DEFAULT_RATE_LIMIT_WINDOW_SECS,
            status_code: DEFAULT_RATE_LIMIT_STATUS_CODE,
        }
    }

    pub fn strict_default() -> Self {
        Self {
            max_requests: DEFAULT_STRICT_RATE_LIMIT_REQUESTS,
            window_secs: DEFAULT_STRICT_RATE_LIMIT_WINDOW_SECS,
            status_code: DEFAULT_RATE_LIMIT_STATUS_CODE,
        }
    }

    fn validate(&self, section: &str) -> ConfigErrorResult<()> {
        if self.max_requests < MIN_RATE_LIMIT_REQUESTS
            || self.max_requests > MAX_RATE_LIMIT_REQUESTS
        {
            return Err(ConfigError::rate_limit(format!(
                "rate_limit.{}.max_requests must be {}-{}, got {}",
                section, MIN_RATE_LIMIT_REQUESTS, MAX_RATE_LIMIT_REQUESTS, self.max_requests
            )));
        }

        if self.window_secs < MIN_RATE_LIMIT_WINDOW_SECS
            || self.window_secs > MAX_RATE_LIMIT_WINDOW_SECS
        {
            return Err(ConfigError::rate_limit(format!(
                "rate_limit.{}.window_secs must be {}-{}, got {}",
                section, MIN_RATE_LIMIT_WINDOW_SECS, MAX_RATE_LIMIT_WINDOW_SECS, self.window_secs
            )));
        }

        if !(400..=599).contains(&self.status_code) {
            return Err(ConfigError::rate_limit(format!(
                "rate_limit.{}.status_code must be a 4xx or 5xx status, got {}",
                section, self.status_code
            )));
        }

        Ok(())
    }
}

/// The two independent limiters: `global` guards every route, `strict` the
/// sensitive ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitSettings {
    pub global: RateLimitConfig,
    pub strict: RateLimitConfig,
}

impl Default for RateLimitSettings {
    fn default() -> Self {
        Self {
            global: RateLimitConfig::global_default(),
            strict: RateLimitConfig::strict_default(),
        }
    }
}

impl RateLimitSettings {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.global.validate("global")?;
        self.strict.validate("strict")
    }
}

/// Fields omitted from a TOML table keep the defaults of *that* limiter, so a
/// partial `[rate_limit.strict]` does not inherit the lenient global values.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RateLimitOverrides {
    max_requests: Option<u32>,
    window_secs: Option<u64>,
    status_code: Option<u16>,
}

impl RateLimitOverrides {
    fn apply(self, base: RateLimitConfig) -> RateLimitConfig {
        RateLimitConfig {
            max_requests: self.max_requests.unwrap_or(base.max_requests),
            window_secs: self.window_secs.unwrap_or(base.window_secs),
            status_code: self.status_code.unwrap_or(base.status_code),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawRateLimitSettings {
    global: RateLimitOverrides,
    strict: RateLimitOverrides,
}

impl<'de> Deserialize<'de> for RateLimitSettings {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawRateLimitSettings::deserialize(deserializer)?;
        Ok(Self {
            global: raw.global.apply(RateLimitConfig::global_default()),
            strict: raw.strict.apply(RateLimitConfig::strict_default()),
        })
    }
}
