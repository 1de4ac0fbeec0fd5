/// Values reported in `X-RateLimit-*` headers after an accepted request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitStatus {
    pub limit: u32,
    pub remaining: u32,
    /// Unix epoch seconds at which the window rolls over
    pub reset_epoch_secs: i64,
}
