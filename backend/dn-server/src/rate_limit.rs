use crate::ApiError;

use dn_limit::{RateLimitStatus, RateLimiter};

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use http::{HeaderMap, HeaderName, HeaderValue};
use log::trace;

pub const RATE_LIMIT_LIMIT: HeaderName = HeaderName::from_static("x-ratelimit-limit");
pub const RATE_LIMIT_REMAINING: HeaderName = HeaderName::from_static("x-ratelimit-remaining");
pub const RATE_LIMIT_RESET: HeaderName = HeaderName::from_static("x-ratelimit-reset");

/// Key used when the peer address is not available
pub const UNKNOWN_CLIENT: &str = "unknown";

/// Derives the rate limit key for a request
pub type KeyFn = Arc<dyn Fn(&Request) -> String + Send + Sync>;

/// A `RateLimiter` bound to the HTTP layer
#[derive(Clone)]
pub struct HttpRateLimiter {
    limiter: RateLimiter,
    key_fn: KeyFn,
}

impl HttpRateLimiter {
    /// Keyed by peer IP address
    pub fn new(limiter: RateLimiter) -> Self {
        Self::with_key_fn(limiter, Arc::new(peer_address))
    }

    pub fn with_key_fn(limiter: RateLimiter, key_fn: KeyFn) -> Self {
        Self { limiter, key_fn }
    }

    pub fn limiter(&self) -> &RateLimiter {
        &self.limiter
    }
}

/// Peer IP from `ConnectInfo`, or `"unknown"` when served without it
pub fn peer_address(request: &Request) -> String {
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
}

/// Middleware: count the request, then either reject it or pass it on with
/// `X-RateLimit-*` headers attached.
///
/// When limiters are nested the innermost one's headers win.
pub async fn enforce_rate_limit(
    State(limiter): State<HttpRateLimiter>,
    request: Request,
    next: Next,
) -> Response {
    let key = (limiter.key_fn)(&request);

    match limiter.limiter.check(&key).await {
        Ok(status) => {
            trace!(
                "'{}' limiter: {} has {}/{} requests left",
                limiter.limiter.name(),
                key,
                status.remaining,
                status.limit
            );
            let mut response = next.run(request).await;
            apply_status_headers(response.headers_mut(), &status);
            response
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub fn apply_status_headers(headers: &mut HeaderMap, status: &RateLimitStatus) {
    set_if_absent(headers, RATE_LIMIT_LIMIT, status.limit.into());
    set_if_absent(headers, RATE_LIMIT_REMAINING, status.remaining.into());
    set_if_absent(headers, RATE_LIMIT_RESET, status.reset_epoch_secs.into());
}

fn set_if_absent(headers: &mut HeaderMap, name: HeaderName, value: HeaderValue) {
    headers.entry(name).or_insert(value);
}
