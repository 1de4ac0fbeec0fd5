//! Turns loaded configuration into runtime components

use crate::error::Result as ServerErrorResult;
use crate::{HttpRateLimiter, RouteLimits};

use dn_config::{ConfigError, RateLimitSettings, ServerConfig, SseConfig};
use dn_limit::RateLimiter;
use dn_sse::ConnectionConfig;

use std::time::Duration;

use http::HeaderValue;
use log::info;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

pub const GLOBAL_LIMITER: &str = "global";
pub const STRICT_LIMITER: &str = "strict";

pub fn connection_config(sse: &SseConfig) -> ConnectionConfig {
    ConnectionConfig {
        send_buffer_size: sse.send_buffer_size,
        keep_alive_interval: Duration::from_secs(sse.keep_alive_interval_secs),
    }
}

pub fn limiter_config(config: &dn_config::RateLimitConfig) -> dn_limit::RateLimitConfig {
    dn_limit::RateLimitConfig {
        max_requests: config.max_requests,
        window: Duration::from_secs(config.window_secs),
        status_code: config.status_code,
        ..dn_limit::RateLimitConfig::default()
    }
}

/// Build both limiters, keyed by peer address
pub fn route_limits(settings: &RateLimitSettings) -> ServerErrorResult<RouteLimits> {
    let global = limiter_config(&settings.global);
    let strict = limiter_config(&settings.strict);
    global.validate()?;
    strict.validate()?;

    info!(
        "Rate limits: global {}/{:?}, strict {}/{:?}",
        global.max_requests, global.window, strict.max_requests, strict.window
    );

    Ok(RouteLimits {
        global: HttpRateLimiter::new(RateLimiter::new(GLOBAL_LIMITER, global)),
        strict: HttpRateLimiter::new(RateLimiter::new(STRICT_LIMITER, strict)),
    })
}

/// CORS for the configured origins; an empty list (or `*`) allows any origin
pub fn cors_layer(server: &ServerConfig) -> ServerErrorResult<CorsLayer> {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if server.allows_any_origin() || server.cors_origins.iter().any(|origin| origin == "*") {
        return Ok(layer.allow_origin(Any));
    }

    let origins = server
        .cors_origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin).map_err(|e| {
                ConfigError::server(format!("invalid CORS origin '{}': {}", origin, e))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(layer.allow_origin(AllowOrigin::list(origins)))
}
