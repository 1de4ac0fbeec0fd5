pub mod api;
pub mod bootstrap;
pub mod error;
pub mod health;
pub mod logger;
pub mod rate_limit;
pub mod request_logging;
pub mod routes;
pub mod shutdown_signal;


pub use api::{
    api_envelope::ApiEnvelope,
    connected_users_dto::ConnectedUsersDto,
    error::{ApiError, ApiErrorBody, ApiErrorResponse},
    sse_stats_dto::SseStatsDto,
    stats::{connected_users, sse_stats},
};
pub use rate_limit::{HttpRateLimiter, KeyFn, enforce_rate_limit, peer_address};
pub use request_logging::log_requests;
pub use routes::{RouteLimits, build_router};
pub use shutdown_signal::{ShutdownSignal, spawn_signal_listener};
