use crate::api::error::not_found;
use crate::{HttpRateLimiter, connected_users, enforce_rate_limit, health, log_requests, sse_stats};

use dn_sse::{AppState, document_stream_handler, global_stream_handler};

use axum::{Router, middleware, routing::get};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

/// The two independent limiters: `global` guards every route, `strict` the
/// stats routes on top of that
#[derive(Clone)]
pub struct RouteLimits {
    pub global: HttpRateLimiter,
    pub strict: HttpRateLimiter,
}

impl RouteLimits {
    /// One expiry sweeper per limiter, stopped by `token`
    pub fn spawn_sweepers(&self, token: CancellationToken) -> Vec<JoinHandle<()>> {
        vec![
            self.global.limiter().spawn_sweeper(token.clone()),
            self.strict.limiter().spawn_sweeper(token),
        ]
    }
}

/// Build the application router with all endpoints
pub fn build_router(state: AppState, limits: RouteLimits, cors: CorsLayer) -> Router {
    let stats = Router::new()
        .route("/api/stats/sse", get(sse_stats))
        .route_layer(middleware::from_fn_with_state(
            limits.strict,
            enforce_rate_limit,
        ));

    Router::new()
        // Push endpoints
        .route("/api/sse", get(global_stream_handler))
        .route("/api/sse/docs/{id}", get(document_stream_handler))
        .route("/api/sse/docs/{id}/users", get(connected_users))
        .merge(stats)
        .route("/health", get(health::health))
        .fallback(not_found)
        .with_state(state)
        // Outermost first
        .layer(
            ServiceBuilder::new()
                .layer(cors)
                .layer(middleware::from_fn(log_requests))
                .layer(middleware::from_fn_with_state(
                    limits.global,
                    enforce_rate_limit,
                )),
        )
}
