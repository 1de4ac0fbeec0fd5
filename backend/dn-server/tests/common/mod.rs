#![allow(dead_code)]

//! Test infrastructure for dn-server router tests

use dn_config::ServerConfig;
use dn_limit::{RateLimitConfig, RateLimiter};
use dn_server::{HttpRateLimiter, RouteLimits, bootstrap, build_router};
use dn_sse::{AppState, ConnectionConfig, ShutdownCoordinator};

use std::net::SocketAddr;
use std::time::Duration;

use axum::{
    Router,
    body::Body,
    extract::ConnectInfo,
    http::Request,
    response::Response,
};
use http_body_util::BodyExt;
use tokio::time::timeout;

pub const DEFAULT_PEER: [u8; 4] = [10, 0, 0, 1];

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

pub fn create_test_app() -> TestApp {
    create_test_app_with_limits(RateLimitConfig::default(), RateLimitConfig::strict())
}

pub fn create_test_app_with_limits(global: RateLimitConfig, strict: RateLimitConfig) -> TestApp {
    create_test_app_from(
        RouteLimits {
            global: HttpRateLimiter::new(RateLimiter::new("global", global)),
            strict: HttpRateLimiter::new(RateLimiter::new("strict", strict)),
        },
        &ServerConfig::default(),
    )
}

pub fn create_test_app_with_cors(origins: &[&str]) -> TestApp {
    let server = ServerConfig {
        cors_origins: origins.iter().map(|origin| origin.to_string()).collect(),
        ..ServerConfig::default()
    };
    create_test_app_from(
        RouteLimits {
            global: HttpRateLimiter::new(RateLimiter::new("global", RateLimitConfig::default())),
            strict: HttpRateLimiter::new(RateLimiter::new("strict", RateLimitConfig::strict())),
        },
        &server,
    )
}

pub fn create_test_app_from(limits: RouteLimits, server: &ServerConfig) -> TestApp {
    let state = AppState::new(ConnectionConfig::default(), ShutdownCoordinator::new());
    let cors = bootstrap::cors_layer(server).unwrap();

    TestApp {
        router: build_router(state.clone(), limits, cors),
        state,
    }
}

/// Limits small enough to exhaust in a test
pub fn tight_limit(max_requests: u32) -> RateLimitConfig {
    RateLimitConfig {
        max_requests,
        window: Duration::from_secs(60),
        ..RateLimitConfig::default()
    }
}

/// GET as seen through `into_make_service_with_connect_info`
pub fn get(uri: &str) -> Request<Body> {
    get_from(uri, DEFAULT_PEER)
}

pub fn get_from(uri: &str, peer: [u8; 4]) -> Request<Body> {
    let mut request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    request
        .extensions_mut()
        .insert(ConnectInfo(SocketAddr::from((peer, 40000))));
    request
}

pub fn get_with_origin(uri: &str, origin: &str) -> Request<Body> {
    let mut request = get(uri);
    request
        .headers_mut()
        .insert("origin", origin.parse().unwrap());
    request
}

pub fn get_as(uri: &str, owner_id: &str) -> Request<Body> {
    let mut request = get(uri);
    request
        .headers_mut()
        .insert("x-user-id", owner_id.parse().unwrap());
    request
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

/// Next SSE frame as text, or None once the stream has ended
pub async fn next_frame(body: &mut Body) -> Option<String> {
    let frame = timeout(Duration::from_secs(2), body.frame())
        .await
        .expect("timed out waiting for SSE frame")?
        .unwrap();
    let data = frame.into_data().expect("SSE frames carry data");
    Some(String::from_utf8(data.to_vec()).unwrap())
}
