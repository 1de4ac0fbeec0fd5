//! Rate limiting as seen by HTTP clients
mod common;

use crate::common::{body_json, create_test_app, create_test_app_with_limits, get, get_from, tight_limit};

use dn_limit::RateLimitConfig;

use axum::http::StatusCode;
use tower::ServiceExt;

#[tokio::test]
async fn given_allowed_request_when_served_then_rate_limit_headers_present() {
    // Given
    let app = create_test_app();

    // When
    let response = app.router.clone().oneshot(get("/health")).await.unwrap();

    // Then
    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(headers["x-ratelimit-limit"], "100");
    assert_eq!(headers["x-ratelimit-remaining"], "99");
    let reset: i64 = headers["x-ratelimit-reset"].to_str().unwrap().parse().unwrap();
    assert!(reset > chrono::Utc::now().timestamp());
}

#[tokio::test]
async fn given_exhausted_client_when_requesting_then_429_with_retry_after() {
    // Given
    let app = create_test_app_with_limits(tight_limit(3), RateLimitConfig::strict());
    for _ in 0..3 {
        let response = app.router.clone().oneshot(get("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    // When
    let response = app.router.clone().oneshot(get("/health")).await.unwrap();

    // Then
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    let headers = response.headers();
    assert_eq!(headers["x-ratelimit-limit"], "3");
    assert_eq!(headers["x-ratelimit-remaining"], "0");
    let retry_after: u64 = headers["retry-after"].to_str().unwrap().parse().unwrap();
    assert!(retry_after > 0 && retry_after <= 60);

    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "RATE_LIMIT_EXCEEDED");
    assert_eq!(
        json["error"]["message"],
        dn_limit::rate_limit_config::DEFAULT_MESSAGE
    );
}

#[tokio::test]
async fn given_exhausted_client_when_other_client_requests_then_allowed() {
    // Given
    let app = create_test_app_with_limits(tight_limit(1), RateLimitConfig::strict());
    app.router
        .clone()
        .oneshot(get_from("/health", [10, 0, 0, 1]))
        .await
        .unwrap();

    // When
    let blocked = app
        .router
        .clone()
        .oneshot(get_from("/health", [10, 0, 0, 1]))
        .await
        .unwrap();
    let other = app
        .router
        .clone()
        .oneshot(get_from("/health", [10, 0, 0, 2]))
        .await
        .unwrap();

    // Then
    assert_eq!(blocked.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(other.status(), StatusCode::OK);
}

#[tokio::test]
async fn given_strict_limit_when_stats_exhausted_then_other_routes_still_served() {
    // Given
    let app = create_test_app_with_limits(RateLimitConfig::default(), tight_limit(2));
    for _ in 0..2 {
        let response = app
            .router
            .clone()
            .oneshot(get("/api/stats/sse"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["x-ratelimit-limit"], "2");
    }

    // When
    let stats = app
        .router
        .clone()
        .oneshot(get("/api/stats/sse"))
        .await
        .unwrap();
    let health = app.router.clone().oneshot(get("/health")).await.unwrap();

    // Then
    assert_eq!(stats.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(health.status(), StatusCode::OK);
    assert_eq!(health.headers()["x-ratelimit-limit"], "100");
}

#[tokio::test]
async fn given_configured_status_when_limited_then_status_used() {
    // Given
    let global = RateLimitConfig {
        status_code: 503,
        ..tight_limit(1)
    };
    let app = create_test_app_with_limits(global, RateLimitConfig::strict());
    app.router.clone().oneshot(get("/health")).await.unwrap();

    // When
    let response = app.router.clone().oneshot(get("/health")).await.unwrap();

    // Then
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}
