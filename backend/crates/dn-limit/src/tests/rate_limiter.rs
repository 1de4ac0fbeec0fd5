use crate::tests::small_window_config;
use crate::{LimitError, RateLimitConfig, RateLimiter};

use std::time::Duration;

use googletest::assert_that;
use googletest::prelude::{eq, gt};
use tokio_util::sync::CancellationToken;

// =========================================================================
// Fixed Window Behaviour
// =========================================================================

#[tokio::test(start_paused = true)]
async fn given_three_requests_when_checked_then_remaining_counts_down() {
    // Given
    let limiter = RateLimiter::new("test", small_window_config());

    // When
    let remaining: Vec<u32> = [
        limiter.check("10.0.0.1").await.unwrap(),
        limiter.check("10.0.0.1").await.unwrap(),
        limiter.check("10.0.0.1").await.unwrap(),
    ]
    .iter()
    .map(|status| status.remaining)
    .collect();

    // Then
    assert_that!(remaining, eq(&vec![2, 1, 0]));
}

#[tokio::test(start_paused = true)]
async fn given_exhausted_window_when_fourth_request_then_rejected_with_retry_hint() {
    // Given
    let limiter = RateLimiter::new("test", small_window_config());
    for _ in 0..3 {
        limiter.check("10.0.0.1").await.unwrap();
    }

    // When
    let result = limiter.check("10.0.0.1").await;

    // Then
    match result {
        Err(LimitError::RateLimitExceeded {
            limit,
            retry_after_secs,
            status_code,
            ..
        }) => {
            assert_that!(limit, eq(3));
            assert_that!(retry_after_secs, gt(0));
            assert_that!(status_code, eq(429));
        }
        other => panic!("expected rate limit rejection, got {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn given_window_elapsed_when_checked_then_fresh_window() {
    // Given
    let limiter = RateLimiter::new("test", small_window_config());
    for _ in 0..3 {
        limiter.check("10.0.0.1").await.unwrap();
    }
    assert!(limiter.check("10.0.0.1").await.is_err());

    // When
    tokio::time::advance(Duration::from_millis(1100)).await;
    let status = limiter.check("10.0.0.1").await.unwrap();

    // Then
    assert_that!(status.remaining, eq(2));
}

#[tokio::test(start_paused = true)]
async fn given_exactly_at_reset_instant_when_checked_then_still_same_window() {
    // Given
    let limiter = RateLimiter::new("test", small_window_config());
    for _ in 0..3 {
        limiter.check("10.0.0.1").await.unwrap();
    }

    // When
    tokio::time::advance(Duration::from_millis(1000)).await;
    let result = limiter.check("10.0.0.1").await;

    // Then
    assert!(result.is_err(), "window only rolls over once now > reset");
}

#[tokio::test(start_paused = true)]
async fn given_key_a_exhausted_when_key_b_checked_then_unaffected() {
    // Given
    let limiter = RateLimiter::new("test", small_window_config());
    for _ in 0..3 {
        limiter.check("client-a").await.unwrap();
    }
    assert!(limiter.check("client-a").await.is_err());

    // When
    let status = limiter.check("client-b").await.unwrap();

    // Then
    assert_that!(status.remaining, eq(2));
}

#[tokio::test(start_paused = true)]
async fn given_two_limiters_when_one_exhausted_then_other_keeps_its_own_counters() {
    // Given
    let global = RateLimiter::new("global", RateLimitConfig::default());
    let strict = RateLimiter::new("strict", small_window_config());
    for _ in 0..3 {
        strict.check("10.0.0.1").await.unwrap();
    }

    // When
    let global_status = global.check("10.0.0.1").await.unwrap();

    // Then
    assert!(strict.check("10.0.0.1").await.is_err());
    assert_that!(global_status.remaining, eq(99));
}

#[tokio::test(start_paused = true)]
async fn given_clone_when_checked_then_shares_store() {
    // Given
    let limiter = RateLimiter::new("test", small_window_config());
    let clone = limiter.clone();

    // When
    limiter.check("10.0.0.1").await.unwrap();
    let status = clone.check("10.0.0.1").await.unwrap();

    // Then
    assert_that!(status.remaining, eq(1));
}

#[tokio::test]
async fn given_accepted_request_when_checked_then_reset_is_in_the_future() {
    // Given
    let limiter = RateLimiter::new("test", RateLimitConfig::default());
    let now = chrono::Utc::now().timestamp();

    // When
    let status = limiter.check("10.0.0.1").await.unwrap();

    // Then
    assert!(status.reset_epoch_secs >= now + 59);
    assert!(status.reset_epoch_secs <= now + 61);
}

#[tokio::test(start_paused = true)]
async fn given_requests_later_in_same_window_when_checked_then_reset_epoch_is_stable() {
    // Given
    let limiter = RateLimiter::new("test", RateLimitConfig::default());
    let first = limiter.check("10.0.0.1").await.unwrap();

    // When
    tokio::time::advance(Duration::from_millis(1_500)).await;
    let second = limiter.check("10.0.0.1").await.unwrap();
    tokio::time::advance(Duration::from_secs(20)).await;
    let third = limiter.check("10.0.0.1").await.unwrap();

    // Then
    assert_that!(second.reset_epoch_secs, eq(first.reset_epoch_secs));
    assert_that!(third.reset_epoch_secs, eq(first.reset_epoch_secs));
}

#[test]
fn given_rejection_when_error_code_then_rate_limit_exceeded() {
    let error = LimitError::RateLimitExceeded {
        key: "10.0.0.1".into(),
        message: "slow down".into(),
        status_code: 429,
        limit: 3,
        reset_epoch_secs: 0,
        retry_after_secs: 1,
        location: error_location::ErrorLocation::from(std::panic::Location::caller()),
    };

    assert_that!(error.error_code(), eq("RATE_LIMIT_EXCEEDED"));
}

// =========================================================================
// Sweeper
// =========================================================================

#[tokio::test(start_paused = true)]
async fn given_sweeper_when_window_passes_then_expired_entries_reclaimed() {
    // Given
    let limiter = RateLimiter::new("test", small_window_config());
    let token = CancellationToken::new();
    let sweeper = limiter.spawn_sweeper(token.clone());
    limiter.check("10.0.0.1").await.unwrap();
    limiter.check("10.0.0.2").await.unwrap();

    // When - first sweep at 1s finds nothing expired (now == reset), second at 2s does
    tokio::time::sleep(Duration::from_millis(2100)).await;

    // Then
    assert!(limiter.store().is_empty().await);

    token.cancel();
    sweeper.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn given_cancelled_token_when_sweeper_running_then_task_finishes() {
    // Given
    let limiter = RateLimiter::new("test", small_window_config());
    let token = CancellationToken::new();
    let sweeper = limiter.spawn_sweeper(token.clone());

    // When
    token.cancel();

    // Then
    let joined = tokio::time::timeout(Duration::from_secs(1), sweeper).await;
    assert!(joined.is_ok());
}
