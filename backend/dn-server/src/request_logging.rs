use dn_sse::extract_owner_id;

use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};
use http::{HeaderName, HeaderValue};
use log::{info, warn};
use metrics::{counter, histogram};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Middleware: tag the request with an id and log its start and finish.
///
/// For push connections "finish" is when the stream starts, not when it ends.
pub async fn log_requests(request: Request, next: Next) -> Response {
    let started_at = Instant::now();
    let request_id = Uuid::new_v4().simple().to_string();
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let owner_id = extract_owner_id(request.headers());

    info!("[req={request_id}] --> {method} {path} (user {owner_id})");

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    let status = response.status();
    let elapsed = started_at.elapsed();
    if status.is_client_error() || status.is_server_error() {
        warn!(
            "[req={request_id}] <-- {method} {path} {} ({}ms)",
            status.as_u16(),
            elapsed.as_millis()
        );
    } else {
        info!(
            "[req={request_id}] <-- {method} {path} {} ({}ms)",
            status.as_u16(),
            elapsed.as_millis()
        );
    }

    counter!("dn_server.requests", "status" => status.as_u16().to_string()).increment(1);
    histogram!("dn_server.requests.latency_ms").record(elapsed.as_millis() as f64);

    response
}
