//! REST API error types
//!
//! Every error renders as `{"error": {"message": ..., "code": ...}}` with a
//! matching HTTP status.

use crate::rate_limit::{RATE_LIMIT_LIMIT, RATE_LIMIT_REMAINING, RATE_LIMIT_RESET};

use dn_limit::LimitError;

use std::panic::Location;

use axum::{
    Json,
    http::{StatusCode, Uri, header::RETRY_AFTER},
    response::{IntoResponse, Response},
};
use error_location::ErrorLocation;
use serde::Serialize;
use thiserror::Error;

/// JSON error response body
#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    /// Machine-readable error code (e.g., "RATE_LIMIT_EXCEEDED")
    pub code: String,
    pub message: String,
}

/// API errors with associated HTTP status codes
#[derive(Debug, Error)]
pub enum ApiError {
    /// Rejected by a rate limiter (429 unless configured otherwise)
    #[error("Rate limited: {message} (retry in {retry_after_secs}s) {location}")]
    RateLimited {
        message: String,
        status_code: u16,
        limit: u32,
        reset_epoch_secs: i64,
        retry_after_secs: u64,
        location: ErrorLocation,
    },

    /// Resource not found (404)
    #[error("Resource not found: {message} {location}")]
    NotFound {
        message: String,
        location: ErrorLocation,
    },

    /// Internal server error (500)
    #[error("Internal error: {message} {location}")]
    Internal {
        message: String,
        location: ErrorLocation,
    },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Internal { .. } => log::error!("{self}"),
            _ => log::debug!("{self}"),
        }

        match self {
            ApiError::RateLimited {
                message,
                status_code,
                limit,
                reset_epoch_secs,
                retry_after_secs,
                ..
            } => {
                let status =
                    StatusCode::from_u16(status_code).unwrap_or(StatusCode::TOO_MANY_REQUESTS);
                let body = ApiErrorBody {
                    code: "RATE_LIMIT_EXCEEDED".into(),
                    message,
                };

                let mut response = (status, Json(ApiErrorResponse { error: body })).into_response();
                let headers = response.headers_mut();
                headers.insert(RETRY_AFTER, retry_after_secs.into());
                headers.insert(RATE_LIMIT_LIMIT, limit.into());
                headers.insert(RATE_LIMIT_REMAINING, 0u32.into());
                headers.insert(RATE_LIMIT_RESET, reset_epoch_secs.into());
                response
            }
            ApiError::NotFound { message, .. } => (
                StatusCode::NOT_FOUND,
                Json(ApiErrorResponse {
                    error: ApiErrorBody {
                        code: "NOT_FOUND".into(),
                        message,
                    },
                }),
            )
                .into_response(),
            ApiError::Internal { message, .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiErrorResponse {
                    error: ApiErrorBody {
                        code: "INTERNAL_ERROR".into(),
                        message,
                    },
                }),
            )
                .into_response(),
        }
    }
}

impl From<LimitError> for ApiError {
    #[track_caller]
    fn from(e: LimitError) -> Self {
        match e {
            LimitError::RateLimitExceeded {
                message,
                status_code,
                limit,
                reset_epoch_secs,
                retry_after_secs,
                ..
            } => ApiError::RateLimited {
                message,
                status_code,
                limit,
                reset_epoch_secs,
                retry_after_secs,
                location: ErrorLocation::from(Location::caller()),
            },
            LimitError::InvalidConfig { message, .. } => ApiError::Internal {
                message: format!("Rate limiter misconfigured: {message}"),
                location: ErrorLocation::from(Location::caller()),
            },
        }
    }
}

/// Fallback for unknown routes
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound {
        message: format!("No route for {}", uri.path()),
        location: ErrorLocation::from(Location::caller()),
    }
}
