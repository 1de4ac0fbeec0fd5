//! Read-only views over the connection registry

use crate::{ApiEnvelope, ConnectedUsersDto, SseStatsDto};

use dn_sse::AppState;

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::Utc;

/// GET /api/stats/sse
pub async fn sse_stats(State(state): State<AppState>) -> Json<ApiEnvelope<SseStatsDto>> {
    Json(ApiEnvelope::ok(SseStatsDto {
        global_connections: state.registry.global_count(),
        doc_connections: state.registry.scoped_counts().into_iter().collect(),
        timestamp: Utc::now(),
    }))
}

/// GET /api/sse/docs/{id}/users
pub async fn connected_users(
    State(state): State<AppState>,
    Path(document_id): Path<String>,
) -> Json<ApiEnvelope<ConnectedUsersDto>> {
    let users = state.registry.connected_owners(&document_id);

    Json(ApiEnvelope::ok(ConnectedUsersDto { document_id, users }))
}
