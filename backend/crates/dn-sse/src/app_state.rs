use crate::{
    ANONYMOUS_OWNER, ConnectionConfig, ConnectionRegistry, ConnectionScope, DocumentNotifier,
    EventBroadcaster, Metrics, OWNER_ID_HEADER, ShutdownCoordinator, SseConnection,
};

use std::convert::Infallible;

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::sse::{Event, Sse},
};
use futures::Stream;
use log::debug;

/// Shared application state for push handlers
#[derive(Clone)]
pub struct AppState {
    pub registry: ConnectionRegistry,
    pub broadcaster: EventBroadcaster,
    pub notifier: DocumentNotifier,
    pub metrics: Metrics,
    pub shutdown: ShutdownCoordinator,
    pub config: ConnectionConfig,
}

impl AppState {
    pub fn new(config: ConnectionConfig, shutdown: ShutdownCoordinator) -> Self {
        let registry = ConnectionRegistry::new();
        let metrics = Metrics::new();
        let broadcaster = EventBroadcaster::new(registry.clone(), metrics.clone());
        let notifier = DocumentNotifier::new(broadcaster.clone());

        Self {
            registry,
            broadcaster,
            notifier,
            metrics,
            shutdown,
            config,
        }
    }
}

/// Global push stream handler
pub async fn global_stream_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let owner_id = extract_owner_id(&headers);
    debug!("Global SSE request from {owner_id}");

    let connection = SseConnection::open(&state, ConnectionScope::Global, owner_id);
    Sse::new(connection.into_stream())
}

/// Document-scoped push stream handler
pub async fn document_stream_handler(
    State(state): State<AppState>,
    Path(document_id): Path<String>,
    headers: HeaderMap,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let owner_id = extract_owner_id(&headers);
    debug!("SSE request from {owner_id} for document {document_id}");

    let connection = SseConnection::open(&state, ConnectionScope::Document(document_id), owner_id);
    Sse::new(connection.into_stream())
}

/// Identity set by the upstream auth layer, or the anonymous sentinel
pub fn extract_owner_id(headers: &HeaderMap) -> String {
    headers
        .get(OWNER_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|owner| !owner.is_empty())
        .unwrap_or(ANONYMOUS_OWNER)
        .to_string()
}
