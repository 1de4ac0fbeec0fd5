use crate::{
    AppState, ChannelSink, ConnectionGuard, ConnectionScope, EventSink, KeepAliveScheduler,
    Metrics, ServerEvent, SubscriberId,
};

use std::convert::Infallible;
use std::sync::Arc;

use async_stream::stream;
use axum::response::sse::Event;
use futures::Stream;
use log::{info, warn};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// A single push connection, from registration to the end of its stream
pub struct SseConnection {
    receiver: mpsc::Receiver<ServerEvent>,
    guard: ConnectionGuard,
    token: CancellationToken,
    metrics: Metrics,
}

impl SseConnection {
    /// Register a new subscriber and start its keep-alive.
    ///
    /// The `connected` event is queued before registration, so it is always
    /// the first frame on the wire.
    pub fn open(state: &AppState, scope: ConnectionScope, owner_id: String) -> Self {
        let (sink, receiver) = ChannelSink::channel(state.config.send_buffer_size);
        let sink: Arc<dyn EventSink> = Arc::new(sink);

        if let Err(e) = sink.deliver(&ServerEvent::connected(scope.resource_key())) {
            warn!("Failed to queue connected event: {e}");
        }

        let subscriber_id = match &scope {
            ConnectionScope::Global => state.registry.register_global(owner_id, Arc::clone(&sink)),
            ConnectionScope::Document(key) => {
                state
                    .registry
                    .register_scoped(key, owner_id, Arc::clone(&sink))
            }
        };

        let token = state.shutdown.child_token();
        let keep_alive = KeepAliveScheduler::start(
            subscriber_id,
            sink,
            state.config.keep_alive_interval,
            token.clone(),
            state.metrics.clone(),
        );

        state.metrics.connection_opened(scope.label());
        info!("SSE connection {subscriber_id} established ({scope})");

        let guard = ConnectionGuard::new(
            subscriber_id,
            scope,
            state.registry.clone(),
            keep_alive,
            state.metrics.clone(),
        );

        Self {
            receiver,
            guard,
            token,
            metrics: state.metrics.clone(),
        }
    }

    pub fn subscriber_id(&self) -> SubscriberId {
        self.guard.subscriber_id()
    }

    /// Response body stream.
    ///
    /// Ends on shutdown or keep-alive cancellation; dropping it (client gone)
    /// runs the guard's cleanup.
    pub fn into_stream(self) -> impl Stream<Item = Result<Event, Infallible>> + Send + 'static {
        let Self {
            mut receiver,
            guard,
            token,
            metrics,
        } = self;

        stream! {
            let _guard = guard;

            loop {
                let next = tokio::select! {
                    biased;
                    _ = token.cancelled() => None,
                    event = receiver.recv() => event,
                };

                let Some(event) = next else {
                    break;
                };

                metrics.event_sent(event.event_type());
                yield Ok(event.to_sse_event());
            }
        }
    }
}
