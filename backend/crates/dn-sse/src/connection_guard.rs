use crate::{ConnectionRegistry, ConnectionScope, KeepAliveScheduler, Metrics, SubscriberId};

use log::info;

/// Owns a push connection's registration.
///
/// Dropping it, whichever way the stream ends, stops the keep-alive and
/// removes the subscriber from its registry partition.
pub struct ConnectionGuard {
    subscriber_id: SubscriberId,
    scope: ConnectionScope,
    registry: ConnectionRegistry,
    keep_alive: KeepAliveScheduler,
    metrics: Metrics,
}

impl ConnectionGuard {
    pub fn new(
        subscriber_id: SubscriberId,
        scope: ConnectionScope,
        registry: ConnectionRegistry,
        keep_alive: KeepAliveScheduler,
        metrics: Metrics,
    ) -> Self {
        Self {
            subscriber_id,
            scope,
            registry,
            keep_alive,
            metrics,
        }
    }

    pub fn subscriber_id(&self) -> SubscriberId {
        self.subscriber_id
    }

    pub fn scope(&self) -> &ConnectionScope {
        &self.scope
    }

    pub fn keep_alive(&self) -> &KeepAliveScheduler {
        &self.keep_alive
    }
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        self.keep_alive.cancel();

        match &self.scope {
            ConnectionScope::Global => self.registry.unregister_global(self.subscriber_id),
            ConnectionScope::Document(key) => {
                self.registry.unregister_scoped(key, self.subscriber_id)
            }
        }

        self.metrics.connection_closed(self.scope.label());
        info!(
            "SSE connection {} closed ({}, {} pings sent)",
            self.subscriber_id,
            self.scope,
            self.keep_alive.ticks()
        );
    }
}
