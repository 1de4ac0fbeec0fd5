use crate::{ConnectionRegistry, Metrics, ServerEvent, Subscriber};

use log::{debug, warn};

/// Fans events out to registry snapshots.
///
/// A failed delivery never aborts the fan-out; the broken subscriber is left
/// for its own stream to tear down.
#[derive(Clone)]
pub struct EventBroadcaster {
    registry: ConnectionRegistry,
    metrics: Metrics,
}

impl EventBroadcaster {
    pub fn new(registry: ConnectionRegistry, metrics: Metrics) -> Self {
        Self { registry, metrics }
    }

    pub fn registry(&self) -> &ConnectionRegistry {
        &self.registry
    }

    /// Returns the number of successful deliveries
    pub fn notify_global(&self, event: &ServerEvent) -> usize {
        let subscribers = self.registry.global_subscribers();
        self.fan_out("global", &subscribers, event)
    }

    /// Returns the number of successful deliveries; unknown keys deliver to nobody
    pub fn notify_scoped(&self, resource_key: &str, event: &ServerEvent) -> usize {
        let subscribers = self.registry.subscribers_for(resource_key);
        self.fan_out("scoped", &subscribers, event)
    }

    fn fan_out(&self, scope: &'static str, subscribers: &[Subscriber], event: &ServerEvent) -> usize {
        if subscribers.is_empty() {
            debug!("No {scope} subscribers for '{}'", event.event_type());
            return 0;
        }

        let mut delivered = 0;
        for subscriber in subscribers {
            match subscriber.deliver(event) {
                Ok(()) => delivered += 1,
                Err(e) => {
                    warn!(
                        "Failed to deliver '{}' to connection {} ({}): {e}",
                        event.event_type(),
                        subscriber.id,
                        subscriber.owner_id
                    );
                    self.metrics.delivery_failed(e.error_code());
                }
            }
        }

        self.metrics.broadcast_published(scope, delivered);
        debug!(
            "Broadcast '{}' to {delivered}/{} {scope} subscribers",
            event.event_type(),
            subscribers.len()
        );

        delivered
    }
}
