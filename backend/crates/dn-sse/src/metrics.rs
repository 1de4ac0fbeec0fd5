use crate::server_event::{
    CONNECTED_EVENT, DOCUMENT_DELETED_EVENT, DOCUMENT_EVENT, DOCUMENT_SHARED_EVENT,
    DOCUMENT_UPDATED_EVENT, PING_EVENT,
};

use metrics::{counter, gauge};

/// Label for event types outside the built-in set
pub const CUSTOM_EVENT_LABEL: &str = "custom";

/// Metrics collector for push connections and fan-out
#[derive(Clone)]
pub struct Metrics {
    prefix: &'static str,
}

impl Metrics {
    pub fn new() -> Self {
        Self { prefix: "dn_sse" }
    }

    /// Record a stream attached to a registry partition ("global" or "scoped")
    pub fn connection_opened(&self, scope: &'static str) {
        counter!(format!("{}.connections.opened", self.prefix), "scope" => scope).increment(1);
        gauge!(format!("{}.connections.active", self.prefix), "scope" => scope).increment(1.0);
    }

    pub fn connection_closed(&self, scope: &'static str) {
        counter!(format!("{}.connections.closed", self.prefix), "scope" => scope).increment(1);
        gauge!(format!("{}.connections.active", self.prefix), "scope" => scope).decrement(1.0);
    }

    /// Record an event written to a response stream
    pub fn event_sent(&self, event_type: &str) {
        counter!(
            format!("{}.events.sent", self.prefix),
            "event_type" => event_label(event_type)
        )
        .increment(1);
    }

    pub fn broadcast_published(&self, scope: &'static str, delivered: usize) {
        counter!(format!("{}.broadcast.published", self.prefix), "scope" => scope).increment(1);
        gauge!(format!("{}.broadcast.recipients", self.prefix), "scope" => scope)
            .set(delivered as f64);
    }

    pub fn delivery_failed(&self, error_code: &'static str) {
        counter!(format!("{}.delivery.failed", self.prefix), "code" => error_code).increment(1);
    }

    pub fn keep_alive_sent(&self) {
        counter!(format!("{}.keep_alive.sent", self.prefix)).increment(1);
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Caller-defined event types share one label so label cardinality stays fixed
pub fn event_label(event_type: &str) -> &'static str {
    match event_type {
        CONNECTED_EVENT => CONNECTED_EVENT,
        PING_EVENT => PING_EVENT,
        DOCUMENT_EVENT => DOCUMENT_EVENT,
        DOCUMENT_UPDATED_EVENT => DOCUMENT_UPDATED_EVENT,
        DOCUMENT_DELETED_EVENT => DOCUMENT_DELETED_EVENT,
        DOCUMENT_SHARED_EVENT => DOCUMENT_SHARED_EVENT,
        _ => CUSTOM_EVENT_LABEL,
    }
}
