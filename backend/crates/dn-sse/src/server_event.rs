use crate::{Result as SseErrorResult, SseError};

use std::panic::Location;
use std::sync::Arc;

use axum::response::sse::Event;
use chrono::{SecondsFormat, Utc};
use error_location::ErrorLocation;
use serde::Serialize;
use serde_json::{Value, json};

pub const CONNECTED_EVENT: &str = "connected";
pub const PING_EVENT: &str = "ping";
pub const DOCUMENT_EVENT: &str = "document_event";
pub const DOCUMENT_UPDATED_EVENT: &str = "document_updated";
pub const DOCUMENT_DELETED_EVENT: &str = "document_deleted";
pub const DOCUMENT_SHARED_EVENT: &str = "document_shared";

const CONNECTED_MESSAGE: &str = "SSE connection established";

/// A named event with a JSON payload, cheap to clone across subscribers
#[derive(Debug, Clone, PartialEq)]
pub struct ServerEvent {
    event_type: Arc<str>,
    payload: Arc<Value>,
}

impl ServerEvent {
    pub(crate) fn new(event_type: &str, payload: Value) -> Self {
        Self {
            event_type: Arc::from(event_type),
            payload: Arc::new(payload),
        }
    }

    /// Build an event from caller-supplied parts.
    ///
    /// The event type ends up on its own `event:` line, so it must be
    /// non-empty and free of line breaks.
    #[track_caller]
    pub fn custom<T: Serialize + ?Sized>(event_type: &str, payload: &T) -> SseErrorResult<Self> {
        if event_type.is_empty() || event_type.contains(['\n', '\r']) {
            return Err(SseError::InvalidEventType {
                event_type: event_type.escape_debug().to_string(),
                message: String::from("must be non-empty and contain no line breaks"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let payload = serde_json::to_value(payload)?;
        Ok(Self::new(event_type, payload))
    }

    /// First event on every push connection
    pub fn connected(resource_key: Option<&str>) -> Self {
        let payload = match resource_key {
            Some(key) => json!({ "message": CONNECTED_MESSAGE, "documentId": key }),
            None => json!({ "message": CONNECTED_MESSAGE }),
        };
        Self::new(CONNECTED_EVENT, payload)
    }

    pub fn ping() -> Self {
        Self::new(PING_EVENT, json!({ "timestamp": timestamp() }))
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    pub fn payload(&self) -> &Value {
        &self.payload
    }

    /// `event: <type>` / `data: <json>` frame for the SSE body
    pub fn to_sse_event(&self) -> Event {
        Event::default()
            .event(self.event_type.as_ref())
            .data(self.payload.to_string())
    }
}

pub(crate) fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
