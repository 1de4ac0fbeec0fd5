mod broadcaster;
mod shutdown;

use crate::{EventSink, Result as SseErrorResult, ServerEvent, SseError};

use std::panic::Location;
use std::sync::Arc;

use error_location::ErrorLocation;
use parking_lot::Mutex;

/// Sink that keeps every delivered event
#[derive(Default)]
pub(crate) struct RecordingSink {
    events: Mutex<Vec<ServerEvent>>,
}

impl RecordingSink {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn events(&self) -> Vec<ServerEvent> {
        self.events.lock().clone()
    }

    pub(crate) fn event_types(&self) -> Vec<String> {
        self.events
            .lock()
            .iter()
            .map(|event| event.event_type().to_string())
            .collect()
    }
}

impl EventSink for RecordingSink {
    fn deliver(&self, event: &ServerEvent) -> SseErrorResult<()> {
        self.events.lock().push(event.clone());
        Ok(())
    }
}

/// Sink whose client never drains its buffer
pub(crate) struct FullSink;

impl EventSink for FullSink {
    fn deliver(&self, _event: &ServerEvent) -> SseErrorResult<()> {
        Err(SseError::SinkFull {
            location: ErrorLocation::from(Location::caller()),
        })
    }
}

/// Sink whose peer has gone away
pub(crate) struct ClosedSink;

impl EventSink for ClosedSink {
    fn deliver(&self, _event: &ServerEvent) -> SseErrorResult<()> {
        Err(SseError::SinkClosed {
            reason: String::from("peer reset"),
            location: ErrorLocation::from(Location::caller()),
        })
    }
}
