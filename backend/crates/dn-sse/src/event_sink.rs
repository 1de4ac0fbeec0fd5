use crate::{Result as SseErrorResult, ServerEvent, SseError};

use std::panic::Location;

use error_location::ErrorLocation;
use tokio::sync::mpsc::{self, error::TrySendError};

/// Delivers one event to the remote peer of a connection.
///
/// Implementations must not block: broadcasts call `deliver` for every
/// subscriber in turn.
pub trait EventSink: Send + Sync {
    fn deliver(&self, event: &ServerEvent) -> SseErrorResult<()>;
}

/// Bounded queue drained by the connection's writer (the SSE response stream)
#[derive(Debug, Clone)]
pub struct ChannelSink {
    sender: mpsc::Sender<ServerEvent>,
}

impl ChannelSink {
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<ServerEvent>) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        (Self { sender }, receiver)
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

impl EventSink for ChannelSink {
    fn deliver(&self, event: &ServerEvent) -> SseErrorResult<()> {
        self.sender
            .try_send(event.clone())
            .map_err(|error| match error {
                TrySendError::Full(_) => SseError::SinkFull {
                    location: ErrorLocation::from(Location::caller()),
                },
                TrySendError::Closed(_) => SseError::SinkClosed {
                    reason: String::from("event stream dropped"),
                    location: ErrorLocation::from(Location::caller()),
                },
            })
    }
}
