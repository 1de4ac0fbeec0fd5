use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SseError {
    #[error("Send buffer full, client too slow {location}")]
    SinkFull { location: ErrorLocation },

    #[error("Connection closed: {reason} {location}")]
    SinkClosed {
        reason: String,
        location: ErrorLocation,
    },

    #[error("Invalid event type '{event_type}': {message} {location}")]
    InvalidEventType {
        event_type: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("Event payload serialization failed: {source} {location}")]
    Serialize {
        #[source]
        source: serde_json::Error,
        location: ErrorLocation,
    },
}

impl SseError {
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::SinkFull { .. } => "SLOW_CLIENT",
            Self::SinkClosed { .. } => "CONNECTION_CLOSED",
            Self::InvalidEventType { .. } => "INVALID_EVENT_TYPE",
            Self::Serialize { .. } => "SERIALIZE_ERROR",
        }
    }

    /// True when the peer is gone for good, as opposed to a transient failure
    pub fn is_disconnect(&self) -> bool {
        matches!(self, Self::SinkClosed { .. })
    }
}

impl From<serde_json::Error> for SseError {
    #[track_caller]
    fn from(source: serde_json::Error) -> Self {
        Self::Serialize {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, SseError>;
