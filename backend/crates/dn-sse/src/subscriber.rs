use crate::{EventSink, Result as SseErrorResult, ServerEvent, SubscriberId};

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};

/// One live push connection as seen by the registry
#[derive(Clone)]
pub struct Subscriber {
    pub id: SubscriberId,
    /// Informational only, never used for authorization
    pub owner_id: String,
    pub connected_at: DateTime<Utc>,
    sink: Arc<dyn EventSink>,
}

impl Subscriber {
    pub(crate) fn new(owner_id: String, sink: Arc<dyn EventSink>) -> Self {
        Self {
            id: SubscriberId::new(),
            owner_id,
            connected_at: Utc::now(),
            sink,
        }
    }

    pub fn deliver(&self, event: &ServerEvent) -> SseErrorResult<()> {
        self.sink.deliver(event)
    }
}

impl fmt::Debug for Subscriber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscriber")
            .field("id", &self.id)
            .field("owner_id", &self.owner_id)
            .field("connected_at", &self.connected_at)
            .finish_non_exhaustive()
    }
}
