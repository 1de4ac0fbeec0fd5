use crate::server_event::{
    DOCUMENT_DELETED_EVENT, DOCUMENT_EVENT, DOCUMENT_SHARED_EVENT, DOCUMENT_UPDATED_EVENT,
    timestamp,
};
use crate::{EventBroadcaster, Result as SseErrorResult, ServerEvent};

use log::info;
use serde::Serialize;
use serde_json::{Value, json};

pub const DEFAULT_DOCUMENT_TITLE: &str = "Untitled document";

/// Deliveries made by one notification
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Recipients {
    pub global: usize,
    pub scoped: usize,
}

/// Document lifecycle notifications.
///
/// Call one operation per mutation, after the mutation is durably applied.
/// Global subscribers get a summary `document_event`; subscribers of the
/// document itself get the detailed event.
#[derive(Clone)]
pub struct DocumentNotifier {
    broadcaster: EventBroadcaster,
}

impl DocumentNotifier {
    pub fn new(broadcaster: EventBroadcaster) -> Self {
        Self { broadcaster }
    }

    pub fn document_created(&self, document_id: &str, title: Option<&str>) -> Recipients {
        let title = title.unwrap_or(DEFAULT_DOCUMENT_TITLE);
        let summary = ServerEvent::new(
            DOCUMENT_EVENT,
            json!({
                "type": "created",
                "documentId": document_id,
                "title": title,
                "timestamp": timestamp(),
            }),
        );

        let recipients = Recipients {
            global: self.broadcaster.notify_global(&summary),
            scoped: 0,
        };
        info!("Document {document_id} created, notified {recipients:?}");
        recipients
    }

    pub fn document_updated(&self, document_id: &str, updates: &[Value]) -> Recipients {
        let summary = ServerEvent::new(
            DOCUMENT_EVENT,
            json!({
                "type": "updated",
                "documentId": document_id,
                "updatesCount": updates.len(),
                "timestamp": timestamp(),
            }),
        );
        let detail = ServerEvent::new(
            DOCUMENT_UPDATED_EVENT,
            json!({
                "documentId": document_id,
                "updates": updates,
                "timestamp": timestamp(),
            }),
        );

        let recipients = self.notify_both(document_id, &summary, &detail);
        info!(
            "Document {document_id} updated ({} changes), notified {recipients:?}",
            updates.len()
        );
        recipients
    }

    pub fn document_deleted(&self, document_id: &str) -> Recipients {
        let summary = ServerEvent::new(
            DOCUMENT_EVENT,
            json!({
                "type": "deleted",
                "documentId": document_id,
                "timestamp": timestamp(),
            }),
        );
        let detail = ServerEvent::new(
            DOCUMENT_DELETED_EVENT,
            json!({
                "documentId": document_id,
                "timestamp": timestamp(),
            }),
        );

        let recipients = self.notify_both(document_id, &summary, &detail);
        info!("Document {document_id} deleted, notified {recipients:?}");
        recipients
    }

    pub fn document_shared(&self, document_id: &str, email: &str, role: &str) -> Recipients {
        let summary = ServerEvent::new(
            DOCUMENT_EVENT,
            json!({
                "type": "shared",
                "documentId": document_id,
                "email": email,
                "role": role,
                "timestamp": timestamp(),
            }),
        );
        let detail = ServerEvent::new(
            DOCUMENT_SHARED_EVENT,
            json!({
                "documentId": document_id,
                "email": email,
                "role": role,
                "timestamp": timestamp(),
            }),
        );

        let recipients = self.notify_both(document_id, &summary, &detail);
        info!("Document {document_id} shared with {email} as {role}, notified {recipients:?}");
        recipients
    }

    /// Custom event for subscribers of one document only
    #[track_caller]
    pub fn broadcast_to_document<T: Serialize + ?Sized>(
        &self,
        document_id: &str,
        event_type: &str,
        payload: &T,
    ) -> SseErrorResult<usize> {
        let event = ServerEvent::custom(event_type, payload)?;
        Ok(self.broadcaster.notify_scoped(document_id, &event))
    }

    fn notify_both(&self, document_id: &str, summary: &ServerEvent, detail: &ServerEvent) -> Recipients {
        Recipients {
            global: self.broadcaster.notify_global(summary),
            scoped: self.broadcaster.notify_scoped(document_id, detail),
        }
    }
}
