use crate::{EventSink, Subscriber, SubscriberId};

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use log::info;
use parking_lot::RwLock;

/// Registry for tracking live push connections.
///
/// The global and scoped partitions are independent: a connection opened on
/// a document stream is never part of the global set, and vice versa. Every
/// read returns a snapshot, so callers can iterate while connections come
/// and go.
#[derive(Default)]
pub struct ConnectionRegistry {
    inner: Arc<RegistryInner>,
}

#[derive(Default)]
struct RegistryInner {
    global: RwLock<HashMap<SubscriberId, Subscriber>>,
    /// Never holds an empty group
    scoped: RwLock<HashMap<String, HashMap<SubscriberId, Subscriber>>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_global(&self, owner_id: String, sink: Arc<dyn EventSink>) -> SubscriberId {
        let subscriber = Subscriber::new(owner_id, sink);
        let mut global = self.inner.global.write();
        global.insert(subscriber.id, subscriber.clone());
        info!(
            "Registered global connection {} for {} ({} total)",
            subscriber.id,
            subscriber.owner_id,
            global.len()
        );
        subscriber.id
    }

    /// Absent ids are ignored
    pub fn unregister_global(&self, subscriber_id: SubscriberId) {
        let mut global = self.inner.global.write();
        if global.remove(&subscriber_id).is_some() {
            info!(
                "Unregistered global connection {subscriber_id} ({} remaining)",
                global.len()
            );
        }
    }

    pub fn register_scoped(
        &self,
        resource_key: &str,
        owner_id: String,
        sink: Arc<dyn EventSink>,
    ) -> SubscriberId {
        let subscriber = Subscriber::new(owner_id, sink);
        let mut scoped = self.inner.scoped.write();
        let group = scoped.entry(resource_key.to_string()).or_default();
        group.insert(subscriber.id, subscriber.clone());
        info!(
            "Registered connection {} for {} on document {resource_key} ({} on document)",
            subscriber.id,
            subscriber.owner_id,
            group.len()
        );
        subscriber.id
    }

    /// Drops the group once its last subscriber leaves; absent ids are ignored
    pub fn unregister_scoped(&self, resource_key: &str, subscriber_id: SubscriberId) {
        let mut scoped = self.inner.scoped.write();
        let Some(group) = scoped.get_mut(resource_key) else {
            return;
        };

        if group.remove(&subscriber_id).is_some() {
            let remaining = group.len();
            if remaining == 0 {
                scoped.remove(resource_key);
            }
            info!(
                "Unregistered connection {subscriber_id} from document {resource_key} ({remaining} remaining)"
            );
        }
    }

    pub fn global_count(&self) -> usize {
        self.inner.global.read().len()
    }

    /// Only keys with at least one subscriber appear
    pub fn scoped_counts(&self) -> HashMap<String, usize> {
        self.inner
            .scoped
            .read()
            .iter()
            .map(|(key, group)| (key.clone(), group.len()))
            .collect()
    }

    pub fn scoped_count(&self, resource_key: &str) -> usize {
        self.inner
            .scoped
            .read()
            .get(resource_key)
            .map_or(0, HashMap::len)
    }

    pub fn global_subscribers(&self) -> Vec<Subscriber> {
        self.inner.global.read().values().cloned().collect()
    }

    pub fn subscribers_for(&self, resource_key: &str) -> Vec<Subscriber> {
        self.inner
            .scoped
            .read()
            .get(resource_key)
            .map(|group| group.values().cloned().collect())
            .unwrap_or_default()
    }

    /// Distinct owners connected to a resource, sorted
    pub fn connected_owners(&self, resource_key: &str) -> Vec<String> {
        self.inner
            .scoped
            .read()
            .get(resource_key)
            .map(|group| {
                group
                    .values()
                    .map(|subscriber| subscriber.owner_id.clone())
                    .collect::<BTreeSet<_>>()
                    .into_iter()
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl Clone for ConnectionRegistry {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}
