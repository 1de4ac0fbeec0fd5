pub mod app_state;
pub mod connection_config;
pub mod connection_guard;
pub mod connection_registry;
pub mod connection_scope;
pub mod document_notifier;
pub mod error;
pub mod event_broadcaster;
pub mod event_sink;
pub mod keep_alive;
pub mod metrics;
pub mod server_event;
pub mod shutdown_coordinator;
pub mod shutdown_guard;
pub mod sse_connection;
pub mod subscriber;
pub mod subscriber_id;

pub use app_state::{AppState, document_stream_handler, extract_owner_id, global_stream_handler};
pub use connection_config::ConnectionConfig;
pub use connection_guard::ConnectionGuard;
pub use connection_registry::ConnectionRegistry;
pub use connection_scope::ConnectionScope;
pub use document_notifier::{DocumentNotifier, Recipients};
pub use error::{Result, SseError};
pub use event_broadcaster::EventBroadcaster;
pub use event_sink::{ChannelSink, EventSink};
pub use keep_alive::{KeepAliveScheduler, KeepAliveState};
pub use metrics::Metrics;
pub use server_event::ServerEvent;
pub use shutdown_coordinator::ShutdownCoordinator;
pub use shutdown_guard::ShutdownGuard;
pub use sse_connection::SseConnection;
pub use subscriber::Subscriber;
pub use subscriber_id::SubscriberId;

/// Header carrying the identity established by the upstream auth layer
pub const OWNER_ID_HEADER: &str = "x-user-id";
/// Owner recorded when no identity was supplied
pub const ANONYMOUS_OWNER: &str = "anonymous";

#[cfg(test)]
mod tests;
