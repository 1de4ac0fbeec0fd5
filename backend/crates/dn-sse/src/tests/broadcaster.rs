use crate::tests::{ClosedSink, FullSink, RecordingSink};
use crate::{ConnectionRegistry, EventBroadcaster, Metrics, ServerEvent};

use std::sync::Arc;

use googletest::assert_that;
use googletest::prelude::eq;
use serde_json::json;

fn broadcaster() -> (ConnectionRegistry, EventBroadcaster) {
    let registry = ConnectionRegistry::new();
    let broadcaster = EventBroadcaster::new(registry.clone(), Metrics::new());
    (registry, broadcaster)
}

fn note(text: &str) -> ServerEvent {
    ServerEvent::custom("note", &json!({ "text": text })).unwrap()
}

#[test]
fn given_global_subscribers_when_notified_then_each_receives_once() {
    // Given
    let (registry, broadcaster) = broadcaster();
    let first = RecordingSink::new();
    let second = RecordingSink::new();
    registry.register_global("alice".to_string(), first.clone());
    registry.register_global("bob".to_string(), second.clone());

    // When
    let delivered = broadcaster.notify_global(&note("hello"));

    // Then
    assert_that!(delivered, eq(2));
    assert_that!(first.events(), eq(&vec![note("hello")]));
    assert_that!(second.events(), eq(&vec![note("hello")]));
}

#[test]
fn given_no_subscribers_when_notified_then_zero_delivered() {
    // Given
    let (_registry, broadcaster) = broadcaster();

    // When
    let global = broadcaster.notify_global(&note("nobody"));
    let scoped = broadcaster.notify_scoped("doc-404", &note("nobody"));

    // Then
    assert_that!(global, eq(0));
    assert_that!(scoped, eq(0));
}

#[test]
fn given_failing_sink_when_notified_then_others_still_receive() {
    // Given
    let (registry, broadcaster) = broadcaster();
    let healthy = RecordingSink::new();
    registry.register_global("slow".to_string(), Arc::new(FullSink));
    registry.register_global("gone".to_string(), Arc::new(ClosedSink));
    registry.register_global("alice".to_string(), healthy.clone());

    // When
    let delivered = broadcaster.notify_global(&note("partial"));

    // Then
    assert_that!(delivered, eq(1));
    assert_that!(healthy.events().len(), eq(1));
}

#[test]
fn given_failing_sink_when_notified_then_subscriber_not_removed() {
    // Given
    let (registry, broadcaster) = broadcaster();
    registry.register_global("gone".to_string(), Arc::new(ClosedSink));

    // When
    broadcaster.notify_global(&note("partial"));

    // Then
    assert_that!(registry.global_count(), eq(1));
}

#[test]
fn given_scoped_subscribers_when_notified_then_only_matching_resource_receives() {
    // Given
    let (registry, broadcaster) = broadcaster();
    let doc_one = RecordingSink::new();
    let doc_two = RecordingSink::new();
    let global = RecordingSink::new();
    registry.register_scoped("doc-1", "alice".to_string(), doc_one.clone());
    registry.register_scoped("doc-2", "bob".to_string(), doc_two.clone());
    registry.register_global("carol".to_string(), global.clone());

    // When
    let delivered = broadcaster.notify_scoped("doc-1", &note("edit"));

    // Then
    assert_that!(delivered, eq(1));
    assert_that!(doc_one.events().len(), eq(1));
    assert!(doc_two.events().is_empty());
    assert!(global.events().is_empty());
}
