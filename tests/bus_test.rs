//! Event bus fan-out as seen by independent subscribers.

use std::time::Duration;

use agentdeck::app::AppMessage;
use agentdeck::bus::EventBus;
use agentdeck::events::{DomainEvent, ErrorReport, ErrorSource, EventKind};
use agentdeck::models::ConversationMessage;
use agentdeck::session::UsageStats;
use agentdeck::shutdown::Shutdown;
use tokio::sync::mpsc;

fn bus() -> (EventBus, mpsc::UnboundedReceiver<AppMessage>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (EventBus::new(tx, Shutdown::new()), rx)
}

#[tokio::test]
async fn test_each_subscriber_gets_its_own_copy() {
    let (bus, mut ui) = bus();
    let mut first = bus.subscribe(EventKind::ConversationMessage, 4);
    let mut second = bus.subscribe(EventKind::ConversationMessage, 4);
    let mut errors = bus.subscribe(EventKind::Error, 4);

    bus.publish(DomainEvent::ConversationMessage(ConversationMessage::assistant("a")));
    bus.publish(DomainEvent::Error(ErrorReport::new(ErrorSource::Process, "boom")));

    assert_eq!(first.recv().await.unwrap().kind(), EventKind::ConversationMessage);
    assert_eq!(second.recv().await.unwrap().kind(), EventKind::ConversationMessage);
    assert_eq!(errors.recv().await.unwrap().kind(), EventKind::Error);
    assert!(first.try_recv().is_err());

    // The UI queue sees everything, in publish order.
    let kinds: Vec<EventKind> = std::iter::from_fn(|| ui.try_recv().ok())
        .filter_map(|msg| match msg {
            AppMessage::Event(event) => Some(event.kind()),
            AppMessage::CommandFinished => None,
        })
        .collect();
    assert_eq!(kinds, vec![EventKind::ConversationMessage, EventKind::Error]);
}

#[tokio::test]
async fn test_slow_subscriber_does_not_block_others() {
    let (bus, _ui) = bus();
    let mut slow = bus.subscribe(EventKind::SessionStats, 1);
    let mut fast = bus.subscribe(EventKind::SessionStats, 10);

    for turns in 1..=5 {
        bus.publish(DomainEvent::SessionStats(UsageStats {
            turns,
            ..UsageStats::default()
        }));
    }

    assert_eq!(bus.dropped_count(), 4);
    let mut fast_seen = 0;
    while fast.try_recv().is_ok() {
        fast_seen += 1;
    }
    assert_eq!(fast_seen, 5);

    match slow.recv().await.unwrap().payload {
        DomainEvent::SessionStats(stats) => assert_eq!(stats.turns, 1),
        other => panic!("unexpected {:?}", other),
    }
}

#[tokio::test]
async fn test_shutdown_ends_subscriber_tasks() {
    let (bus, _ui) = bus();
    let (seen_tx, mut seen_rx) = mpsc::unbounded_channel();
    let task = bus.spawn_subscriber(EventKind::Error, 8, move |event| {
        let seen_tx = seen_tx.clone();
        async move {
            let _ = seen_tx.send(event.kind());
        }
    });

    bus.publish(DomainEvent::Error(ErrorReport::new(ErrorSource::Stderr, "x")));
    let kind = tokio::time::timeout(Duration::from_secs(1), seen_rx.recv())
        .await
        .unwrap();
    assert_eq!(kind, Some(EventKind::Error));

    bus.shutdown();
    tokio::time::timeout(Duration::from_secs(1), task)
        .await
        .expect("subscriber should stop")
        .unwrap();

    // Publishing after shutdown is a no-op.
    bus.publish(DomainEvent::Error(ErrorReport::new(ErrorSource::Stderr, "late")));
    assert!(bus.is_closed());
    assert!(bus.subscribe(EventKind::Error, 1).recv().await.is_none());
}
