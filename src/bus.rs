//! Event bus: fans domain events out to subscribers and the UI loop.
//!
//! Subscribers get bounded queues and lose events when they fall behind.
//! The UI sink is unbounded and sees every event in publish order.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::app::AppMessage;
use crate::events::{DomainEvent, Event, EventKind};
use crate::shutdown::{Shutdown, ShutdownListener};

/// Cheaply cloneable handle to the bus.
#[derive(Clone)]
pub struct EventBus {
    inner: Arc<Inner>,
}

struct Inner {
    subscribers: Mutex<HashMap<EventKind, Vec<mpsc::Sender<Event>>>>,
    ui_sink: Mutex<Option<mpsc::UnboundedSender<AppMessage>>>,
    shutdown: Shutdown,
    closed: AtomicBool,
    dropped: AtomicU64,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    // A panic while holding the lock leaves the map itself consistent.
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl EventBus {
    /// Create a bus that forwards every event into `ui_sink`.
    pub fn new(ui_sink: mpsc::UnboundedSender<AppMessage>, shutdown: Shutdown) -> Self {
        Self {
            inner: Arc::new(Inner {
                subscribers: Mutex::new(HashMap::new()),
                ui_sink: Mutex::new(Some(ui_sink)),
                shutdown,
                closed: AtomicBool::new(false),
                dropped: AtomicU64::new(0),
            }),
        }
    }

    /// Register a bounded queue for one event kind.
    ///
    /// After shutdown the returned receiver is already closed.
    pub fn subscribe(&self, kind: EventKind, capacity: usize) -> mpsc::Receiver<Event> {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        if self.is_closed() {
            return rx;
        }
        lock(&self.inner.subscribers).entry(kind).or_default().push(tx);
        debug!(?kind, capacity, "subscriber registered");
        rx
    }

    /// Deliver an event without blocking.
    ///
    /// A full subscriber queue drops the event for that subscriber only.
    /// Subscribers whose receiver is gone are pruned.
    pub fn publish(&self, payload: DomainEvent) {
        if self.is_closed() {
            return;
        }
        let event = Event::new(payload);
        let kind = event.kind();

        {
            let mut subscribers = lock(&self.inner.subscribers);
            if let Some(queues) = subscribers.get_mut(&kind) {
                queues.retain(|tx| match tx.try_send(event.clone()) {
                    Ok(()) => true,
                    Err(mpsc::error::TrySendError::Full(_)) => {
                        self.inner.dropped.fetch_add(1, Ordering::Relaxed);
                        debug!(?kind, "subscriber queue full, event dropped");
                        true
                    }
                    Err(mpsc::error::TrySendError::Closed(_)) => false,
                });
            }
        }

        self.notify_ui(AppMessage::Event(event));
    }

    /// Send a control message through the UI queue, behind any events
    /// already published.
    pub fn notify_ui(&self, message: AppMessage) {
        if let Some(sink) = lock(&self.inner.ui_sink).as_ref() {
            if sink.send(message).is_err() {
                debug!("ui loop gone, message discarded");
            }
        }
    }

    /// Spawn a task that feeds one subscription into `handler` until the
    /// queue closes or shutdown fires.
    pub fn spawn_subscriber<H, Fut>(
        &self,
        kind: EventKind,
        capacity: usize,
        mut handler: H,
    ) -> JoinHandle<()>
    where
        H: FnMut(Event) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let mut rx = self.subscribe(kind, capacity);
        let mut listener = self.listener();
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = listener.cancelled() => break,
                    next = rx.recv() => match next {
                        Some(event) => handler(event).await,
                        None => break,
                    }
                }
            }
            debug!(?kind, "subscriber task finished");
        })
    }

    /// Stop delivery. Idempotent.
    ///
    /// Fires the shared cancellation signal and closes every subscriber
    /// queue, so readers see end-of-stream once they drain.
    pub fn shutdown(&self) {
        if self.inner.closed.swap(true, Ordering::SeqCst) {
            return;
        }
        self.inner.shutdown.trigger();
        lock(&self.inner.subscribers).clear();
        lock(&self.inner.ui_sink).take();
        info!(
            dropped = self.dropped_count(),
            "event bus shut down"
        );
    }

    pub fn is_closed(&self) -> bool {
        self.inner.closed.load(Ordering::SeqCst)
    }

    pub fn listener(&self) -> ShutdownListener {
        self.inner.shutdown.listener()
    }

    /// Events dropped across all subscribers since startup.
    pub fn dropped_count(&self) -> u64 {
        self.inner.dropped.load(Ordering::Relaxed)
    }

    pub fn subscriber_count(&self, kind: EventKind) -> usize {
        lock(&self.inner.subscribers)
            .get(&kind)
            .map(Vec::len)
            .unwrap_or(0)
    }
}
