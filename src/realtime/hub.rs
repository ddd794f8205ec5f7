//! Fan-out hub for connected board observers.
//!
//! An explicitly constructed hub instance is handed to the mutation
//! service and audit recorder; there is no process-wide channel.
//! Each subscriber gets its own FIFO queue, so events arrive in the
//! order they were broadcast even though delivery across subscribers
//! is unordered. Delivery is best-effort: a disconnected subscriber
//! simply misses events until it reconnects and re-fetches state.

use super::BoardEvent;
use crate::board::{
    domain::{PopulatedActionLog, Task},
    ports::EventBroadcaster,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

/// Broadcast hub over all currently connected subscribers.
#[derive(Debug, Clone, Default)]
pub struct BoardEventHub {
    inner: Arc<HubInner>,
}

#[derive(Debug, Default)]
struct HubInner {
    subscribers: Mutex<HashMap<u64, mpsc::UnboundedSender<BoardEvent>>>,
    next_id: AtomicU64,
}

impl BoardEventHub {
    /// Creates a hub with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new subscriber and returns its event stream.
    ///
    /// Dropping the returned subscription unregisters it.
    #[must_use]
    pub fn subscribe(&self) -> Subscription {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        let (sender, receiver) = mpsc::unbounded_channel();
        if let Ok(mut subscribers) = self.inner.subscribers.lock() {
            subscribers.insert(id, sender);
        }
        Subscription {
            id,
            inner: Arc::clone(&self.inner),
            receiver,
        }
    }

    /// Returns the number of currently connected subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner
            .subscribers
            .lock()
            .map_or(0, |subscribers| subscribers.len())
    }

    /// Delivers an event to every connected subscriber, pruning any
    /// whose receiving side is gone.
    pub fn publish(&self, event: &BoardEvent) {
        let Ok(mut subscribers) = self.inner.subscribers.lock() else {
            return;
        };
        subscribers.retain(|_, sender| sender.send(event.clone()).is_ok());
    }
}

impl EventBroadcaster for BoardEventHub {
    fn broadcast_task(&self, task: &Task) {
        self.publish(&BoardEvent::TaskUpdate(task.clone()));
    }

    fn broadcast_log(&self, log: &PopulatedActionLog) {
        self.publish(&BoardEvent::LogUpdate(log.clone()));
    }
}

/// A subscriber's registration and FIFO event stream.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    inner: Arc<HubInner>,
    receiver: mpsc::UnboundedReceiver<BoardEvent>,
}

impl Subscription {
    /// Receives the next event, or `None` once the hub is gone.
    pub async fn recv(&mut self) -> Option<BoardEvent> {
        self.receiver.recv().await
    }

    /// Receives an already-queued event without waiting.
    pub fn try_recv(&mut self) -> Option<BoardEvent> {
        self.receiver.try_recv().ok()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Ok(mut subscribers) = self.inner.subscribers.lock() {
            subscribers.remove(&self.id);
        }
    }
}
