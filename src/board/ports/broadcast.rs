//! Push port towards connected board observers.

use crate::board::domain::{PopulatedActionLog, Task};

/// Best-effort push channel towards every connected subscriber,
/// including the one whose action caused the event.
///
/// Delivery is fire-and-forget: no acknowledgement, no retry, no
/// replay for disconnected subscribers. Implementations must preserve
/// per-subscriber ordering of events as they were broadcast.
pub trait EventBroadcaster: Send + Sync {
    /// Pushes a task's new state (or, for deletions, its last-known
    /// state) to all subscribers.
    fn broadcast_task(&self, task: &Task);

    /// Pushes a freshly appended audit record to all subscribers.
    fn broadcast_log(&self, log: &PopulatedActionLog);
}
