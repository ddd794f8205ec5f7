//! Events pushed to connected board observers.

use crate::board::domain::{PopulatedActionLog, Task};
use serde_json::Value;

/// A single push-channel event.
///
/// Events carry no envelope beyond their name; clients reconcile by
/// task identifier, and a `taskUpdate` for a deleted task carries its
/// last-known state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardEvent {
    /// A task changed (or was deleted).
    TaskUpdate(Task),
    /// An audit record was appended.
    LogUpdate(PopulatedActionLog),
}

impl BoardEvent {
    /// Returns the wire-level event name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::TaskUpdate(_) => "taskUpdate",
            Self::LogUpdate(_) => "logUpdate",
        }
    }

    /// Serializes the payload for a transport adapter.
    ///
    /// # Errors
    ///
    /// Returns a `serde_json` error when the payload cannot be
    /// serialized.
    pub fn payload(&self) -> serde_json::Result<Value> {
        match self {
            Self::TaskUpdate(task) => serde_json::to_value(task),
            Self::LogUpdate(log) => serde_json::to_value(log),
        }
    }
}
