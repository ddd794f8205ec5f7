//! Immutable audit records for board mutations.

use super::{LogId, ParseActionKindError, Task, TaskId, TaskPriority, TaskStatus, TaskTitle, UserId, UserProfile};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Kind of board mutation an audit record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// A task was created.
    Create,
    /// A task was updated through the versioned path.
    Update,
    /// A task was hard-deleted.
    Delete,
    /// A task was auto-assigned to the least-loaded user.
    SmartAssign,
}

impl ActionKind {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::SmartAssign => "smart_assign",
        }
    }
}

impl TryFrom<&str> for ActionKind {
    type Error = ParseActionKindError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "create" => Ok(Self::Create),
            "update" => Ok(Self::Update),
            "delete" => Ok(Self::Delete),
            "smart_assign" => Ok(Self::SmartAssign),
            _ => Err(ParseActionKindError(value.to_owned())),
        }
    }
}

/// Value copy of a task's fields at action time.
///
/// Embedded by value in audit records so the record stays readable
/// after the task itself is deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskSnapshot {
    /// Task identifier at action time.
    pub id: TaskId,
    /// Title at action time.
    pub title: TaskTitle,
    /// Description at action time, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Assignee at action time, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_user: Option<UserId>,
    /// Board column at action time.
    pub status: TaskStatus,
    /// Priority at action time.
    pub priority: TaskPriority,
    /// Latest mutation timestamp at action time.
    pub updated_at: DateTime<Utc>,
    /// Version counter at action time.
    pub version: u64,
}

impl TaskSnapshot {
    /// Copies the task's current field values.
    #[must_use]
    pub fn of(task: &Task) -> Self {
        Self {
            id: task.id(),
            title: task.title().clone(),
            description: task.description().map(str::to_owned),
            assigned_user: task.assigned_user(),
            status: task.status(),
            priority: task.priority(),
            updated_at: task.updated_at(),
            version: task.version(),
        }
    }
}

/// Immutable record of a single board mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionLog {
    /// Log record identifier.
    pub id: LogId,
    /// The acting user.
    #[serde(rename = "user")]
    pub actor: UserId,
    /// What happened.
    pub action: ActionKind,
    /// When it happened.
    pub timestamp: DateTime<Utc>,
    /// The task as it looked at action time.
    pub task: TaskSnapshot,
}

impl ActionLog {
    /// Creates a new audit record timestamped from the given clock.
    #[must_use]
    pub fn new(actor: UserId, action: ActionKind, task: TaskSnapshot, clock: &impl Clock) -> Self {
        Self {
            id: LogId::new(),
            actor,
            action,
            timestamp: clock.utc(),
            task,
        }
    }

    /// Attaches the actor's resolved profile for display, producing
    /// the shape pushed to subscribers and returned by the log feed.
    #[must_use]
    pub fn populate(self, actor: Option<UserProfile>) -> PopulatedActionLog {
        PopulatedActionLog {
            id: self.id,
            user: actor,
            action: self.action,
            timestamp: self.timestamp,
            task: self.task,
        }
    }
}

/// Audit record with the actor resolved to a display profile.
///
/// The profile is `None` when the actor is no longer known to the
/// user directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulatedActionLog {
    /// Log record identifier.
    pub id: LogId,
    /// The acting user's profile, when still resolvable.
    pub user: Option<UserProfile>,
    /// What happened.
    pub action: ActionKind,
    /// When it happened.
    pub timestamp: DateTime<Utc>,
    /// The task as it looked at action time.
    pub task: TaskSnapshot,
}
