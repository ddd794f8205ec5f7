//! Request bodies and populated response views.

use crate::board::domain::{
    Task, TaskId, TaskPriority, TaskStatus, TaskTitle, UserId, UserProfile,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of `POST /tasks`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskBody {
    /// Required task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Optional initial assignee.
    pub assigned_user: Option<UserId>,
    /// Optional initial board column.
    pub status: Option<TaskStatus>,
    /// Optional priority.
    pub priority: Option<TaskPriority>,
}

/// Body of `PUT /tasks/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskBody {
    /// New title, when present.
    pub title: Option<String>,
    /// New description, when present.
    pub description: Option<String>,
    /// New assignee, when present.
    pub assigned_user: Option<UserId>,
    /// New board column, when present.
    pub status: Option<TaskStatus>,
    /// New priority, when present.
    pub priority: Option<TaskPriority>,
    /// The version the caller last observed; omitted to bypass the
    /// conflict check.
    pub version: Option<u64>,
}

/// Query string of `GET /tasks`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskListQuery {
    /// Exact title filter.
    pub title: Option<String>,
}

/// Plain confirmation body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageBody {
    /// Human-readable confirmation.
    pub message: String,
}

/// Task view with the assignee resolved to a display profile, used by
/// the read routes.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskWithAssignee {
    /// Task identifier.
    pub id: TaskId,
    /// Task title.
    pub title: TaskTitle,
    /// Description, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Resolved assignee profile, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_user: Option<UserProfile>,
    /// Board column.
    pub status: TaskStatus,
    /// Priority.
    pub priority: TaskPriority,
    /// Latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
    /// Version counter.
    pub version: u64,
}

impl TaskWithAssignee {
    /// Builds the view from a task and its resolved assignee.
    #[must_use]
    pub fn new(task: &Task, assigned_user: Option<UserProfile>) -> Self {
        Self {
            id: task.id(),
            title: task.title().clone(),
            description: task.description().map(str::to_owned),
            assigned_user,
            status: task.status(),
            priority: task.priority(),
            updated_at: task.updated_at(),
            version: task.version(),
        }
    }
}
