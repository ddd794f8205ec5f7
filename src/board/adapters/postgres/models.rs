//! Diesel row models for board persistence.

use super::schema::{action_logs, tasks, users};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Optional assignee.
    pub assigned_user: Option<uuid::Uuid>,
    /// Board column label.
    pub status: String,
    /// Priority label.
    pub priority: String,
    /// Latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
    /// Version counter.
    pub version: i64,
}

/// Insert and changeset model for task records.
///
/// The primary key is skipped by the changeset derive, and `None`
/// fields are skipped on update; the board never clears a stored
/// description or assignee, so skip-on-`None` matches the patch
/// semantics.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = tasks)]
pub struct TaskRecord {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Optional assignee.
    pub assigned_user: Option<uuid::Uuid>,
    /// Board column label.
    pub status: String,
    /// Priority label.
    pub priority: String,
    /// Latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
    /// Version counter.
    pub version: i64,
}

/// Query result row for user records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    /// User identifier.
    pub id: uuid::Uuid,
    /// Display name.
    pub username: String,
    /// Email address.
    pub email: String,
}

/// Query result row for audit records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = action_logs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ActionLogRow {
    /// Log record identifier.
    pub id: uuid::Uuid,
    /// The acting user.
    pub user_id: uuid::Uuid,
    /// Action kind label.
    pub action: String,
    /// Action timestamp.
    pub timestamp: DateTime<Utc>,
    /// Task snapshot payload.
    pub task: Value,
}

/// Insert model for audit records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = action_logs)]
pub struct NewActionLogRow {
    /// Log record identifier.
    pub id: uuid::Uuid,
    /// The acting user.
    pub user_id: uuid::Uuid,
    /// Action kind label.
    pub action: String,
    /// Action timestamp.
    pub timestamp: DateTime<Utc>,
    /// Task snapshot payload.
    pub task: Value,
}
