//! Store port for task persistence and the version-checked write.

use crate::board::domain::{Task, TaskChanges, TaskId, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task store operations.
pub type TaskStoreResult<T> = Result<T, TaskStoreError>;

/// Task persistence contract.
///
/// [`TaskStore::update`] is the single serialization point for a
/// task's version counter: reading the current version and
/// conditionally writing the new one must be indivisible, with no
/// window for another writer to interleave on the same identifier.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::DuplicateTitle`] when a task with the
    /// same title already exists.
    async fn create(&self, task: &Task) -> TaskStoreResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn get(&self, id: TaskId) -> TaskStoreResult<Option<Task>>;

    /// Finds a task by exact title.
    ///
    /// Returns `None` when no task carries the title.
    async fn find_by_title(&self, title: &str) -> TaskStoreResult<Option<Task>>;

    /// Returns all tasks, optionally filtered by exact title, in
    /// stable identifier order.
    async fn list(&self, title: Option<&str>) -> TaskStoreResult<Vec<Task>>;

    /// Applies a field patch through the atomic conditional write and
    /// returns the updated task.
    ///
    /// When `expected_version` is given, the write only lands if it
    /// matches the stored version. When absent, the patch applies on
    /// top of whatever version is current; the counter still advances
    /// by exactly 1.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] for an unknown identifier,
    /// [`TaskStoreError::VersionConflict`] carrying the authoritative
    /// stored task when the expected version is stale, and
    /// [`TaskStoreError::DuplicateTitle`] when the patch renames onto
    /// an existing title.
    async fn update(
        &self,
        id: TaskId,
        changes: &TaskChanges,
        expected_version: Option<u64>,
    ) -> TaskStoreResult<Task>;

    /// Hard-deletes a task and returns its last stored state.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] for an unknown identifier.
    async fn delete(&self, id: TaskId) -> TaskStoreResult<Task>;

    /// Counts tasks assigned to the user whose status is not `Done`.
    async fn count_active_assigned(&self, user: UserId) -> TaskStoreResult<u64>;
}

/// Errors returned by task store implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskStoreError {
    /// A task with the same title already exists.
    #[error("duplicate task title: {0}")]
    DuplicateTitle(String),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The expected version is stale; `current` is the authoritative
    /// stored task.
    #[error("version conflict on task {}", current.id())]
    VersionConflict {
        /// The task as currently stored.
        current: Box<Task>,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
