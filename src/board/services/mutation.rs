//! Orchestration of validated board mutations.
//!
//! Every mutation follows the same shape: validate input, write
//! through the store's version-checked path, then broadcast the
//! task's new state and record an audit entry. Broadcast and audit
//! run only after the storage write is accepted and never roll it
//! back.

use crate::board::{
    domain::{
        ActionKind, BoardDomainError, Task, TaskChanges, TaskId, TaskPriority, TaskSnapshot,
        TaskStatus, TaskTitle, UserId,
    },
    ports::{ActionLogStore, EventBroadcaster, TaskStore, TaskStoreError, UserDirectory},
    services::{AssignmentError, AssignmentSelector, AuditRecorder},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::warn;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    description: Option<String>,
    assigned_user: Option<UserId>,
    status: Option<TaskStatus>,
    priority: Option<TaskPriority>,
}

impl CreateTaskRequest {
    /// Creates a request with the required title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            assigned_user: None,
            status: None,
            priority: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the initial assignee.
    #[must_use]
    pub const fn with_assigned_user(mut self, user: UserId) -> Self {
        self.assigned_user = Some(user);
        self
    }

    /// Sets the initial board column (defaults to Todo).
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the priority (defaults to Medium).
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }
}

/// Request payload for updating a task.
///
/// Absent fields leave the stored value untouched. When
/// `expected_version` is present and stale, the update is rejected
/// with the authoritative server record instead of being applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    title: Option<String>,
    description: Option<String>,
    assigned_user: Option<UserId>,
    status: Option<TaskStatus>,
    priority: Option<TaskPriority>,
    expected_version: Option<u64>,
}

impl UpdateTaskRequest {
    /// Creates an empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a new title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets a new description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets a new assignee.
    #[must_use]
    pub const fn with_assigned_user(mut self, user: UserId) -> Self {
        self.assigned_user = Some(user);
        self
    }

    /// Sets a new status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets a new priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets the version the caller last observed.
    #[must_use]
    pub const fn with_expected_version(mut self, version: u64) -> Self {
        self.expected_version = Some(version);
        self
    }
}

/// Service-level errors for board mutations.
#[derive(Debug, Error)]
pub enum TaskMutationError {
    /// Title validation failed.
    #[error(transparent)]
    Domain(#[from] BoardDomainError),

    /// A task with the same title already exists.
    #[error("task title must be unique: {0}")]
    DuplicateTitle(String),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The caller's version is stale; `server` is the authoritative
    /// record to resolve against before resubmitting.
    #[error("version conflict on task {}", server.id())]
    Conflict {
        /// The task as currently stored.
        server: Box<Task>,
    },

    /// No users are registered to auto-assign to.
    #[error("no users available for assignment")]
    NoEligibleUsers,

    /// Unexpected storage failure.
    #[error("storage failure: {0}")]
    Storage(TaskStoreError),

    /// Assignment selection failed against storage.
    #[error("assignment selection failed: {0}")]
    Assignment(#[from] AssignmentError),
}

impl From<TaskStoreError> for TaskMutationError {
    fn from(err: TaskStoreError) -> Self {
        match err {
            TaskStoreError::DuplicateTitle(title) => Self::DuplicateTitle(title),
            TaskStoreError::NotFound(id) => Self::NotFound(id),
            TaskStoreError::VersionConflict { current } => Self::Conflict { server: current },
            TaskStoreError::Persistence(_) => Self::Storage(err),
        }
    }
}

/// Result type for board mutation operations.
pub type TaskMutationResult<T> = Result<T, TaskMutationError>;

/// Board mutation orchestration service.
pub struct TaskMutationService<S, L, D, B, C>
where
    S: TaskStore,
    L: ActionLogStore,
    D: UserDirectory,
    B: EventBroadcaster,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    selector: AssignmentSelector<S, D>,
    audit: AuditRecorder<L, D, B, C>,
    broadcaster: Arc<B>,
    clock: Arc<C>,
}

impl<S, L, D, B, C> Clone for TaskMutationService<S, L, D, B, C>
where
    S: TaskStore,
    L: ActionLogStore,
    D: UserDirectory,
    B: EventBroadcaster,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            selector: self.selector.clone(),
            audit: self.audit.clone(),
            broadcaster: Arc::clone(&self.broadcaster),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<S, L, D, B, C> TaskMutationService<S, L, D, B, C>
where
    S: TaskStore,
    L: ActionLogStore,
    D: UserDirectory,
    B: EventBroadcaster,
    C: Clock + Send + Sync,
{
    /// Creates a new mutation service over the given ports.
    #[must_use]
    pub fn new(
        store: Arc<S>,
        logs: Arc<L>,
        directory: Arc<D>,
        broadcaster: Arc<B>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            selector: AssignmentSelector::new(Arc::clone(&store), Arc::clone(&directory)),
            audit: AuditRecorder::new(logs, directory, Arc::clone(&broadcaster), Arc::clone(&clock)),
            store,
            broadcaster,
            clock,
        }
    }

    /// Creates a task at version 1 in the Todo column (unless the
    /// request says otherwise), records a `create` audit entry, and
    /// broadcasts the new state.
    ///
    /// # Errors
    ///
    /// Returns [`TaskMutationError::Domain`] for an empty or reserved
    /// title and [`TaskMutationError::DuplicateTitle`] when the title
    /// is already taken.
    pub async fn create_task(
        &self,
        actor: UserId,
        request: CreateTaskRequest,
    ) -> TaskMutationResult<Task> {
        let title = TaskTitle::new(request.title)?;
        let task = Task::new(
            title,
            request.description,
            request.assigned_user,
            request.status.unwrap_or_default(),
            request.priority.unwrap_or_default(),
            &*self.clock,
        );
        self.store.create(&task).await?;
        self.follow_up(actor, ActionKind::Create, &task).await;
        Ok(task)
    }

    /// Applies a field patch through the version-checked write,
    /// records an `update` audit entry, and broadcasts the new state.
    ///
    /// # Errors
    ///
    /// Returns [`TaskMutationError::Domain`] for an invalid patched
    /// title, [`TaskMutationError::NotFound`] for an unknown task,
    /// [`TaskMutationError::Conflict`] carrying the authoritative
    /// server record when the expected version is stale, and
    /// [`TaskMutationError::DuplicateTitle`] when renaming onto an
    /// existing title.
    pub async fn update_task(
        &self,
        actor: UserId,
        id: TaskId,
        request: UpdateTaskRequest,
    ) -> TaskMutationResult<Task> {
        let mut changes = TaskChanges::new();
        if let Some(title) = request.title {
            changes = changes.with_title(TaskTitle::new(title)?);
        }
        if let Some(description) = request.description {
            changes = changes.with_description(description);
        }
        if let Some(user) = request.assigned_user {
            changes = changes.with_assigned_user(user);
        }
        if let Some(status) = request.status {
            changes = changes.with_status(status);
        }
        if let Some(priority) = request.priority {
            changes = changes.with_priority(priority);
        }

        let task = self
            .store
            .update(id, &changes, request.expected_version)
            .await?;
        self.follow_up(actor, ActionKind::Update, &task).await;
        Ok(task)
    }

    /// Hard-deletes a task, records a `delete` audit entry with the
    /// pre-delete snapshot, and broadcasts the last-known state so
    /// clients can drop it from view.
    ///
    /// # Errors
    ///
    /// Returns [`TaskMutationError::NotFound`] for an unknown task.
    pub async fn delete_task(&self, actor: UserId, id: TaskId) -> TaskMutationResult<Task> {
        let task = self.store.delete(id).await?;
        self.follow_up(actor, ActionKind::Delete, &task).await;
        Ok(task)
    }

    /// Assigns the task to the least-loaded registered user through
    /// the version-checked write, records a `smart_assign` audit
    /// entry, and broadcasts the new state.
    ///
    /// # Errors
    ///
    /// Returns [`TaskMutationError::NotFound`] for an unknown task,
    /// [`TaskMutationError::NoEligibleUsers`] when no users are
    /// registered, and [`TaskMutationError::Conflict`] when another
    /// writer lands between the load read and the assignment write.
    pub async fn smart_assign_task(&self, actor: UserId, id: TaskId) -> TaskMutationResult<Task> {
        let current = self
            .store
            .get(id)
            .await?
            .ok_or(TaskMutationError::NotFound(id))?;
        let assignee = self
            .selector
            .select_least_loaded()
            .await?
            .ok_or(TaskMutationError::NoEligibleUsers)?;

        let changes = TaskChanges::new().with_assigned_user(assignee);
        let task = self
            .store
            .update(id, &changes, Some(current.version()))
            .await?;
        self.follow_up(actor, ActionKind::SmartAssign, &task).await;
        Ok(task)
    }

    /// Finds a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskMutationError::NotFound`] for an unknown task.
    pub async fn get_task(&self, id: TaskId) -> TaskMutationResult<Task> {
        self.store
            .get(id)
            .await?
            .ok_or(TaskMutationError::NotFound(id))
    }

    /// Returns all tasks, optionally filtered by exact title.
    ///
    /// # Errors
    ///
    /// Returns [`TaskMutationError::Storage`] when the store cannot be
    /// read.
    pub async fn list_tasks(&self, title: Option<&str>) -> TaskMutationResult<Vec<Task>> {
        Ok(self.store.list(title).await?)
    }

    /// Pushes the committed task state and records the audit entry.
    ///
    /// Subscribers observe the task event before the log event. A
    /// failed audit append is logged and swallowed: the mutation's
    /// success is defined solely by the storage write.
    async fn follow_up(&self, actor: UserId, action: ActionKind, task: &Task) {
        self.broadcaster.broadcast_task(task);
        let snapshot = TaskSnapshot::of(task);
        if let Err(err) = self.audit.record(actor, action, snapshot).await {
            warn!(task_id = %task.id(), error = %err, "audit follow-up failed after committed mutation");
        }
    }

    /// Returns a handle on the audit recorder for the activity feed.
    #[must_use]
    pub const fn audit(&self) -> &AuditRecorder<L, D, B, C> {
        &self.audit
    }
}
