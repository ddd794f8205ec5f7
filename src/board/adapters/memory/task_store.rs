//! In-memory task store.
//!
//! The write lock around the shared state is the serialization point
//! for the version-checked conditional write: no other writer can
//! interleave between the version read and the version bump.

use async_trait::async_trait;
use mockable::Clock;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::board::{
    domain::{Task, TaskChanges, TaskId, UserId},
    ports::{TaskStore, TaskStoreError, TaskStoreResult},
};

/// Thread-safe in-memory task store.
#[derive(Debug)]
pub struct InMemoryTaskStore<C> {
    state: Arc<RwLock<InMemoryTaskState>>,
    clock: Arc<C>,
}

impl<C> Clone for InMemoryTaskStore<C> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            clock: Arc::clone(&self.clock),
        }
    }
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: HashMap<TaskId, Task>,
    title_index: HashMap<String, TaskId>,
}

impl<C> InMemoryTaskStore<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an empty in-memory store stamping mutations from the
    /// given clock.
    #[must_use]
    pub fn new(clock: Arc<C>) -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryTaskState::default())),
            clock,
        }
    }

    fn read_state(&self) -> TaskStoreResult<std::sync::RwLockReadGuard<'_, InMemoryTaskState>> {
        self.state
            .read()
            .map_err(|err| TaskStoreError::persistence(std::io::Error::other(err.to_string())))
    }

    fn write_state(&self) -> TaskStoreResult<std::sync::RwLockWriteGuard<'_, InMemoryTaskState>> {
        self.state
            .write()
            .map_err(|err| TaskStoreError::persistence(std::io::Error::other(err.to_string())))
    }
}

#[async_trait]
impl<C> TaskStore for InMemoryTaskStore<C>
where
    C: Clock + Send + Sync,
{
    async fn create(&self, task: &Task) -> TaskStoreResult<()> {
        let mut state = self.write_state()?;
        let title = task.title().as_str().to_owned();
        if state.title_index.contains_key(&title) {
            return Err(TaskStoreError::DuplicateTitle(title));
        }
        state.title_index.insert(title, task.id());
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn get(&self, id: TaskId) -> TaskStoreResult<Option<Task>> {
        let state = self.read_state()?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn find_by_title(&self, title: &str) -> TaskStoreResult<Option<Task>> {
        let state = self.read_state()?;
        let task = state
            .title_index
            .get(title)
            .and_then(|id| state.tasks.get(id))
            .cloned();
        Ok(task)
    }

    async fn list(&self, title: Option<&str>) -> TaskStoreResult<Vec<Task>> {
        let state = self.read_state()?;
        let mut tasks: Vec<Task> = state
            .tasks
            .values()
            .filter(|task| title.is_none_or(|wanted| task.title().as_str() == wanted))
            .cloned()
            .collect();
        tasks.sort_by_key(|task| task.id().into_inner());
        Ok(tasks)
    }

    async fn update(
        &self,
        id: TaskId,
        changes: &TaskChanges,
        expected_version: Option<u64>,
    ) -> TaskStoreResult<Task> {
        let mut state = self.write_state()?;

        let current = state
            .tasks
            .get(&id)
            .ok_or(TaskStoreError::NotFound(id))?
            .clone();
        if expected_version.is_some_and(|expected| expected != current.version()) {
            return Err(TaskStoreError::VersionConflict {
                current: Box::new(current),
            });
        }

        if let Some(new_title) = changes.title() {
            if new_title != current.title() {
                let key = new_title.as_str().to_owned();
                if state.title_index.contains_key(&key) {
                    return Err(TaskStoreError::DuplicateTitle(key));
                }
                state.title_index.remove(current.title().as_str());
                state.title_index.insert(key, id);
            }
        }

        let mut updated = current;
        updated.apply(changes, &*self.clock);
        state.tasks.insert(id, updated.clone());
        Ok(updated)
    }

    async fn delete(&self, id: TaskId) -> TaskStoreResult<Task> {
        let mut state = self.write_state()?;
        let task = state.tasks.remove(&id).ok_or(TaskStoreError::NotFound(id))?;
        state.title_index.remove(task.title().as_str());
        Ok(task)
    }

    async fn count_active_assigned(&self, user: UserId) -> TaskStoreResult<u64> {
        let state = self.read_state()?;
        let count = state
            .tasks
            .values()
            .filter(|task| task.assigned_user() == Some(user) && !task.status().is_done())
            .count();
        u64::try_from(count).map_err(TaskStoreError::persistence)
    }
}
