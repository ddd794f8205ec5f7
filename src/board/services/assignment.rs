//! Least-loaded auto-assignment selection.

use crate::board::{
    domain::UserId,
    ports::{TaskStore, TaskStoreError, UserDirectory, UserDirectoryError},
};
use std::sync::Arc;
use thiserror::Error;

/// Errors returned while selecting an assignee.
#[derive(Debug, Error)]
pub enum AssignmentError {
    /// Task store lookup failed.
    #[error(transparent)]
    Store(#[from] TaskStoreError),
    /// User directory lookup failed.
    #[error(transparent)]
    Directory(#[from] UserDirectoryError),
}

/// Selects the least-loaded user for auto-assignment.
pub struct AssignmentSelector<S, D>
where
    S: TaskStore,
    D: UserDirectory,
{
    store: Arc<S>,
    directory: Arc<D>,
}

impl<S, D> Clone for AssignmentSelector<S, D>
where
    S: TaskStore,
    D: UserDirectory,
{
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            directory: Arc::clone(&self.directory),
        }
    }
}

impl<S, D> AssignmentSelector<S, D>
where
    S: TaskStore,
    D: UserDirectory,
{
    /// Creates a new selector.
    #[must_use]
    pub const fn new(store: Arc<S>, directory: Arc<D>) -> Self {
        Self { store, directory }
    }

    /// Returns the user with the fewest non-Done assigned tasks, or
    /// `None` when no users are registered.
    ///
    /// Ties go to the first user in the directory's identifier-sorted
    /// enumeration, so repeated invocations over the same state pick
    /// the same user.
    ///
    /// # Errors
    ///
    /// Returns [`AssignmentError`] when the directory or the task
    /// store cannot be read.
    pub async fn select_least_loaded(&self) -> Result<Option<UserId>, AssignmentError> {
        let users = self.directory.list().await?;
        let mut best: Option<(UserId, u64)> = None;
        for user in users {
            let count = self.store.count_active_assigned(user.id()).await?;
            if best.as_ref().is_none_or(|(_, lowest)| count < *lowest) {
                best = Some((user.id(), count));
            }
        }
        Ok(best.map(|(id, _)| id))
    }
}
