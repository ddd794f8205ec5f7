//! Shared application state for the HTTP adapter.

use crate::board::ports::{ActionLogStore, TaskStore, UserDirectory};
use crate::board::services::TaskMutationService;
use crate::realtime::BoardEventHub;
use mockable::Clock;
use std::sync::Arc;

/// Handles shared by every request handler.
pub struct AppState<S, L, D, C>
where
    S: TaskStore,
    L: ActionLogStore,
    D: UserDirectory,
    C: Clock + Send + Sync,
{
    mutation: TaskMutationService<S, L, D, BoardEventHub, C>,
    directory: Arc<D>,
}

impl<S, L, D, C> Clone for AppState<S, L, D, C>
where
    S: TaskStore,
    L: ActionLogStore,
    D: UserDirectory,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            mutation: self.mutation.clone(),
            directory: Arc::clone(&self.directory),
        }
    }
}

impl<S, L, D, C> AppState<S, L, D, C>
where
    S: TaskStore,
    L: ActionLogStore,
    D: UserDirectory,
    C: Clock + Send + Sync,
{
    /// Wires the mutation service over the given ports and fan-out
    /// hub.
    #[must_use]
    pub fn new(
        store: Arc<S>,
        logs: Arc<L>,
        directory: Arc<D>,
        hub: Arc<BoardEventHub>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            mutation: TaskMutationService::new(store, logs, Arc::clone(&directory), hub, clock),
            directory,
        }
    }

    /// Returns the mutation service.
    #[must_use]
    pub const fn mutation(&self) -> &TaskMutationService<S, L, D, BoardEventHub, C> {
        &self.mutation
    }

    /// Returns the user directory.
    #[must_use]
    pub const fn directory(&self) -> &Arc<D> {
        &self.directory
    }
}
