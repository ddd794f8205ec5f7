//! Audit recording and the activity feed.

use crate::board::{
    domain::{ActionKind, ActionLog, PopulatedActionLog, TaskSnapshot, UserId},
    ports::{
        ActionLogStore, ActionLogStoreError, EventBroadcaster, UserDirectory, UserDirectoryError,
    },
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Errors returned while recording or reading audit records.
#[derive(Debug, Error)]
pub enum AuditError {
    /// Log store operation failed.
    #[error(transparent)]
    Log(#[from] ActionLogStoreError),
    /// User directory lookup failed.
    #[error(transparent)]
    Directory(#[from] UserDirectoryError),
}

/// Appends immutable audit records and pushes them to subscribers.
pub struct AuditRecorder<L, D, B, C>
where
    L: ActionLogStore,
    D: UserDirectory,
    B: EventBroadcaster,
    C: Clock + Send + Sync,
{
    logs: Arc<L>,
    directory: Arc<D>,
    broadcaster: Arc<B>,
    clock: Arc<C>,
}

impl<L, D, B, C> Clone for AuditRecorder<L, D, B, C>
where
    L: ActionLogStore,
    D: UserDirectory,
    B: EventBroadcaster,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            logs: Arc::clone(&self.logs),
            directory: Arc::clone(&self.directory),
            broadcaster: Arc::clone(&self.broadcaster),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<L, D, B, C> AuditRecorder<L, D, B, C>
where
    L: ActionLogStore,
    D: UserDirectory,
    B: EventBroadcaster,
    C: Clock + Send + Sync,
{
    /// Creates a new recorder.
    #[must_use]
    pub const fn new(logs: Arc<L>, directory: Arc<D>, broadcaster: Arc<B>, clock: Arc<C>) -> Self {
        Self {
            logs,
            directory,
            broadcaster,
            clock,
        }
    }

    /// Appends one record for a committed mutation, resolves the
    /// actor's profile, and pushes the populated record to all
    /// subscribers.
    ///
    /// # Errors
    ///
    /// Returns [`AuditError`] when the append or the actor lookup
    /// fails. Callers treat audit failures as best-effort follow-ups
    /// to an already-committed mutation.
    pub async fn record(
        &self,
        actor: UserId,
        action: ActionKind,
        task: TaskSnapshot,
    ) -> Result<PopulatedActionLog, AuditError> {
        let log = ActionLog::new(actor, action, task, &*self.clock);
        self.logs.append(&log).await?;
        let profile = self.directory.find(actor).await?;
        let populated = log.populate(profile);
        self.broadcaster.broadcast_log(&populated);
        Ok(populated)
    }

    /// Returns up to `limit` records, most recent first, with actors
    /// resolved to display profiles.
    ///
    /// # Errors
    ///
    /// Returns [`AuditError`] when the log store or the directory
    /// cannot be read.
    pub async fn recent(&self, limit: usize) -> Result<Vec<PopulatedActionLog>, AuditError> {
        let records = self.logs.recent(limit).await?;
        let mut populated = Vec::with_capacity(records.len());
        for record in records {
            let profile = self.directory.find(record.actor).await?;
            populated.push(record.populate(profile));
        }
        Ok(populated)
    }
}
