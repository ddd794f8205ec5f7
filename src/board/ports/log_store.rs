//! Store port for append-only audit records.

use crate::board::domain::ActionLog;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for action log store operations.
pub type ActionLogStoreResult<T> = Result<T, ActionLogStoreError>;

/// Append-only audit record persistence contract.
///
/// Records are immutable once appended and are never deleted by the
/// board; retention is an external concern.
#[async_trait]
pub trait ActionLogStore: Send + Sync {
    /// Appends one audit record.
    async fn append(&self, log: &ActionLog) -> ActionLogStoreResult<()>;

    /// Returns up to `limit` records, most recent first.
    async fn recent(&self, limit: usize) -> ActionLogStoreResult<Vec<ActionLog>>;
}

/// Errors returned by action log store implementations.
#[derive(Debug, Clone, Error)]
pub enum ActionLogStoreError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ActionLogStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
