//! In-memory append-only audit record store.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::board::{
    domain::ActionLog,
    ports::{ActionLogStore, ActionLogStoreError, ActionLogStoreResult},
};

/// Thread-safe in-memory action log store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryActionLogStore {
    records: Arc<RwLock<Vec<ActionLog>>>,
}

impl InMemoryActionLogStore {
    /// Creates an empty in-memory log store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ActionLogStore for InMemoryActionLogStore {
    async fn append(&self, log: &ActionLog) -> ActionLogStoreResult<()> {
        let mut records = self.records.write().map_err(|err| {
            ActionLogStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        records.push(log.clone());
        Ok(())
    }

    async fn recent(&self, limit: usize) -> ActionLogStoreResult<Vec<ActionLog>> {
        let records = self.records.read().map_err(|err| {
            ActionLogStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(records.iter().rev().take(limit).cloned().collect())
    }
}
