//! Read port over the externally owned user registry.

use crate::board::domain::{UserId, UserProfile};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for user directory operations.
pub type UserDirectoryResult<T> = Result<T, UserDirectoryError>;

/// Read-only contract over registered users.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Returns all registered users sorted by identifier.
    ///
    /// The sort order is part of the contract: the least-loaded
    /// selector breaks count ties by taking the first user it
    /// encounters, which must not depend on storage enumeration
    /// order.
    async fn list(&self) -> UserDirectoryResult<Vec<UserProfile>>;

    /// Finds a user by identifier.
    ///
    /// Returns `None` when the user is not registered.
    async fn find(&self, id: UserId) -> UserDirectoryResult<Option<UserProfile>>;
}

/// Errors returned by user directory implementations.
#[derive(Debug, Clone, Error)]
pub enum UserDirectoryError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl UserDirectoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
