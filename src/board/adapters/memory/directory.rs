//! In-memory user directory.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::board::{
    domain::{UserId, UserProfile},
    ports::{UserDirectory, UserDirectoryError, UserDirectoryResult},
};

/// Thread-safe in-memory user directory.
///
/// Users are kept in a map ordered by identifier so enumeration
/// satisfies the directory contract's deterministic sort order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserDirectory {
    users: Arc<RwLock<BTreeMap<UserId, UserProfile>>>,
}

impl InMemoryUserDirectory {
    /// Creates an empty in-memory directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a user, replacing any profile under the same
    /// identifier.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryError::Persistence`] when the shared
    /// state is poisoned.
    pub fn insert(&self, profile: UserProfile) -> UserDirectoryResult<()> {
        let mut users = self
            .users
            .write()
            .map_err(|err| UserDirectoryError::persistence(std::io::Error::other(err.to_string())))?;
        users.insert(profile.id(), profile);
        Ok(())
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn list(&self) -> UserDirectoryResult<Vec<UserProfile>> {
        let users = self
            .users
            .read()
            .map_err(|err| UserDirectoryError::persistence(std::io::Error::other(err.to_string())))?;
        Ok(users.values().cloned().collect())
    }

    async fn find(&self, id: UserId) -> UserDirectoryResult<Option<UserProfile>> {
        let users = self
            .users
            .read()
            .map_err(|err| UserDirectoryError::persistence(std::io::Error::other(err.to_string())))?;
        Ok(users.get(&id).cloned())
    }
}
