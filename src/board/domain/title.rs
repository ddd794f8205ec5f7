//! Validated task title scalar.

use super::{BoardDomainError, TaskStatus};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Globally unique task title.
///
/// A title is rejected when it is empty or when it exactly matches one
/// of the board column names (`Todo`, `In Progress`, `Done`). The
/// match is case-sensitive; uniqueness across tasks is enforced by the
/// task store, not here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskTitle(String);

impl TaskTitle {
    /// Creates a validated task title.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyTitle`] for an empty value and
    /// [`BoardDomainError::ReservedTitle`] when the value equals a
    /// board column name.
    pub fn new(value: impl Into<String>) -> Result<Self, BoardDomainError> {
        let raw = value.into();
        if raw.is_empty() {
            return Err(BoardDomainError::EmptyTitle);
        }
        if TaskStatus::ALL
            .iter()
            .any(|status| status.column_name() == raw)
        {
            return Err(BoardDomainError::ReservedTitle(raw));
        }
        Ok(Self(raw))
    }

    /// Returns the title as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TaskTitle {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
