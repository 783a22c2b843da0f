//! Domain error model.

use thiserror::Error;

/// Domain-level error.
///
/// Shared by the storage ports and id parsing. Crates with a richer failure
/// taxonomy (auth, goals) wrap this instead of extending it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A uniqueness constraint was violated.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The backing store could not complete the operation.
    #[error("storage failure: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }
}
