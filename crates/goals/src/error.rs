use thiserror::Error;

use lifegoals_auth::AuthzError;
use lifegoals_core::DomainError;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GoalError {
    #[error("goal not found")]
    NotFound,

    #[error("not authorized to modify this goal")]
    NotOwner,

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("storage failure: {0}")]
    Storage(String),
}

impl From<AuthzError> for GoalError {
    fn from(value: AuthzError) -> Self {
        match value {
            AuthzError::NotOwner => GoalError::NotOwner,
        }
    }
}

impl From<DomainError> for GoalError {
    fn from(value: DomainError) -> Self {
        GoalError::Storage(value.to_string())
    }
}
