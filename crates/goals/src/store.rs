use lifegoals_core::{DomainError, GoalId, UserId};

use crate::goal::Goal;

/// Goal storage port (implemented by infra).
///
/// Each call is atomic per record; there is no cross-record transaction.
pub trait GoalStore: Send + Sync {
    fn find_by_id(&self, id: &GoalId) -> Result<Option<Goal>, DomainError>;
    /// All goals owned by `owner`, oldest first.
    fn find_by_owner(&self, owner: &UserId) -> Result<Vec<Goal>, DomainError>;
    /// Insert or replace by id.
    fn save(&self, goal: Goal) -> Result<Goal, DomainError>;
    fn delete_by_id(&self, id: &GoalId) -> Result<(), DomainError>;
}
