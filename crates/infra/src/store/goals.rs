use lifegoals_core::{DomainError, GoalId, UserId};
use lifegoals_goals::{Goal, GoalStore};

use super::RecordMap;

/// In-memory goal store for tests/dev.
///
/// Concurrent saves of the same goal race; the last write wins.
#[derive(Debug, Default)]
pub struct InMemoryGoalStore {
    rows: RecordMap<Goal>,
}

impl InMemoryGoalStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GoalStore for InMemoryGoalStore {
    fn find_by_id(&self, id: &GoalId) -> Result<Option<Goal>, DomainError> {
        self.rows.get(id)
    }

    fn find_by_owner(&self, owner: &UserId) -> Result<Vec<Goal>, DomainError> {
        let mut goals = self.rows.filter(|g| g.owner_id == *owner)?;
        goals.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(goals)
    }

    fn save(&self, goal: Goal) -> Result<Goal, DomainError> {
        self.rows.upsert(goal)
    }

    fn delete_by_id(&self, id: &GoalId) -> Result<(), DomainError> {
        if self.rows.remove(id)?.is_none() {
            tracing::debug!(goal_id = %id, "delete of absent goal ignored");
        }
        Ok(())
    }
}
