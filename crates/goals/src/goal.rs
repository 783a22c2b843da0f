use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use lifegoals_auth::Owned;
use lifegoals_core::{Entity, GoalId, UserId};

use crate::error::GoalError;

/// A goal owned by exactly one identity.
///
/// `owner_id` and `created_at` are fixed at creation; `updated_at` moves
/// forward on every mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    pub id: GoalId,
    pub owner_id: UserId,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for Goal {
    type Id = GoalId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Owned for Goal {
    fn owner_id(&self) -> UserId {
        self.owner_id
    }
}

/// Client-supplied fields for a new goal. The owner is never part of this.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewGoal {
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
}

/// Partial update.
///
/// `title`/`description` are only written when present. `completed` is
/// always written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoalChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: bool,
}

impl Goal {
    /// Apply `changes` and stamp `updated_at`, never moving it backwards.
    pub fn apply(&mut self, changes: GoalChanges, now: DateTime<Utc>) -> Result<(), GoalError> {
        if let Some(title) = changes.title {
            self.title = validate_title(&title)?;
        }
        if let Some(description) = changes.description {
            self.description = Some(description);
        }
        self.completed = changes.completed;
        self.updated_at = now.max(self.updated_at);
        Ok(())
    }
}

pub(crate) fn validate_title(title: &str) -> Result<String, GoalError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(GoalError::Validation("title cannot be empty".to_string()));
    }
    Ok(title.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn goal() -> Goal {
        Goal {
            id: GoalId::new(),
            owner_id: UserId::new(),
            title: "Run a marathon".to_string(),
            description: Some("Spring race".to_string()),
            completed: false,
            created_at: t0(),
            updated_at: t0(),
        }
    }

    #[test]
    fn only_completed_changes_when_nothing_else_supplied() {
        let mut g = goal();
        let later = t0() + Duration::minutes(5);
        g.apply(
            GoalChanges {
                completed: true,
                ..GoalChanges::default()
            },
            later,
        )
        .unwrap();

        assert_eq!(g.title, "Run a marathon");
        assert_eq!(g.description.as_deref(), Some("Spring race"));
        assert!(g.completed);
        assert_eq!(g.updated_at, later);
        assert_eq!(g.created_at, t0());
    }

    #[test]
    fn completed_is_always_overwritten() {
        let mut g = goal();
        g.completed = true;
        g.apply(
            GoalChanges {
                title: Some("Run two marathons".to_string()),
                ..GoalChanges::default()
            },
            t0(),
        )
        .unwrap();
        assert!(!g.completed);
        assert_eq!(g.title, "Run two marathons");
    }

    #[test]
    fn updated_at_never_moves_backwards() {
        let mut g = goal();
        g.apply(GoalChanges::default(), t0() - Duration::hours(1)).unwrap();
        assert_eq!(g.updated_at, t0());
    }

    #[test]
    fn blank_title_is_rejected() {
        let mut g = goal();
        let err = g
            .apply(
                GoalChanges {
                    title: Some("   ".to_string()),
                    ..GoalChanges::default()
                },
                t0(),
            )
            .unwrap_err();
        assert!(matches!(err, GoalError::Validation(_)));
    }
}
