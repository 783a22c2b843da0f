use serde::{Deserialize, Serialize};

use lifegoals_auth::IdentityView;
use lifegoals_goals::{Goal, GoalChanges, NewGoal};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// A missing title deserializes as empty and is rejected by validation.
#[derive(Debug, Deserialize)]
pub struct CreateGoalRequest {
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

impl From<CreateGoalRequest> for NewGoal {
    fn from(body: CreateGoalRequest) -> Self {
        NewGoal {
            title: body.title,
            description: body.description,
            completed: body.completed.unwrap_or(false),
        }
    }
}

/// `completed` is always applied; omitting it means `false`.
#[derive(Debug, Deserialize)]
pub struct UpdateGoalRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

impl From<UpdateGoalRequest> for GoalChanges {
    fn from(body: UpdateGoalRequest) -> Self {
        GoalChanges {
            title: body.title,
            description: body.description,
            completed: body.completed,
        }
    }
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: IdentityView,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalResponse {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub created_at: String,
    pub updated_at: String,
    pub user_id: String,
}

impl From<Goal> for GoalResponse {
    fn from(goal: Goal) -> Self {
        GoalResponse {
            id: goal.id.to_string(),
            title: goal.title,
            description: goal.description,
            completed: goal.completed,
            created_at: goal.created_at.to_rfc3339(),
            updated_at: goal.updated_at.to_rfc3339(),
            user_id: goal.owner_id.to_string(),
        }
    }
}
