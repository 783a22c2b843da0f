//! Registered identities and their client-safe projection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use lifegoals_core::{Entity, UserId};

/// A stored identity.
///
/// `password_hash` is an Argon2 PHC string. It never leaves this type: the
/// only serializable representation is [`IdentityView`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: UserId,
    /// Unique, normalised (trimmed + lowercase). Used as the token subject.
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl Identity {
    pub fn view(&self) -> IdentityView {
        IdentityView {
            id: self.id,
            email: self.email.clone(),
            name: self.name.clone(),
            created_at: self.created_at,
        }
    }
}

impl Entity for Identity {
    type Id = UserId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// User model safe for client responses (no password hash).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityView {
    pub id: UserId,
    pub email: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}
