use lifegoals_core::UserId;

use crate::identity::Identity;

/// The authenticated identity acting on a request.
///
/// Built once per request from a verified token and passed explicitly to
/// every operation that needs to know who is acting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    user_id: UserId,
    email: String,
}

impl Principal {
    pub fn new(user_id: UserId, email: impl Into<String>) -> Self {
        Self {
            user_id,
            email: email.into(),
        }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

impl From<&Identity> for Principal {
    fn from(identity: &Identity) -> Self {
        Self::new(identity.id, identity.email.clone())
    }
}
