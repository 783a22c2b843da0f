use lifegoals_auth::{CredentialStore, Identity};
use lifegoals_core::{DomainError, UserId};

use super::RecordMap;

/// In-memory credential store for tests/dev.
///
/// Emails are unique: `save` of a different identity with a taken email is a
/// `DomainError::Conflict`. Re-saving the same identity is an update.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    rows: RecordMap<Identity>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for InMemoryUserStore {
    fn find_by_email(&self, email: &str) -> Result<Option<Identity>, DomainError> {
        let rows = self.rows.read()?;
        Ok(rows.values().find(|i| i.email == email).cloned())
    }

    fn find_by_id(&self, id: &UserId) -> Result<Option<Identity>, DomainError> {
        self.rows.get(id)
    }

    fn save(&self, identity: Identity) -> Result<Identity, DomainError> {
        // Uniqueness check and insert happen under one write lock.
        let mut rows = self.rows.write()?;
        if rows
            .values()
            .any(|existing| existing.email == identity.email && existing.id != identity.id)
        {
            return Err(DomainError::conflict(format!("email {} already registered", identity.email)));
        }
        rows.insert(identity.id, identity.clone());
        Ok(identity)
    }
}
