//! Credential verification and registration.

use std::sync::Arc;

use thiserror::Error;

use lifegoals_core::{Clock, DomainError, IdGenerator, UserId};

use crate::identity::Identity;
use crate::password::{hash_password, verify_against_dummy, verify_password};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Unknown email or wrong password; deliberately indistinguishable.
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("email is already registered")]
    EmailAlreadyRegistered,

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<DomainError> for AuthError {
    fn from(value: DomainError) -> Self {
        match value {
            DomainError::Conflict(_) => AuthError::EmailAlreadyRegistered,
            other => AuthError::Internal(other.to_string()),
        }
    }
}

/// Credential store port (implemented by infra).
///
/// `save` must reject a second identity with an email that is already taken
/// by returning `DomainError::Conflict`.
pub trait CredentialStore: Send + Sync {
    fn find_by_email(&self, email: &str) -> Result<Option<Identity>, DomainError>;
    fn find_by_id(&self, id: &UserId) -> Result<Option<Identity>, DomainError>;
    fn save(&self, identity: Identity) -> Result<Identity, DomainError>;
}

/// Checks presented credentials against stored ones and registers new
/// identities.
#[derive(Clone)]
pub struct CredentialVerifier {
    store: Arc<dyn CredentialStore>,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
}

impl CredentialVerifier {
    pub fn new(store: Arc<dyn CredentialStore>, clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { store, clock, ids }
    }

    pub fn authenticate(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        let email = normalize_email(email);

        let Some(identity) = self.store.find_by_email(&email)? else {
            verify_against_dummy(password);
            return Err(AuthError::InvalidCredentials);
        };

        match verify_password(password, &identity.password_hash) {
            Ok(true) => Ok(identity),
            Ok(false) => Err(AuthError::InvalidCredentials),
            Err(e) => {
                tracing::error!(user_id = %identity.id, error = %e, "stored password hash is unusable");
                Err(AuthError::Internal(e.to_string()))
            }
        }
    }

    /// Create a new identity. The caller issues a token for the returned
    /// identity exactly as it would after a login.
    pub fn register(&self, name: &str, email: &str, password: &str) -> Result<Identity, AuthError> {
        let name = name.trim();
        let email = normalize_email(email);

        if name.is_empty() {
            return Err(AuthError::Validation("name cannot be empty".to_string()));
        }
        if email.is_empty() || !email.contains('@') {
            return Err(AuthError::Validation("invalid email format".to_string()));
        }
        if password.is_empty() {
            return Err(AuthError::Validation("password cannot be empty".to_string()));
        }

        if self.store.find_by_email(&email)?.is_some() {
            return Err(AuthError::EmailAlreadyRegistered);
        }

        let password_hash = hash_password(password).map_err(|e| AuthError::Internal(e.to_string()))?;

        let identity = Identity {
            id: UserId::from_uuid(self.ids.next_uuid()),
            email,
            name: name.to_string(),
            password_hash,
            created_at: self.clock.now(),
        };

        let saved = self.store.save(identity)?;
        tracing::info!(user_id = %saved.id, "identity registered");
        Ok(saved)
    }

    /// Resolve a token subject (an email) to its identity.
    pub fn find_by_subject(&self, subject: &str) -> Result<Option<Identity>, AuthError> {
        Ok(self.store.find_by_email(&normalize_email(subject))?)
    }

    pub fn find_by_id(&self, id: &UserId) -> Result<Option<Identity>, AuthError> {
        Ok(self.store.find_by_id(id)?)
    }
}

impl core::fmt::Debug for CredentialVerifier {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CredentialVerifier").finish_non_exhaustive()
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    use chrono::Utc;
    use lifegoals_core::{FixedClock, UuidV7Generator};

    #[derive(Default)]
    struct MapStore {
        rows: Mutex<HashMap<UserId, Identity>>,
    }

    impl CredentialStore for MapStore {
        fn find_by_email(&self, email: &str) -> Result<Option<Identity>, DomainError> {
            let rows = self.rows.lock().unwrap();
            Ok(rows.values().find(|i| i.email == email).cloned())
        }

        fn find_by_id(&self, id: &UserId) -> Result<Option<Identity>, DomainError> {
            Ok(self.rows.lock().unwrap().get(id).cloned())
        }

        fn save(&self, identity: Identity) -> Result<Identity, DomainError> {
            self.rows.lock().unwrap().insert(identity.id, identity.clone());
            Ok(identity)
        }
    }

    fn verifier() -> CredentialVerifier {
        CredentialVerifier::new(
            Arc::new(MapStore::default()),
            Arc::new(FixedClock::new(Utc::now())),
            Arc::new(UuidV7Generator),
        )
    }

    #[test]
    fn register_then_login_returns_same_identity() {
        let v = verifier();
        let ann = v.register("Ann", "ann@x.com", "pw1").unwrap();
        assert_ne!(ann.password_hash, "pw1");

        for _ in 0..2 {
            let logged_in = v.authenticate("ann@x.com", "pw1").unwrap();
            assert_eq!(logged_in.id, ann.id);
        }
    }

    #[test]
    fn wrong_password_and_unknown_email_look_the_same() {
        let v = verifier();
        v.register("Ann", "ann@x.com", "pw1").unwrap();

        assert_eq!(v.authenticate("ann@x.com", "wrong"), Err(AuthError::InvalidCredentials));
        assert_eq!(v.authenticate("nobody@x.com", "pw1"), Err(AuthError::InvalidCredentials));
    }

    #[test]
    fn duplicate_email_conflicts() {
        let v = verifier();
        v.register("Ann", "ann@x.com", "pw1").unwrap();
        assert_eq!(
            v.register("Other Ann", "  ANN@x.com ", "pw2"),
            Err(AuthError::EmailAlreadyRegistered)
        );
    }

    #[test]
    fn email_is_normalised_for_login() {
        let v = verifier();
        let ann = v.register("Ann", "Ann@X.com", "pw1").unwrap();
        assert_eq!(ann.email, "ann@x.com");
        assert_eq!(v.authenticate(" ANN@x.com", "pw1").unwrap().id, ann.id);
    }

    #[test]
    fn register_validates_input() {
        let v = verifier();
        assert!(matches!(v.register(" ", "ann@x.com", "pw1"), Err(AuthError::Validation(_))));
        assert!(matches!(v.register("Ann", "ann", "pw1"), Err(AuthError::Validation(_))));
        assert!(matches!(v.register("Ann", "ann@x.com", ""), Err(AuthError::Validation(_))));
    }

    #[test]
    fn corrupt_hash_is_internal_not_success() {
        let store = Arc::new(MapStore::default());
        store
            .save(Identity {
                id: UserId::new(),
                email: "ann@x.com".to_string(),
                name: "Ann".to_string(),
                password_hash: "pw1".to_string(),
                created_at: Utc::now(),
            })
            .unwrap();
        let v = CredentialVerifier::new(store, Arc::new(FixedClock::new(Utc::now())), Arc::new(UuidV7Generator));

        assert!(matches!(v.authenticate("ann@x.com", "pw1"), Err(AuthError::Internal(_))));
    }

    #[test]
    fn subject_resolution_uses_email() {
        let v = verifier();
        let ann = v.register("Ann", "ann@x.com", "pw1").unwrap();
        assert_eq!(v.find_by_subject("ann@x.com").unwrap().map(|i| i.id), Some(ann.id));
        assert_eq!(v.find_by_subject("bob@x.com").unwrap(), None);
        assert_eq!(v.find_by_id(&ann.id).unwrap().map(|i| i.email), Some("ann@x.com".to_string()));
    }
}
