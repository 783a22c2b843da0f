use thiserror::Error;

use lifegoals_core::UserId;

use crate::Principal;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("forbidden: resource is owned by another user")]
    NotOwner,
}

/// A resource with exactly one owning identity.
pub trait Owned {
    fn owner_id(&self) -> UserId;
}

/// Ownership check applied before any mutation or deletion.
///
/// - No IO
/// - No panics
/// - No business logic (pure policy check)
pub fn assert_ownership<R: Owned + ?Sized>(resource: &R, principal: &Principal) -> Result<(), AuthzError> {
    if resource.owner_id() != principal.user_id() {
        return Err(AuthzError::NotOwner);
    }
    Ok(())
}
