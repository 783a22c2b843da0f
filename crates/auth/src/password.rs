//! Password hashing and verification using Argon2
//!
//! Uses the argon2id variant with the crate's default parameters. Every hash
//! gets a fresh random salt and is stored as a PHC string.

use std::sync::OnceLock;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PasswordError {
    #[error("failed to hash password: {0}")]
    Hash(String),

    #[error("invalid password hash format: {0}")]
    MalformedHash(String),
}

/// Hash a password using Argon2id
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasswordError::Hash(e.to_string()))
}

/// Verify a password against a stored hash
///
/// `Ok(false)` is a mismatch; an unparseable stored hash is an error.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(hash).map_err(|e| PasswordError::MalformedHash(e.to_string()))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// Hash checked against when the account does not exist, so an unknown
/// email costs the same Argon2 work as a wrong password.
fn dummy_hash() -> Option<&'static str> {
    static DUMMY: OnceLock<Option<String>> = OnceLock::new();
    DUMMY
        .get_or_init(|| hash_password("lifegoals-unknown-account").ok())
        .as_deref()
}

/// Run a full verification against a throwaway hash. Always a mismatch.
pub fn verify_against_dummy(password: &str) {
    if let Some(hash) = dummy_hash() {
        let _ = verify_password(password, hash);
    }
}
