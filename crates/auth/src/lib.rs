//! `lifegoals-auth` — stateless session and ownership authorization.
//!
//! This crate is intentionally decoupled from HTTP and storage: credential
//! lookups go through the `CredentialStore` port and time is always passed in.

pub mod authorize;
pub mod claims;
pub mod credentials;
pub mod identity;
pub mod password;
pub mod principal;
pub mod token;

pub use authorize::{assert_ownership, AuthzError, Owned};
pub use claims::{validate_claims, TokenClaims, TokenValidationError};
pub use credentials::{AuthError, CredentialStore, CredentialVerifier};
pub use identity::{Identity, IdentityView};
pub use password::{hash_password, verify_password, PasswordError};
pub use principal::Principal;
pub use token::{Hs256TokenCodec, InvalidToken, IssuedToken, TokenCodec, TokenError};
