use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Claims carried inside a session token.
///
/// Timestamps are Unix seconds so the payload stays interoperable with any
/// standard JWT consumer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject: the identity's email.
    pub sub: String,

    /// Issued-at timestamp.
    pub iat: i64,

    /// Expiration timestamp.
    pub exp: i64,
}

impl TokenClaims {
    pub fn new(sub: impl Into<String>, issued_at: DateTime<Utc>, validity: Duration) -> Self {
        let iat = issued_at.timestamp();
        Self {
            sub: sub.into(),
            iat,
            exp: iat + validity.num_seconds(),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenValidationError {
    #[error("token has expired")]
    Expired,

    #[error("invalid token time window (exp <= iat)")]
    InvalidTimeWindow,
}

/// Deterministically validate token claims.
///
/// Note: this validates the *claims* only. Signature verification happens in
/// the codec before this is called.
pub fn validate_claims(claims: &TokenClaims, now: DateTime<Utc>) -> Result<(), TokenValidationError> {
    if claims.exp <= claims.iat {
        return Err(TokenValidationError::InvalidTimeWindow);
    }
    if now.timestamp() >= claims.exp {
        return Err(TokenValidationError::Expired);
    }
    Ok(())
}
