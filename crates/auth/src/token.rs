//! Signed, time-bounded session tokens (HS256 JWS).
//!
//! Tokens are never stored server-side: validity is fully determined by the
//! signature and the embedded expiry at verification time.

use chrono::{DateTime, Duration, TimeZone, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;

use crate::claims::{validate_claims, TokenClaims};

/// Collapsed verification failure.
///
/// Expired, malformed, wrongly signed and undecodable tokens are all reported
/// as this single value so callers cannot be used as an oracle.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("invalid or expired token")]
pub struct InvalidToken;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("failed to encode token: {0}")]
    Encode(String),
}

/// A freshly minted token plus its expiry, as handed to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Token issuing/verification contract.
///
/// Implementations must be pure: the result depends only on the token, the
/// supplied `now`, and the key material held by the codec.
pub trait TokenCodec: Send + Sync {
    fn issue(&self, subject: &str, now: DateTime<Utc>) -> Result<IssuedToken, TokenError>;

    /// Returns the embedded subject when the token is authentic and unexpired.
    fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<String, InvalidToken>;
}

/// HMAC-SHA256 signed JWT codec with a fixed validity window.
#[derive(Clone)]
pub struct Hs256TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    validity: Duration,
}

impl Hs256TokenCodec {
    pub fn new(secret: &[u8], validity: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked against the caller's clock in `validate_claims`.
        validation.validate_exp = false;
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            validity,
        }
    }
}

impl core::fmt::Debug for Hs256TokenCodec {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Hs256TokenCodec")
            .field("validity", &self.validity)
            .finish_non_exhaustive()
    }
}

impl TokenCodec for Hs256TokenCodec {
    fn issue(&self, subject: &str, now: DateTime<Utc>) -> Result<IssuedToken, TokenError> {
        let claims = TokenClaims::new(subject, now, self.validity);
        let expires_at = Utc
            .timestamp_opt(claims.exp, 0)
            .single()
            .ok_or_else(|| TokenError::Encode("expiry out of range".to_string()))?;

        let token = jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| TokenError::Encode(e.to_string()))?;

        Ok(IssuedToken { token, expires_at })
    }

    fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<String, InvalidToken> {
        let data = jsonwebtoken::decode::<TokenClaims>(token, &self.decoding, &self.validation)
            .map_err(|e| {
                tracing::debug!(error = %e, "token rejected during decode");
                InvalidToken
            })?;

        validate_claims(&data.claims, now).map_err(|e| {
            tracing::debug!(error = %e, "token rejected by claim validation");
            InvalidToken
        })?;

        Ok(data.claims.sub)
    }
}
