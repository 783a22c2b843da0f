//! Process configuration, read from the environment.

use std::net::SocketAddr;

use anyhow::{bail, Context, Result};
use chrono::{Duration, Utc};

const DEV_SECRET: &str = "dev-secret-change-me";
const MIN_SECRET_BYTES: usize = 32;
const DEFAULT_TOKEN_VALIDITY_SECS: i64 = 86_400;

#[derive(Clone)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    /// HS256 signing secret. Never logged.
    pub jwt_secret: String,
    pub token_validity: Duration,
    /// Requests under this path skip token processing (login/registration).
    pub auth_exempt_prefix: String,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (the environment in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr = lookup("LIFEGOALS_BIND_ADDR")
            .unwrap_or_else(|| "0.0.0.0:8080".to_string())
            .parse::<SocketAddr>()
            .context("LIFEGOALS_BIND_ADDR must be a socket address")?;

        let jwt_secret = lookup("JWT_SECRET").unwrap_or_else(|| {
            tracing::warn!("JWT_SECRET not set; using insecure dev default");
            DEV_SECRET.to_string()
        });
        if jwt_secret.len() < MIN_SECRET_BYTES {
            tracing::warn!(
                min_bytes = MIN_SECRET_BYTES,
                "JWT_SECRET is shorter than 256 bits"
            );
        }

        let token_validity = match lookup("JWT_EXPIRATION_SECS") {
            Some(raw) => {
                let secs: i64 = raw
                    .trim()
                    .parse()
                    .context("JWT_EXPIRATION_SECS must be an integer")?;
                if secs <= 0 {
                    bail!("JWT_EXPIRATION_SECS must be positive, got {secs}");
                }
                let validity = Duration::try_seconds(secs)
                    .with_context(|| format!("JWT_EXPIRATION_SECS out of range: {secs}"))?;
                // Every issued token's expiry must be a representable timestamp.
                if Utc::now().checked_add_signed(validity).is_none() {
                    bail!("JWT_EXPIRATION_SECS too large: {secs}");
                }
                validity
            }
            None => Duration::seconds(DEFAULT_TOKEN_VALIDITY_SECS),
        };

        let auth_exempt_prefix =
            lookup("LIFEGOALS_AUTH_EXEMPT_PREFIX").unwrap_or_else(|| "/api/auth/".to_string());

        Ok(Self {
            bind_addr,
            jwt_secret,
            token_validity,
            auth_exempt_prefix,
        })
    }

    pub fn for_tests(jwt_secret: &str) -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            jwt_secret: jwt_secret.to_string(),
            token_validity: Duration::minutes(10),
            auth_exempt_prefix: "/api/auth/".to_string(),
        }
    }
}

impl core::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("bind_addr", &self.bind_addr)
            .field("jwt_secret", &"<redacted>")
            .field("token_validity", &self.token_validity)
            .field("auth_exempt_prefix", &self.auth_exempt_prefix)
            .finish()
    }
}
