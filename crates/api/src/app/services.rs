//! Service wiring: stores, capabilities, and the domain services built on them.

use std::sync::Arc;

use lifegoals_auth::{CredentialStore, CredentialVerifier, Hs256TokenCodec, TokenCodec};
use lifegoals_core::{Clock, IdGenerator, SystemClock, UuidV7Generator};
use lifegoals_goals::{GoalService, GoalStore};
use lifegoals_infra::{InMemoryGoalStore, InMemoryUserStore};

use crate::config::ApiConfig;
use crate::middleware::AuthState;

/// Everything a handler needs, shared read-only across requests.
#[derive(Clone)]
pub struct AppServices {
    pub credentials: CredentialVerifier,
    pub goals: GoalService,
    pub tokens: Arc<dyn TokenCodec>,
    pub clock: Arc<dyn Clock>,
}

impl AppServices {
    pub fn new(
        config: &ApiConfig,
        users: Arc<dyn CredentialStore>,
        goals: Arc<dyn GoalStore>,
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        let tokens: Arc<dyn TokenCodec> = Arc::new(Hs256TokenCodec::new(
            config.jwt_secret.as_bytes(),
            config.token_validity,
        ));

        Self {
            credentials: CredentialVerifier::new(users, clock.clone(), ids.clone()),
            goals: GoalService::new(goals, clock.clone(), ids),
            tokens,
            clock,
        }
    }

    pub fn auth_state(&self, config: &ApiConfig) -> AuthState {
        AuthState {
            tokens: self.tokens.clone(),
            credentials: self.credentials.clone(),
            clock: self.clock.clone(),
            exempt_prefix: Arc::from(config.auth_exempt_prefix.as_str()),
        }
    }
}

/// In-memory stores with wall-clock time and UUIDv7 ids.
pub fn build_in_memory_services(config: &ApiConfig) -> AppServices {
    AppServices::new(
        config,
        Arc::new(InMemoryUserStore::new()),
        Arc::new(InMemoryGoalStore::new()),
        Arc::new(SystemClock),
        Arc::new(UuidV7Generator),
    )
}
