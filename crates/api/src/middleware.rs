//! Request authenticator.
//!
//! A pass-through filter: it resolves a bearer token to a principal when it
//! can and forwards every request regardless. Rejection of anonymous callers
//! happens in handlers that extract [`CurrentUser`](crate::context::CurrentUser).

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, Method},
    middleware::Next,
    response::Response,
};

use lifegoals_auth::{CredentialVerifier, Principal, TokenCodec};
use lifegoals_core::Clock;

use crate::context::RequestAuth;

#[derive(Clone)]
pub struct AuthState {
    pub tokens: Arc<dyn TokenCodec>,
    pub credentials: CredentialVerifier,
    pub clock: Arc<dyn Clock>,
    pub exempt_prefix: Arc<str>,
}

/// Why a non-exempt request ended up without a principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unauthenticated {
    NoToken,
    InvalidToken,
    /// Token was authentic but its subject no longer resolves.
    UnknownSubject,
    LookupFailed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    Exempt,
    Resolved(Principal),
    Unauthenticated(Unauthenticated),
}

impl From<AuthOutcome> for RequestAuth {
    fn from(outcome: AuthOutcome) -> Self {
        match outcome {
            AuthOutcome::Resolved(principal) => RequestAuth::authenticated(principal),
            AuthOutcome::Exempt | AuthOutcome::Unauthenticated(_) => RequestAuth::anonymous(),
        }
    }
}

/// Decide the authentication outcome for one request. Never fails.
pub fn authenticate(state: &AuthState, method: &Method, path: &str, headers: &HeaderMap) -> AuthOutcome {
    if method == Method::OPTIONS {
        tracing::debug!(%path, "preflight request, skipping token validation");
        return AuthOutcome::Exempt;
    }
    if path.starts_with(&*state.exempt_prefix) {
        tracing::debug!(%path, "auth endpoint, skipping token validation");
        return AuthOutcome::Exempt;
    }

    let Some(token) = extract_bearer(headers) else {
        tracing::debug!(%path, "no bearer token on request");
        return AuthOutcome::Unauthenticated(Unauthenticated::NoToken);
    };

    let subject = match state.tokens.verify(token, state.clock.now()) {
        Ok(subject) => subject,
        Err(_) => {
            tracing::warn!(%path, "invalid or expired token");
            return AuthOutcome::Unauthenticated(Unauthenticated::InvalidToken);
        }
    };

    match state.credentials.find_by_subject(&subject) {
        Ok(Some(identity)) => {
            tracing::debug!(%path, user_id = %identity.id, "request authenticated");
            AuthOutcome::Resolved(Principal::from(&identity))
        }
        Ok(None) => {
            tracing::warn!(%path, "token subject does not resolve to an identity");
            AuthOutcome::Unauthenticated(Unauthenticated::UnknownSubject)
        }
        Err(e) => {
            tracing::error!(%path, error = %e, "identity lookup failed");
            AuthOutcome::Unauthenticated(Unauthenticated::LookupFailed)
        }
    }
}

pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let outcome = catch_unwind(AssertUnwindSafe(|| {
        authenticate(&state, req.method(), req.uri().path(), req.headers())
    }))
    .unwrap_or_else(|_| {
        tracing::error!(path = %req.uri().path(), "authenticator panicked; forwarding without identity");
        AuthOutcome::Unauthenticated(Unauthenticated::LookupFailed)
    });

    req.extensions_mut().insert(RequestAuth::from(outcome));
    next.run(req).await
}

/// `Authorization: Bearer <token>`; anything else counts as no token.
fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let header = headers.get(axum::http::header::AUTHORIZATION)?;
    let header = header.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        return None;
    }
    Some(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::http::{header::AUTHORIZATION, HeaderValue};
    use chrono::{Duration, TimeZone, Utc};
    use lifegoals_auth::{CredentialStore, Hs256TokenCodec, Identity};
    use lifegoals_core::{DomainError, FixedClock, UserId, UuidV7Generator};
    use lifegoals_infra::InMemoryUserStore;

    const SECRET: &[u8] = b"middleware-test-secret-0123456789";

    struct Fixture {
        state: AuthState,
        clock: Arc<FixedClock>,
        codec: Arc<Hs256TokenCodec>,
    }

    fn fixture_with_store(store: Arc<dyn CredentialStore>) -> Fixture {
        let clock = Arc::new(FixedClock::new(Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()));
        let codec = Arc::new(Hs256TokenCodec::new(SECRET, Duration::minutes(10)));
        let credentials = CredentialVerifier::new(store, clock.clone(), Arc::new(UuidV7Generator));
        Fixture {
            state: AuthState {
                tokens: codec.clone(),
                credentials,
                clock: clock.clone(),
                exempt_prefix: Arc::from("/api/auth/"),
            },
            clock,
            codec,
        }
    }

    fn fixture() -> Fixture {
        fixture_with_store(Arc::new(InMemoryUserStore::new()))
    }

    fn bearer(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(&format!("Bearer {token}")).unwrap());
        headers
    }

    fn token_for(f: &Fixture, subject: &str) -> String {
        f.codec.issue(subject, f.clock.now()).unwrap().token
    }

    #[test]
    fn preflight_and_auth_paths_are_exempt() {
        let f = fixture();
        let garbage = bearer("garbage");
        assert_eq!(authenticate(&f.state, &Method::OPTIONS, "/api/goals", &garbage), AuthOutcome::Exempt);
        assert_eq!(authenticate(&f.state, &Method::POST, "/api/auth/login", &garbage), AuthOutcome::Exempt);
    }

    #[test]
    fn missing_or_malformed_header_is_no_token() {
        let f = fixture();
        let mut basic = HeaderMap::new();
        basic.insert(AUTHORIZATION, HeaderValue::from_static("Basic YW5uOnB3MQ=="));

        for headers in [HeaderMap::new(), basic, bearer("")] {
            assert_eq!(
                authenticate(&f.state, &Method::GET, "/api/goals", &headers),
                AuthOutcome::Unauthenticated(Unauthenticated::NoToken)
            );
        }
    }

    #[test]
    fn valid_token_for_registered_identity_resolves() {
        let f = fixture();
        let ann = f.state.credentials.register("Ann", "ann@x.com", "pw1").unwrap();
        let token = token_for(&f, "ann@x.com");

        match authenticate(&f.state, &Method::GET, "/api/goals", &bearer(&token)) {
            AuthOutcome::Resolved(p) => {
                assert_eq!(p.user_id(), ann.id);
                assert_eq!(p.email(), "ann@x.com");
            }
            other => panic!("expected Resolved, got {other:?}"),
        }
    }

    #[test]
    fn expired_token_is_invalid() {
        let f = fixture();
        f.state.credentials.register("Ann", "ann@x.com", "pw1").unwrap();
        let token = token_for(&f, "ann@x.com");

        f.clock.advance(Duration::minutes(10));
        assert_eq!(
            authenticate(&f.state, &Method::GET, "/api/goals", &bearer(&token)),
            AuthOutcome::Unauthenticated(Unauthenticated::InvalidToken)
        );
    }

    #[test]
    fn authentic_token_for_unknown_subject_is_not_resolved() {
        let f = fixture();
        let token = token_for(&f, "ghost@x.com");
        assert_eq!(
            authenticate(&f.state, &Method::GET, "/api/goals", &bearer(&token)),
            AuthOutcome::Unauthenticated(Unauthenticated::UnknownSubject)
        );
    }

    struct BrokenStore;

    impl CredentialStore for BrokenStore {
        fn find_by_email(&self, _email: &str) -> Result<Option<Identity>, DomainError> {
            Err(DomainError::storage("connection refused"))
        }

        fn find_by_id(&self, _id: &UserId) -> Result<Option<Identity>, DomainError> {
            Err(DomainError::storage("connection refused"))
        }

        fn save(&self, _identity: Identity) -> Result<Identity, DomainError> {
            Err(DomainError::storage("connection refused"))
        }
    }

    #[test]
    fn store_failure_is_absorbed() {
        let f = fixture_with_store(Arc::new(BrokenStore));
        let token = token_for(&f, "ann@x.com");
        assert_eq!(
            authenticate(&f.state, &Method::GET, "/api/goals", &bearer(&token)),
            AuthOutcome::Unauthenticated(Unauthenticated::LookupFailed)
        );
    }

    #[test]
    fn only_resolved_outcomes_carry_a_principal() {
        let principal = Principal::new(UserId::new(), "ann@x.com");
        assert_eq!(
            RequestAuth::from(AuthOutcome::Resolved(principal.clone())).principal(),
            Some(&principal)
        );
        assert_eq!(RequestAuth::from(AuthOutcome::Exempt).principal(), None);
        assert_eq!(
            RequestAuth::from(AuthOutcome::Unauthenticated(Unauthenticated::InvalidToken)).principal(),
            None
        );
    }
}
