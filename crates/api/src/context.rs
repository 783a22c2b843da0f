use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    response::Response,
};

use lifegoals_auth::Principal;

use crate::app::errors;

/// Per-request authentication context.
///
/// Inserted by the authenticator middleware on every request, with or
/// without a principal. Handlers read it through [`CurrentUser`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestAuth {
    principal: Option<Principal>,
}

impl RequestAuth {
    pub fn anonymous() -> Self {
        Self { principal: None }
    }

    pub fn authenticated(principal: Principal) -> Self {
        Self {
            principal: Some(principal),
        }
    }

    pub fn principal(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }
}

/// Extractor for handlers that require an authenticated principal.
///
/// This is where a request without a resolved identity is finally rejected.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Principal);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<RequestAuth>().and_then(|a| a.principal()) {
            Some(principal) => Ok(CurrentUser(principal.clone())),
            None => Err(errors::json_error(
                StatusCode::UNAUTHORIZED,
                "unauthenticated",
                "authentication required",
            )),
        }
    }
}
