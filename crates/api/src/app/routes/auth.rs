use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};

use lifegoals_auth::{AuthError, Identity};

use crate::app::extract::ApiJson;
use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/login", post(login))
        .route("/register", post(register))
}

/// POST /api/auth/login
#[tracing::instrument(skip_all)]
pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    ApiJson(body): ApiJson<dto::LoginRequest>,
) -> axum::response::Response {
    let credentials = services.credentials.clone();
    let result = run_blocking(move || credentials.authenticate(&body.email, &body.password)).await;

    match result {
        Ok(identity) => issue_session(&services, &identity),
        Err(e) => errors::auth_error_to_response(e),
    }
}

/// POST /api/auth/register
///
/// A successful registration is followed by the same token issuance as a
/// login.
#[tracing::instrument(skip_all)]
pub async fn register(
    Extension(services): Extension<Arc<AppServices>>,
    ApiJson(body): ApiJson<dto::RegisterRequest>,
) -> axum::response::Response {
    let credentials = services.credentials.clone();
    let result =
        run_blocking(move || credentials.register(&body.name, &body.email, &body.password)).await;

    match result {
        Ok(identity) => issue_session(&services, &identity),
        Err(e) => errors::auth_error_to_response(e),
    }
}

fn issue_session(services: &AppServices, identity: &Identity) -> axum::response::Response {
    match services.tokens.issue(&identity.email, services.clock.now()) {
        Ok(issued) => (
            StatusCode::OK,
            Json(dto::AuthResponse {
                token: issued.token,
                user: identity.view(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(user_id = %identity.id, error = %e, "failed to issue token");
            errors::internal_error()
        }
    }
}

/// Password hashing is CPU-bound; keep it off the async workers.
async fn run_blocking<F>(f: F) -> Result<Identity, AuthError>
where
    F: FnOnce() -> Result<Identity, AuthError> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .unwrap_or_else(|e| Err(AuthError::Internal(format!("credential task failed: {e}"))))
}
