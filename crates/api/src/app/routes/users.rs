use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use crate::app::errors;
use crate::app::services::AppServices;
use crate::context::CurrentUser;

pub fn router() -> Router {
    Router::new().route("/me", get(me))
}

/// GET /api/users/me
pub async fn me(
    Extension(services): Extension<Arc<AppServices>>,
    CurrentUser(principal): CurrentUser,
) -> axum::response::Response {
    match services.credentials.find_by_id(&principal.user_id()) {
        Ok(Some(identity)) => (StatusCode::OK, Json(identity.view())).into_response(),
        Ok(None) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "user not found"),
        Err(e) => errors::auth_error_to_response(e),
    }
}
