use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use lifegoals_auth::AuthError;
use lifegoals_goals::GoalError;

pub fn auth_error_to_response(err: AuthError) -> axum::response::Response {
    match err {
        AuthError::InvalidCredentials => json_error(
            StatusCode::UNAUTHORIZED,
            "invalid_credentials",
            "invalid email or password",
        ),
        AuthError::EmailAlreadyRegistered => json_error(
            StatusCode::CONFLICT,
            "email_already_registered",
            "email is already registered",
        ),
        AuthError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        AuthError::Internal(msg) => {
            tracing::error!(error = %msg, "auth operation failed");
            internal_error()
        }
    }
}

pub fn goal_error_to_response(err: GoalError) -> axum::response::Response {
    match err {
        GoalError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "goal not found"),
        GoalError::NotOwner => json_error(
            StatusCode::FORBIDDEN,
            "forbidden",
            "not authorized to access this goal",
        ),
        GoalError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        GoalError::Storage(msg) => {
            tracing::error!(error = %msg, "goal storage failed");
            internal_error()
        }
    }
}

/// Details are logged by the caller, never returned.
pub fn internal_error() -> axum::response::Response {
    json_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        "internal_error",
        "internal server error",
    )
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
