use axum::Router;

pub mod auth;
pub mod goals;
pub mod system;
pub mod users;

/// Router for everything under `/api`.
///
/// `/auth` is exempt from token processing; the other areas require a
/// principal and reject anonymous callers in their handlers.
pub fn router() -> Router {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/goals", goals::router())
        .nest("/users", users::router())
}
