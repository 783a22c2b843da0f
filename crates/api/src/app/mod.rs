//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: stores, clock/id capabilities, domain services
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request/response DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses
//! - `extract.rs`: body extractor with JSON rejections

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::ApiConfig;
use crate::middleware;

pub mod dto;
pub mod errors;
pub mod extract;
pub mod routes;
pub mod services;

pub use services::AppServices;

/// Build the full HTTP router with in-memory stores (entrypoint used by `main.rs`).
pub fn build_app(config: ApiConfig) -> Router {
    let services = services::build_in_memory_services(&config);
    build_router(&config, services)
}

/// Build the router around pre-wired services.
///
/// The authenticator runs on every route, including `/health`; it never
/// rejects, so unauthenticated routes are unaffected.
pub fn build_router(config: &ApiConfig, services: AppServices) -> Router {
    let auth_state = services.auth_state(config);
    let services = Arc::new(services);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::system::health))
        .nest("/api", routes::router())
        .layer(Extension(services))
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            middleware::auth_middleware,
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
