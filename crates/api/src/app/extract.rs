use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::Response,
    Json,
};
use serde::de::DeserializeOwned;

use crate::app::errors;

/// `Json` body extractor whose rejection uses the API's JSON error shape.
///
/// Missing fields, wrong types, bad syntax and a missing content type all
/// become `400 validation_error`.
#[derive(Debug, Clone)]
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => {
                tracing::debug!(error = %rejection.body_text(), "request body rejected");
                Err(errors::json_error(
                    StatusCode::BAD_REQUEST,
                    "validation_error",
                    rejection.body_text(),
                ))
            }
        }
    }
}
