use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use lifegoals_core::GoalId;

use crate::app::extract::ApiJson;
use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::CurrentUser;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_goals).post(create_goal))
        .route("/:id", get(get_goal).put(update_goal).delete(delete_goal))
}

pub async fn list_goals(
    Extension(services): Extension<Arc<AppServices>>,
    CurrentUser(principal): CurrentUser,
) -> axum::response::Response {
    match services.goals.list(&principal) {
        Ok(goals) => {
            let items = goals.into_iter().map(dto::GoalResponse::from).collect::<Vec<_>>();
            (StatusCode::OK, Json(items)).into_response()
        }
        Err(e) => errors::goal_error_to_response(e),
    }
}

pub async fn create_goal(
    Extension(services): Extension<Arc<AppServices>>,
    CurrentUser(principal): CurrentUser,
    ApiJson(body): ApiJson<dto::CreateGoalRequest>,
) -> axum::response::Response {
    match services.goals.create(&principal, body.into()) {
        Ok(goal) => (StatusCode::CREATED, Json(dto::GoalResponse::from(goal))).into_response(),
        Err(e) => errors::goal_error_to_response(e),
    }
}

pub async fn get_goal(
    Extension(services): Extension<Arc<AppServices>>,
    CurrentUser(principal): CurrentUser,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_goal_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.goals.get(&principal, &id) {
        Ok(goal) => (StatusCode::OK, Json(dto::GoalResponse::from(goal))).into_response(),
        Err(e) => errors::goal_error_to_response(e),
    }
}

pub async fn update_goal(
    Extension(services): Extension<Arc<AppServices>>,
    CurrentUser(principal): CurrentUser,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<dto::UpdateGoalRequest>,
) -> axum::response::Response {
    let id = match parse_goal_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.goals.update(&principal, &id, body.into()) {
        Ok(goal) => (StatusCode::OK, Json(dto::GoalResponse::from(goal))).into_response(),
        Err(e) => errors::goal_error_to_response(e),
    }
}

pub async fn delete_goal(
    Extension(services): Extension<Arc<AppServices>>,
    CurrentUser(principal): CurrentUser,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_goal_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.goals.delete(&principal, &id) {
        Ok(()) => StatusCode::OK.into_response(),
        Err(e) => errors::goal_error_to_response(e),
    }
}

fn parse_goal_id(raw: &str) -> Result<GoalId, axum::response::Response> {
    raw.parse()
        .map_err(|_| errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid goal id"))
}
