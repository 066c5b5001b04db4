//! `/assignments` endpoints.

use std::sync::Arc;

use axum::{
    extract::{Json, State},
    http::StatusCode,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};

use super::error::{ApiError, Params, Payload};
use crate::domain::{Assignment, AssignmentInput, TaskSummary, UserSummary};
use crate::state::AppState;

/// Assignment routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/assignments", post(assign).delete(unassign))
        .route("/assignments/task/{task_id}", get(users_for_task))
        .route("/assignments/user/{user_id}", get(tasks_for_user))
}

async fn assign(
    State(state): State<Arc<AppState>>,
    Payload(input): Payload<AssignmentInput>,
) -> Result<(StatusCode, Json<Assignment>), ApiError> {
    let assignment = state.assignments().assign(input).await?;
    Ok((StatusCode::CREATED, Json(assignment)))
}

async fn unassign(
    State(state): State<Arc<AppState>>,
    Payload(input): Payload<AssignmentInput>,
) -> Result<Json<Value>, ApiError> {
    state.assignments().unassign(input).await?;
    Ok(Json(json!({ "message": "Assignment removed successfully" })))
}

async fn users_for_task(
    State(state): State<Arc<AppState>>,
    Params(task_id): Params<i64>,
) -> Result<Json<Vec<UserSummary>>, ApiError> {
    Ok(Json(state.assignments().list_for_task(task_id).await?))
}

async fn tasks_for_user(
    State(state): State<Arc<AppState>>,
    Params(user_id): Params<i64>,
) -> Result<Json<Vec<TaskSummary>>, ApiError> {
    Ok(Json(state.assignments().list_for_user(user_id).await?))
}
