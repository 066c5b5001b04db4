//! `/tasks` endpoints and the task action sub-resource.

use std::sync::Arc;

use axum::{
    extract::{Json, State},
    http::StatusCode,
    routing::{get, post},
    Router,
};
use serde_json::Value;

use super::error::{deleted, ApiError, Params, Payload};
use crate::domain::{Entity, Task, TaskAction, TaskActionInput, TaskInput, TaskView};
use crate::repository::EntityRepository;
use crate::state::AppState;

/// Task and task action routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/tasks", post(create_task).get(list_tasks))
        .route(
            "/tasks/{id}",
            get(get_task).put(update_task).delete(delete_task),
        )
        .route(
            "/tasks/{id}/actions",
            post(record_action).get(list_actions),
        )
        .route(
            "/actions/{id}",
            get(get_action).put(update_action).delete(delete_action),
        )
}

async fn create_task(
    State(state): State<Arc<AppState>>,
    Payload(input): Payload<TaskInput>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let task = state.tasks().create(input).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

async fn list_tasks(State(state): State<Arc<AppState>>) -> Result<Json<Vec<TaskView>>, ApiError> {
    Ok(Json(state.tasks().list_with_assignees().await?))
}

async fn get_task(
    State(state): State<Arc<AppState>>,
    Params(id): Params<i64>,
) -> Result<Json<TaskView>, ApiError> {
    Ok(Json(state.tasks().get_with_assignees(id).await?))
}

async fn update_task(
    State(state): State<Arc<AppState>>,
    Params(id): Params<i64>,
    Payload(input): Payload<TaskInput>,
) -> Result<Json<Task>, ApiError> {
    Ok(Json(state.tasks().update(id, input).await?))
}

async fn delete_task(
    State(state): State<Arc<AppState>>,
    Params(id): Params<i64>,
) -> Result<Json<Value>, ApiError> {
    state.tasks().delete(id).await?;
    Ok(deleted(Entity::Task))
}

async fn record_action(
    State(state): State<Arc<AppState>>,
    Params(task_id): Params<i64>,
    Payload(input): Payload<TaskActionInput>,
) -> Result<(StatusCode, Json<TaskAction>), ApiError> {
    // the path names the task; a body taskId is ignored
    let input = TaskActionInput {
        task_id: Some(task_id),
        ..input
    };
    let action = state.actions().create(input).await?;
    Ok((StatusCode::CREATED, Json(action)))
}

async fn list_actions(
    State(state): State<Arc<AppState>>,
    Params(task_id): Params<i64>,
) -> Result<Json<Vec<TaskAction>>, ApiError> {
    state.tasks().get(task_id).await?;
    Ok(Json(state.actions().list_for_task(task_id).await?))
}

async fn get_action(
    State(state): State<Arc<AppState>>,
    Params(id): Params<i64>,
) -> Result<Json<TaskAction>, ApiError> {
    Ok(Json(state.actions().get(id).await?))
}

async fn update_action(
    State(state): State<Arc<AppState>>,
    Params(id): Params<i64>,
    Payload(input): Payload<TaskActionInput>,
) -> Result<Json<TaskAction>, ApiError> {
    Ok(Json(state.actions().update(id, input).await?))
}

async fn delete_action(
    State(state): State<Arc<AppState>>,
    Params(id): Params<i64>,
) -> Result<Json<Value>, ApiError> {
    state.actions().delete(id).await?;
    Ok(deleted(Entity::TaskAction))
}
