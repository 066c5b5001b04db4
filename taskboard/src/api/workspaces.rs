//! `/workspaces` endpoints.

use std::sync::Arc;

use axum::{
    extract::{Json, State},
    http::StatusCode,
    routing::{get, post},
    Router,
};
use serde_json::Value;

use super::error::{deleted, ApiError, Params, Payload};
use crate::domain::{Entity, Workspace, WorkspaceDetail, WorkspaceInput};
use crate::repository::EntityRepository;
use crate::state::AppState;

/// Workspace routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/workspaces", post(create_workspace).get(list_workspaces))
        .route(
            "/workspaces/{id}",
            get(workspace_detail)
                .put(update_workspace)
                .delete(delete_workspace),
        )
}

async fn create_workspace(
    State(state): State<Arc<AppState>>,
    Payload(input): Payload<WorkspaceInput>,
) -> Result<(StatusCode, Json<Workspace>), ApiError> {
    let workspace = state.workspaces().create(input).await?;
    Ok((StatusCode::CREATED, Json(workspace)))
}

async fn list_workspaces(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Workspace>>, ApiError> {
    Ok(Json(state.workspaces().list().await?))
}

async fn workspace_detail(
    State(state): State<Arc<AppState>>,
    Params(id): Params<i64>,
) -> Result<Json<WorkspaceDetail>, ApiError> {
    Ok(Json(state.assembler().workspace_detail(id).await?))
}

async fn update_workspace(
    State(state): State<Arc<AppState>>,
    Params(id): Params<i64>,
    Payload(input): Payload<WorkspaceInput>,
) -> Result<Json<Workspace>, ApiError> {
    Ok(Json(state.workspaces().update(id, input).await?))
}

async fn delete_workspace(
    State(state): State<Arc<AppState>>,
    Params(id): Params<i64>,
) -> Result<Json<Value>, ApiError> {
    state.workspaces().delete(id).await?;
    Ok(deleted(Entity::Workspace))
}
