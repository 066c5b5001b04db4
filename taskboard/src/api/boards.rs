//! `/boards` endpoints, including the column sub-resource.

use std::sync::Arc;

use axum::{
    extract::{Json, State},
    http::StatusCode,
    routing::{get, patch, post},
    Router,
};
use serde::Serialize;
use serde_json::Value;

use super::error::{deleted, ApiError, Params, Payload};
use crate::domain::{
    Board, BoardDetail, BoardInput, Column, ColumnInput, ColumnRename, ColumnUpdate, Entity,
};
use crate::repository::EntityRepository;
use crate::state::AppState;

/// Result of a column reorder batch.
#[derive(Debug, Clone, Serialize)]
pub struct ReorderResponse {
    /// Confirmation text.
    pub message: String,
    /// Rows changed by the batch.
    pub changes: u64,
}

/// Board and column routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/boards", post(create_board).get(list_boards))
        .route(
            "/boards/{id}",
            get(board_detail).put(update_board).delete(delete_board),
        )
        .route(
            "/boards/{id}/columns",
            post(create_column).put(reorder_columns),
        )
        .route(
            "/boards/{id}/columns/{column_id}",
            patch(rename_column).delete(delete_column),
        )
}

async fn create_board(
    State(state): State<Arc<AppState>>,
    Payload(input): Payload<BoardInput>,
) -> Result<(StatusCode, Json<Board>), ApiError> {
    let board = state.boards().create(input).await?;
    Ok((StatusCode::CREATED, Json(board)))
}

async fn list_boards(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Board>>, ApiError> {
    Ok(Json(state.boards().list().await?))
}

async fn board_detail(
    State(state): State<Arc<AppState>>,
    Params(id): Params<i64>,
) -> Result<Json<BoardDetail>, ApiError> {
    Ok(Json(state.assembler().board_detail(id).await?))
}

async fn update_board(
    State(state): State<Arc<AppState>>,
    Params(id): Params<i64>,
    Payload(input): Payload<BoardInput>,
) -> Result<Json<Board>, ApiError> {
    Ok(Json(state.boards().update(id, input).await?))
}

async fn delete_board(
    State(state): State<Arc<AppState>>,
    Params(id): Params<i64>,
) -> Result<Json<Value>, ApiError> {
    state.boards().delete(id).await?;
    Ok(deleted(Entity::Board))
}

async fn create_column(
    State(state): State<Arc<AppState>>,
    Params(board_id): Params<i64>,
    Payload(input): Payload<ColumnInput>,
) -> Result<(StatusCode, Json<Column>), ApiError> {
    let input = ColumnInput {
        board_id: Some(board_id),
        ..input
    };
    let column = state.columns().create(input).await?;
    Ok((StatusCode::CREATED, Json(column)))
}

async fn reorder_columns(
    State(state): State<Arc<AppState>>,
    Params(board_id): Params<i64>,
    Payload(updates): Payload<Vec<ColumnUpdate>>,
) -> Result<Json<ReorderResponse>, ApiError> {
    let changes = state.columns().reorder(board_id, &updates).await?;
    Ok(Json(ReorderResponse {
        message: "Columns updated successfully".into(),
        changes,
    }))
}

async fn rename_column(
    State(state): State<Arc<AppState>>,
    Params((board_id, column_id)): Params<(i64, i64)>,
    Payload(rename): Payload<ColumnRename>,
) -> Result<Json<Column>, ApiError> {
    Ok(Json(
        state.columns().rename(board_id, column_id, rename).await?,
    ))
}

async fn delete_column(
    State(state): State<Arc<AppState>>,
    Params((board_id, column_id)): Params<(i64, i64)>,
) -> Result<Json<Value>, ApiError> {
    state.columns().delete_in_board(board_id, column_id).await?;
    Ok(deleted(Entity::Column))
}
