//! `/users` endpoints.

use std::sync::Arc;

use axum::{
    extract::{Json, State},
    http::StatusCode,
    routing::{get, post},
    Router,
};
use serde_json::Value;

use super::error::{deleted, ApiError, Params, Payload};
use crate::domain::{Entity, User, UserInput};
use crate::repository::EntityRepository;
use crate::state::AppState;

/// User routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users", post(create_user).get(list_users))
        .route(
            "/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
}

async fn create_user(
    State(state): State<Arc<AppState>>,
    Payload(input): Payload<UserInput>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let user = state.users().create(input).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

async fn list_users(State(state): State<Arc<AppState>>) -> Result<Json<Vec<User>>, ApiError> {
    Ok(Json(state.users().list().await?))
}

async fn get_user(
    State(state): State<Arc<AppState>>,
    Params(id): Params<i64>,
) -> Result<Json<User>, ApiError> {
    Ok(Json(state.users().get(id).await?))
}

async fn update_user(
    State(state): State<Arc<AppState>>,
    Params(id): Params<i64>,
    Payload(input): Payload<UserInput>,
) -> Result<Json<User>, ApiError> {
    Ok(Json(state.users().update(id, input).await?))
}

async fn delete_user(
    State(state): State<Arc<AppState>>,
    Params(id): Params<i64>,
) -> Result<Json<Value>, ApiError> {
    state.users().delete(id).await?;
    Ok(deleted(Entity::User))
}
