//! REST API for the task board.
//!
//! Every resource module exposes a `routes()` router over the shared
//! [`AppState`]; [`routes`] merges them. Bodies and path parameters are
//! decoded through [`Payload`] and [`Params`] so that malformed requests
//! get the same JSON error body as domain failures.

pub mod assignments;
pub mod boards;
pub mod error;
pub mod tasks;
pub mod users;
pub mod workspaces;

use std::sync::Arc;

use axum::Router;

pub use error::{ApiError, Params, Payload};

use crate::state::AppState;

/// All resource routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .merge(users::routes())
        .merge(workspaces::routes())
        .merge(boards::routes())
        .merge(tasks::routes())
        .merge(assignments::routes())
}
