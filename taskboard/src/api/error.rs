//! HTTP error mapping and request extractors that report failures as JSON.

use axum::{
    extract::{FromRequest, FromRequestParts, Json, Path, Request},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{debug, error};

use crate::domain::Entity;
use crate::store::StoreError;

/// API errors.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Error raised by a repository or the assembler.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// The body or a path parameter could not be decoded.
    #[error("{0}")]
    BadRequest(String),
}

impl ApiError {
    /// Stable snake-case kind reported in the error body.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Store(err) => err.kind(),
            Self::BadRequest(_) => "invalid_input",
        }
    }

    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Store(StoreError::NotFound { .. } | StoreError::NoColumnsUpdated { .. }) => {
                StatusCode::NOT_FOUND
            }
            Self::Store(StoreError::Referential(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Store(StoreError::Constraint(_)) => StatusCode::CONFLICT,
            Self::Store(StoreError::InvalidInput(_)) | Self::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Store(StoreError::Storage(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let kind = self.kind();
        let message = self.to_string();

        if status.is_server_error() {
            error!(error = ?self, kind, "Request failed");
        } else {
            debug!(%message, kind, "Request rejected");
        }
        metrics::counter!("taskboard_api_errors_total", "kind" => kind).increment(1);

        (status, Json(json!({ "error": message, "kind": kind }))).into_response()
    }
}

/// JSON body extractor whose rejection is an [`ApiError`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Payload<T>(pub T);

impl<S, T> FromRequest<S> for Payload<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(ApiError::BadRequest(rejection.body_text())),
        }
    }
}

/// Path parameter extractor whose rejection is an [`ApiError`].
#[derive(Debug, Clone, Copy)]
pub struct Params<T>(pub T);

impl<S, T> FromRequestParts<S> for Params<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(Self(value)),
            Err(rejection) => Err(ApiError::BadRequest(rejection.body_text())),
        }
    }
}

/// Confirmation body returned by delete endpoints.
pub(crate) fn deleted(entity: Entity) -> Json<Value> {
    Json(json!({ "message": format!("{entity} deleted successfully") }))
}
