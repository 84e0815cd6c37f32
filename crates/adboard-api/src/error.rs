use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

use adboard_db::DbError;
use adboard_types::schema::ValidationError;

/// Returned for constraint failures no handler gave a message for.
const CONSTRAINT_FALLBACK: &str = "request conflicts with stored data";

/// Every failure a handler can surface, with its HTTP mapping.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Payload rejected before touching storage. 409.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Unknown primary key. 404.
    #[error("{0}")]
    NotFound(&'static str),

    /// Uniqueness or referential rule broken. 400.
    #[error("{0}")]
    Conflict(String),

    /// Anything else. Details are logged, never returned. 500.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Maps a failed write: constraint violations become `Conflict(message)`.
    pub fn from_write(err: DbError, message: &str) -> Self {
        match err {
            DbError::Constraint(detail) => {
                warn!(%detail, "write rejected by constraint");
                ApiError::Conflict(message.to_string())
            }
            other => other.into(),
        }
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Constraint(detail) => {
                warn!(%detail, "write rejected by constraint");
                ApiError::Conflict(CONSTRAINT_FALLBACK.to_string())
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Validation(err) => (StatusCode::CONFLICT, json!({ "error": err })),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, json!({ "error": msg })),
            ApiError::Conflict(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            ApiError::Internal(msg) => {
                error!("internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "internal server error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
