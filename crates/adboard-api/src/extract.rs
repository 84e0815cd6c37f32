use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
};
use serde_json::Value;
use tracing::debug;

use adboard_types::schema::{Schema, ValidationError};

use crate::error::ApiError;

/// Request body checked against schema `T`.
///
/// Bodies that are not JSON, not objects, or that break a field rule are
/// rejected with a 409 before the handler runs.
pub struct Validated<T>(pub T);

impl<S, T> FromRequest<S> for Validated<T>
where
    S: Send + Sync,
    T: Schema,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload): Json<Value> = Json::from_request(req, state)
            .await
            .map_err(|e| ValidationError::invalid_json(e.body_text()))?;

        Ok(Self(T::validate(&payload)?))
    }
}

/// Reads the `{id}` route segment. A segment that is not an integer names no
/// row, so it is answered with the same 404 as an unknown id.
pub(crate) async fn path_id(parts: &mut Parts, not_found: &'static str) -> Result<i64, ApiError> {
    match Path::<i64>::from_request_parts(parts, &()).await {
        Ok(Path(id)) => Ok(id),
        Err(rejection) => {
            debug!(%rejection, "unparseable id in path");
            Err(ApiError::NotFound(not_found))
        }
    }
}
