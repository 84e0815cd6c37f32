use axum::{Json, extract::FromRequestParts, http::request::Parts};
use tracing::{info, warn};

use adboard_crypto::hash_password;
use adboard_db::models::{UserChanges, UserRow};
use adboard_db::{DbError, queries};
use adboard_types::api::{CreateUser, StatusResponse, UpdateUser};
use adboard_types::models::User;

use crate::error::ApiError;
use crate::extract::{Validated, path_id};
use crate::parse_timestamp;
use crate::session::RequestSession;

const NOT_FOUND: &str = "user not found";
const DUPLICATE: &str = "user already exists";

/// The `{id}` segment of a user route.
pub struct UserId(pub i64);

impl<S: Send + Sync> FromRequestParts<S> for UserId {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        path_id(parts, NOT_FOUND).await.map(Self)
    }
}

pub async fn get_user(
    UserId(id): UserId,
    session: RequestSession,
) -> Result<Json<User>, ApiError> {
    let row = session
        .run(move |s| s.read(|tx| find_user(tx, id)))
        .await?;

    Ok(Json(user_response(row)))
}

pub async fn create_user(
    session: RequestSession,
    Validated(req): Validated<CreateUser>,
) -> Result<Json<User>, ApiError> {
    let row = session
        .run(move |s| {
            let password_hash = hash(&req.password)?;
            s.transaction(|tx| {
                queries::insert_user(tx, &req.name, &password_hash)
                    .map_err(|e| ApiError::from_write(e, DUPLICATE))
            })
        })
        .await?;

    info!(user_id = row.id, "user created");
    Ok(Json(user_response(row)))
}

pub async fn update_user(
    UserId(id): UserId,
    session: RequestSession,
    Validated(req): Validated<UpdateUser>,
) -> Result<Json<User>, ApiError> {
    let row = session
        .run(move |s| {
            let changes = UserChanges {
                password_hash: req.password.as_deref().map(hash).transpose()?,
                name: req.name,
            };

            s.transaction(|tx| {
                let mut user = find_user(tx, id)?;
                user.merge(changes);
                queries::update_user(tx, &user).map_err(|e| ApiError::from_write(e, DUPLICATE))?;
                Ok(user)
            })
        })
        .await?;

    info!(user_id = id, "user updated");
    Ok(Json(user_response(row)))
}

pub async fn delete_user(
    UserId(id): UserId,
    session: RequestSession,
) -> Result<Json<StatusResponse>, ApiError> {
    session
        .run(move |s| {
            s.transaction(|tx| {
                let user = find_user(tx, id)?;
                queries::delete_user(tx, user.id).map_err(|e| match e {
                    DbError::Constraint(detail) => {
                        warn!(user_id = id, %detail, "delete blocked by owned advertisements");
                        ApiError::Conflict("user still owns advertisements".into())
                    }
                    other => other.into(),
                })
            })
        })
        .await?;

    info!(user_id = id, "user deleted");
    Ok(Json(StatusResponse::deleted()))
}

fn find_user(conn: &rusqlite::Connection, id: i64) -> Result<UserRow, ApiError> {
    queries::get_user(conn, id)?.ok_or(ApiError::NotFound(NOT_FOUND))
}

fn hash(password: &str) -> Result<String, ApiError> {
    hash_password(password).map_err(|e| ApiError::Internal(e.to_string()))
}

fn user_response(row: UserRow) -> User {
    User {
        registration_time: parse_timestamp(&row.registration_time),
        id: row.id,
        name: row.name,
    }
}
