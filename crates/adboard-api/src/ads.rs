use axum::{Json, extract::FromRequestParts, http::request::Parts};
use rusqlite::Connection;
use tracing::info;

use adboard_db::models::{AdChanges, AdRow};
use adboard_db::queries;
use adboard_types::api::{CreateAd, StatusResponse, UpdateAd};
use adboard_types::models::Advertisement;

use crate::error::ApiError;
use crate::extract::{Validated, path_id};
use crate::parse_timestamp;
use crate::session::RequestSession;

const NOT_FOUND: &str = "ad not found";
const DUPLICATE: &str = "ad already exists";
const UNKNOWN_OWNER: &str = "owner not found";

/// The `{id}` segment of an advertisement route.
pub struct AdId(pub i64);

impl<S: Send + Sync> FromRequestParts<S> for AdId {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        path_id(parts, NOT_FOUND).await.map(Self)
    }
}

pub async fn get_ad(
    AdId(id): AdId,
    session: RequestSession,
) -> Result<Json<Advertisement>, ApiError> {
    let row = session
        .run(move |s| s.read(|tx| find_ad(tx, id)))
        .await?;

    Ok(Json(ad_response(row)))
}

pub async fn create_ad(
    session: RequestSession,
    Validated(req): Validated<CreateAd>,
) -> Result<Json<Advertisement>, ApiError> {
    let row = session
        .run(move |s| {
            s.transaction(|tx| {
                require_owner(tx, req.owner_id)?;
                queries::insert_ad(tx, &req.title, req.description.as_deref(), req.owner_id)
                    .map_err(|e| ApiError::from_write(e, DUPLICATE))
            })
        })
        .await?;

    info!(ad_id = row.id, owner_id = row.owner_id, "ad created");
    Ok(Json(ad_response(row)))
}

pub async fn update_ad(
    AdId(id): AdId,
    session: RequestSession,
    Validated(req): Validated<UpdateAd>,
) -> Result<Json<Advertisement>, ApiError> {
    let row = session
        .run(move |s| {
            s.transaction(|tx| {
                let mut ad = find_ad(tx, id)?;
                if let Some(owner_id) = req.owner_id {
                    require_owner(tx, owner_id)?;
                }

                ad.merge(AdChanges {
                    title: req.title,
                    description: req.description,
                    owner_id: req.owner_id,
                });
                queries::update_ad(tx, &ad).map_err(|e| ApiError::from_write(e, DUPLICATE))?;
                Ok(ad)
            })
        })
        .await?;

    info!(ad_id = id, "ad updated");
    Ok(Json(ad_response(row)))
}

pub async fn delete_ad(
    AdId(id): AdId,
    session: RequestSession,
) -> Result<Json<StatusResponse>, ApiError> {
    session
        .run(move |s| {
            s.transaction(|tx| {
                let ad = find_ad(tx, id)?;
                queries::delete_ad(tx, ad.id).map_err(ApiError::from)
            })
        })
        .await?;

    info!(ad_id = id, "ad deleted");
    Ok(Json(StatusResponse::deleted()))
}

fn find_ad(conn: &Connection, id: i64) -> Result<AdRow, ApiError> {
    queries::get_ad(conn, id)?.ok_or(ApiError::NotFound(NOT_FOUND))
}

// Mirrors the owner_id foreign key with a readable error.
fn require_owner(conn: &Connection, owner_id: i64) -> Result<(), ApiError> {
    if queries::user_exists(conn, owner_id)? {
        Ok(())
    } else {
        Err(ApiError::Conflict(UNKNOWN_OWNER.to_string()))
    }
}

fn ad_response(row: AdRow) -> Advertisement {
    Advertisement {
        creation_time: parse_timestamp(&row.creation_time),
        id: row.id,
        owner_id: row.owner_id,
        title: row.title,
        description: row.description,
    }
}
