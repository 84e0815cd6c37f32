//! HTTP surface for Adboard: users and advertisements.

pub mod ads;
pub mod error;
pub mod extract;
pub mod session;
pub mod users;

use std::sync::Arc;

use axum::{
    Json, Router,
    routing::{get, post},
};
use chrono::NaiveDateTime;
use serde_json::{Value, json};
use tracing::warn;

use adboard_db::Database;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
}

/// Builds the application router. Layers (tracing, CORS) are added by the binary.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/user/", post(users::create_user))
        .route(
            "/user/{id}/",
            get(users::get_user)
                .patch(users::update_user)
                .delete(users::delete_user),
        )
        .route("/ad/", post(ads::create_ad))
        .route(
            "/ad/{id}/",
            get(ads::get_ad).patch(ads::update_ad).delete(ads::delete_ad),
        )
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// SQLite stores timestamps as "YYYY-MM-DD HH:MM:SS" (UTC, no zone).
pub(crate) fn parse_timestamp(raw: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| raw.parse::<NaiveDateTime>())
        .unwrap_or_else(|e| {
            warn!("Corrupt timestamp '{}': {}", raw, e);
            NaiveDateTime::default()
        })
}
