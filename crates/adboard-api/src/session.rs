use axum::{extract::FromRequestParts, http::request::Parts};
use tracing::error;

use adboard_db::Session;

use crate::AppState;
use crate::error::ApiError;

/// A database session leased for the lifetime of one request.
///
/// Extracting it leases a pooled connection; [`RequestSession::run`] hands
/// the connection to blocking work and releases it as soon as that work
/// returns, whether it succeeded or not.
pub struct RequestSession(Session);

impl FromRequestParts<AppState> for RequestSession {
    type Rejection = ApiError;

    async fn from_request_parts(_parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let db = state.db.clone();
        let session = tokio::task::spawn_blocking(move || db.session())
            .await
            .map_err(|e| {
                error!("spawn_blocking join error: {}", e);
                ApiError::Internal(e.to_string())
            })??;

        Ok(Self(session))
    }
}

impl RequestSession {
    /// Runs blocking SQLite and hashing work off the async runtime.
    pub async fn run<F, T>(self, f: F) -> Result<T, ApiError>
    where
        F: FnOnce(&mut Session) -> Result<T, ApiError> + Send + 'static,
        T: Send + 'static,
    {
        let mut session = self.0;
        tokio::task::spawn_blocking(move || f(&mut session))
            .await
            .map_err(|e| {
                error!("spawn_blocking join error: {}", e);
                ApiError::Internal(e.to_string())
            })?
    }
}
