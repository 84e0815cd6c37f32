use thiserror::Error;

/// Errors raised by the storage layer.
#[derive(Debug, Error)]
pub enum DbError {
    /// A write was rejected by a UNIQUE, FOREIGN KEY, NOT NULL or CHECK
    /// constraint. The enclosing transaction is rolled back.
    #[error("constraint violation: {0}")]
    Constraint(String),

    /// No connection could be leased from the pool.
    #[error("connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    /// A schema migration failed to apply.
    #[error("migration v{version} failed: {source}")]
    Migration {
        version: i64,
        source: rusqlite::Error,
    },

    /// Pool settings that cannot be applied.
    #[error("invalid database settings: {0}")]
    InvalidSettings(&'static str),

    #[error("sqlite error: {0}")]
    Sqlite(rusqlite::Error),
}

impl DbError {
    pub fn is_constraint(&self) -> bool {
        matches!(self, DbError::Constraint(_))
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(code, message)
                if code.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                DbError::Constraint(message.unwrap_or_else(|| code.to_string()))
            }
            other => DbError::Sqlite(other),
        }
    }
}
