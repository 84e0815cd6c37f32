//! Storage layer for Adboard.
//!
//! A [`Database`] owns the process-wide SQLite pool. Each request leases
//! exactly one [`Session`] from it and runs its reads and writes inside
//! [`Session::transaction`].

mod error;
pub mod migrations;
pub mod models;
mod pool;
pub mod queries;

use std::path::Path;

use r2d2::PooledConnection;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{Transaction, TransactionBehavior};
use tracing::{debug, info};

pub use error::DbError;
pub use pool::{DbPool, DbRuntimeSettings, create_pool};

#[derive(Clone)]
pub struct Database {
    pool: DbPool,
}

impl Database {
    /// Builds the pool and brings the schema up to date.
    pub fn open(path: &Path, settings: DbRuntimeSettings) -> Result<Self, DbError> {
        let pool = create_pool(path, settings)?;

        {
            let mut conn = pool.get()?;
            migrations::run(&mut conn)?;
        }

        info!(
            "Database opened at {} (pool size {})",
            path.display(),
            settings.pool_max_size
        );
        Ok(Self { pool })
    }

    /// Leases a connection. Blocks until one is free or the pool times out.
    pub fn session(&self) -> Result<Session, DbError> {
        let conn = self.pool.get()?;
        debug!("session opened");
        Ok(Session { conn })
    }

    /// Drops this handle to the pool. The pool itself closes once every
    /// clone of the `Database` is gone; connections still leased close when
    /// their sessions drop.
    pub fn close(self) {
        let state = self.pool.state();
        info!(
            "Closing database pool ({} connections, {} idle)",
            state.connections, state.idle_connections
        );
        drop(self.pool);
    }
}

/// One leased connection, scoped to a single request.
pub struct Session {
    conn: PooledConnection<SqliteConnectionManager>,
}

impl Session {
    /// Runs `f` in a write transaction. Commits on `Ok`; on `Err` the
    /// transaction is dropped and rolled back.
    ///
    /// The write lock is taken up front (`BEGIN IMMEDIATE`) so a concurrent
    /// writer waits on the busy timeout instead of failing mid-transaction.
    pub fn transaction<T, E, F>(&mut self, f: F) -> Result<T, E>
    where
        F: FnOnce(&Transaction<'_>) -> Result<T, E>,
        E: From<DbError>,
    {
        self.run(TransactionBehavior::Immediate, f)
    }

    /// Runs `f` in a deferred transaction. Meant for lookups.
    pub fn read<T, E, F>(&mut self, f: F) -> Result<T, E>
    where
        F: FnOnce(&Transaction<'_>) -> Result<T, E>,
        E: From<DbError>,
    {
        self.run(TransactionBehavior::Deferred, f)
    }

    fn run<T, E, F>(&mut self, behavior: TransactionBehavior, f: F) -> Result<T, E>
    where
        F: FnOnce(&Transaction<'_>) -> Result<T, E>,
        E: From<DbError>,
    {
        let tx = self
            .conn
            .transaction_with_behavior(behavior)
            .map_err(DbError::from)?;
        let value = f(&tx)?;
        tx.commit().map_err(DbError::from)?;
        Ok(value)
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        debug!("session closed");
    }
}
