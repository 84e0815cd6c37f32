use rusqlite::Connection;
use tracing::info;

use crate::DbError;

/// Schema versions in order. Each entry runs once, inside its own transaction.
const MIGRATIONS: &[(i64, &str)] = &[(
    1,
    "
    CREATE TABLE app_users (
        id                  INTEGER PRIMARY KEY AUTOINCREMENT,
        name                TEXT NOT NULL UNIQUE CHECK (length(name) <= 64),
        password            TEXT NOT NULL,
        registration_time   TEXT NOT NULL DEFAULT (datetime('now'))
    );

    CREATE TABLE advertisements (
        id              INTEGER PRIMARY KEY AUTOINCREMENT,
        title           TEXT NOT NULL CHECK (length(title) <= 64),
        description     TEXT CHECK (description IS NULL OR length(description) <= 256),
        owner_id        INTEGER NOT NULL REFERENCES app_users(id),
        creation_time   TEXT NOT NULL DEFAULT (datetime('now'))
    );

    CREATE INDEX idx_advertisements_owner
        ON advertisements(owner_id);
    ",
)];

/// Brings the schema up to date. Returns the number of versions applied.
pub fn run(conn: &mut Connection) -> Result<usize, DbError> {
    conn.execute_batch("CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL);")?;

    let current: i64 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |r| r.get(0),
    )?;

    let mut applied = 0;
    for &(version, sql) in MIGRATIONS.iter().filter(|(v, _)| *v > current) {
        info!("DB: running migration v{}", version);

        let fail = |source: rusqlite::Error| DbError::Migration { version, source };
        let tx = conn.transaction().map_err(fail)?;
        tx.execute_batch(sql).map_err(fail)?;
        tx.execute("INSERT INTO schema_version (version) VALUES (?1)", [version])
            .map_err(fail)?;
        tx.commit().map_err(fail)?;

        applied += 1;
    }

    info!("Database migrations complete (schema v{})", current.max(latest()));
    Ok(applied)
}

fn latest() -> i64 {
    MIGRATIONS.last().map(|(v, _)| *v).unwrap_or(0)
}
