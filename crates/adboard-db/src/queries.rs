use rusqlite::{Connection, OptionalExtension, Row};

use crate::DbError;
use crate::models::{AdRow, UserRow};

const USER_COLUMNS: &str = "id, name, password, registration_time";
const AD_COLUMNS: &str = "id, title, description, owner_id, creation_time";

// -- Users --

pub fn insert_user(conn: &Connection, name: &str, password_hash: &str) -> Result<UserRow, DbError> {
    let row = conn.query_row(
        &format!("INSERT INTO app_users (name, password) VALUES (?1, ?2) RETURNING {USER_COLUMNS}"),
        (name, password_hash),
        user_from_row,
    )?;
    Ok(row)
}

pub fn get_user(conn: &Connection, id: i64) -> Result<Option<UserRow>, DbError> {
    let row = conn
        .query_row(
            &format!("SELECT {USER_COLUMNS} FROM app_users WHERE id = ?1"),
            [id],
            user_from_row,
        )
        .optional()?;
    Ok(row)
}

pub fn user_exists(conn: &Connection, id: i64) -> Result<bool, DbError> {
    let exists = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM app_users WHERE id = ?1)",
        [id],
        |row| row.get(0),
    )?;
    Ok(exists)
}

/// Writes the mutable columns of `user` back. `registration_time` is never written.
pub fn update_user(conn: &Connection, user: &UserRow) -> Result<(), DbError> {
    conn.execute(
        "UPDATE app_users SET name = ?1, password = ?2 WHERE id = ?3",
        (&user.name, &user.password, user.id),
    )?;
    Ok(())
}

pub fn delete_user(conn: &Connection, id: i64) -> Result<bool, DbError> {
    let deleted = conn.execute("DELETE FROM app_users WHERE id = ?1", [id])?;
    Ok(deleted > 0)
}

// -- Advertisements --

pub fn insert_ad(
    conn: &Connection,
    title: &str,
    description: Option<&str>,
    owner_id: i64,
) -> Result<AdRow, DbError> {
    let row = conn.query_row(
        &format!(
            "INSERT INTO advertisements (title, description, owner_id) VALUES (?1, ?2, ?3) RETURNING {AD_COLUMNS}"
        ),
        (title, description, owner_id),
        ad_from_row,
    )?;
    Ok(row)
}

pub fn get_ad(conn: &Connection, id: i64) -> Result<Option<AdRow>, DbError> {
    let row = conn
        .query_row(
            &format!("SELECT {AD_COLUMNS} FROM advertisements WHERE id = ?1"),
            [id],
            ad_from_row,
        )
        .optional()?;
    Ok(row)
}

/// Writes the mutable columns of `ad` back. `creation_time` is never written.
pub fn update_ad(conn: &Connection, ad: &AdRow) -> Result<(), DbError> {
    conn.execute(
        "UPDATE advertisements SET title = ?1, description = ?2, owner_id = ?3 WHERE id = ?4",
        (&ad.title, &ad.description, ad.owner_id, ad.id),
    )?;
    Ok(())
}

pub fn delete_ad(conn: &Connection, id: i64) -> Result<bool, DbError> {
    let deleted = conn.execute("DELETE FROM advertisements WHERE id = ?1", [id])?;
    Ok(deleted > 0)
}

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<UserRow> {
    Ok(UserRow {
        id: row.get(0)?,
        name: row.get(1)?,
        password: row.get(2)?,
        registration_time: row.get(3)?,
    })
}

fn ad_from_row(row: &Row<'_>) -> rusqlite::Result<AdRow> {
    Ok(AdRow {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        owner_id: row.get(3)?,
        creation_time: row.get(4)?,
    })
}
