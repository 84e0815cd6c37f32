//! Database row types. These map directly to SQLite rows.
//! Distinct from adboard-types API models to keep the DB layer independent.

#[derive(Debug, Clone, PartialEq)]
pub struct UserRow {
    pub id: i64,
    pub name: String,
    /// PHC hash string, never plaintext.
    pub password: String,
    pub registration_time: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AdRow {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub owner_id: i64,
    pub creation_time: String,
}

/// Partial update for a user. `None` leaves the column untouched.
#[derive(Debug, Default)]
pub struct UserChanges {
    pub name: Option<String>,
    pub password_hash: Option<String>,
}

/// Partial update for an advertisement. `description: Some(None)` clears it.
#[derive(Debug, Default)]
pub struct AdChanges {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub owner_id: Option<i64>,
}

impl UserRow {
    pub fn merge(&mut self, changes: UserChanges) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(hash) = changes.password_hash {
            self.password = hash;
        }
    }
}

impl AdRow {
    pub fn merge(&mut self, changes: AdChanges) {
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
        if let Some(owner_id) = changes.owner_id {
            self.owner_id = owner_id;
        }
    }
}
