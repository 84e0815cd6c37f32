use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Public projection of a user. The password hash never leaves the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub registration_time: NaiveDateTime,
}

/// Public projection of an advertisement.
///
/// On the wire the title is published as `name` and the creation time as
/// `registration_time`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Advertisement {
    pub id: i64,
    pub owner_id: i64,
    #[serde(rename = "name")]
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "registration_time")]
    pub creation_time: NaiveDateTime,
}
