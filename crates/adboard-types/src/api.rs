use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::schema::{Fields, Length, Schema, ValidationError, required};

pub const NAME_MAX_LEN: usize = 64;
pub const PASSWORD_MIN_LEN: usize = 8;
pub const TITLE_MAX_LEN: usize = 64;
pub const DESCRIPTION_MAX_LEN: usize = 256;

const NAME: Length = Length::max(NAME_MAX_LEN);
const PASSWORD: Length = Length::min(PASSWORD_MIN_LEN);
const TITLE: Length = Length::max(TITLE_MAX_LEN);
const DESCRIPTION: Length = Length::max(DESCRIPTION_MAX_LEN);

// -- Users --

pub struct CreateUser {
    pub name: String,
    pub password: String,
}

impl Schema for CreateUser {
    fn validate(payload: &Value) -> Result<Self, ValidationError> {
        let fields = Fields::of(payload)?;
        Ok(Self {
            name: required("name", fields.string("name", NAME)?)?,
            password: required("password", fields.string("password", PASSWORD)?)?,
        })
    }
}

impl fmt::Debug for CreateUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreateUser")
            .field("name", &self.name)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Default)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub password: Option<String>,
}

impl Schema for UpdateUser {
    fn validate(payload: &Value) -> Result<Self, ValidationError> {
        let fields = Fields::of(payload)?;
        Ok(Self {
            name: fields.string("name", NAME)?,
            password: fields.string("password", PASSWORD)?,
        })
    }
}

impl fmt::Debug for UpdateUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdateUser")
            .field("name", &self.name)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

// -- Advertisements --

#[derive(Debug)]
pub struct CreateAd {
    pub title: String,
    pub description: Option<String>,
    pub owner_id: i64,
}

impl Schema for CreateAd {
    fn validate(payload: &Value) -> Result<Self, ValidationError> {
        let fields = Fields::of(payload)?;
        Ok(Self {
            title: required("title", fields.string("title", TITLE)?)?,
            description: fields.nullable_string("description", DESCRIPTION)?.flatten(),
            owner_id: required("owner_id", fields.integer("owner_id")?)?,
        })
    }
}

/// `description` is doubly optional: `Some(None)` clears it.
#[derive(Debug, Default)]
pub struct UpdateAd {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub owner_id: Option<i64>,
}

impl Schema for UpdateAd {
    fn validate(payload: &Value) -> Result<Self, ValidationError> {
        let fields = Fields::of(payload)?;
        Ok(Self {
            title: fields.string("title", TITLE)?,
            description: fields.nullable_string("description", DESCRIPTION)?,
            owner_id: fields.integer("owner_id")?,
        })
    }
}

// -- Misc --

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

impl StatusResponse {
    pub const fn deleted() -> Self {
        Self { status: "deleted" }
    }
}
