//! Wire types shared by the Adboard crates: request schemas and their
//! validators, and the public projections of stored entities.
pub mod api;
pub mod models;
pub mod schema;
