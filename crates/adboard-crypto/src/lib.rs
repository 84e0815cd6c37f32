/// Adboard Crypto Library
///
/// Password hashing for stored user credentials. Hashes are argon2id PHC
/// strings with a per-hash random salt.
pub mod password;

pub use password::{hash_password, verify_password};
