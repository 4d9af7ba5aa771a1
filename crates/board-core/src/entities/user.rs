//! User entity - a registered board account

use chrono::{DateTime, Utc};

/// User entity
///
/// The password hash is deliberately not part of the entity; it lives in its
/// own column and is only surfaced through `UserRepository::get_password_hash`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
