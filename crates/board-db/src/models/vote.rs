//! Vote database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the votes table
///
/// The primary key is `(user_id, post_id)`; `value` is constrained to 1 or -1
/// by the schema.
#[derive(Debug, Clone, FromRow)]
pub struct VoteModel {
    pub user_id: i64,
    pub post_id: i64,
    pub value: i16,
    pub created_at: DateTime<Utc>,
}
