//! Vote entity - one signed vote per (user, post) pair

use chrono::{DateTime, Utc};

use crate::value_objects::VoteValue;

/// Vote entity
///
/// Identity is the `(user_id, post_id)` pair; the absence of a row means the
/// user has not voted on the post.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vote {
    pub user_id: i64,
    pub post_id: i64,
    pub value: VoteValue,
    pub created_at: DateTime<Utc>,
}

/// Result of applying a vote through the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteOutcome {
    /// No prior vote existed; the score moved by ±1
    Created,
    /// A prior vote with the opposite value was replaced; the score moved by ±2
    Switched,
    /// The same vote was already recorded; nothing changed
    Unchanged,
}
