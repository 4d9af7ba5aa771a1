//! Post entity - a submission on the board

use chrono::{DateTime, Utc};

use crate::value_objects::FeedCursor;

/// Post entity
///
/// `score` is denormalized: it always equals the sum of the stored vote
/// values for this post and is only ever changed through the vote-apply
/// transaction, never by direct field assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub score: i32,
    pub creator_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Get a truncated preview of the body (for feed listings)
    pub fn snippet(&self, max_len: usize) -> &str {
        if self.body.len() <= max_len {
            &self.body
        } else {
            let mut end = max_len;
            while !self.body.is_char_boundary(end) && end > 0 {
                end -= 1;
            }
            &self.body[..end]
        }
    }

    /// The cursor that resumes pagination strictly after this post
    #[inline]
    pub fn cursor(&self) -> FeedCursor {
        FeedCursor::new(self.created_at, self.id)
    }
}
