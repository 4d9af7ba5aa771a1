//! Entity to DTO mappers

use board_core::entities::{Post, User};
use board_core::value_objects::VoteValue;

use super::responses::{CurrentUserResponse, PostResponse, UserResponse};

/// Feed snippet length in bytes (truncated to a char boundary)
const SNIPPET_LEN: usize = 50;

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
        }
    }
}

impl From<&User> for CurrentUserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            created_at: user.created_at,
        }
    }
}

impl PostResponse {
    /// Assemble a post response from its parts
    pub fn from_parts(post: Post, creator: UserResponse, vote_status: Option<VoteValue>) -> Self {
        let text_snippet = format!("{} ...", post.snippet(SNIPPET_LEN));
        Self {
            id: post.id,
            title: post.title,
            body: post.body,
            text_snippet,
            score: post.score,
            creator,
            created_at: post.created_at,
            updated_at: post.updated_at,
            vote_status: vote_status.map(VoteValue::as_i32),
        }
    }
}
