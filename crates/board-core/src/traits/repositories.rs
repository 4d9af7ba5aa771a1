//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;

use crate::entities::{Post, User, Vote, VoteOutcome};
use crate::error::DomainError;
use crate::value_objects::{FeedCursor, VoteValue};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Fetch a batch of users by ID in one query (feed author hydration)
    async fn find_many_by_ids(&self, ids: &[i64]) -> RepoResult<Vec<User>>;

    /// Check if email is already taken
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// Check if username is already taken
    async fn username_exists(&self, username: &str) -> RepoResult<bool>;

    /// Create a new user; the id is assigned by the store
    async fn create(&self, username: &str, email: &str, password_hash: &str) -> RepoResult<User>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: i64) -> RepoResult<Option<String>>;
}

// ============================================================================
// Post Repository
// ============================================================================

/// Feed pagination query
///
/// `limit` is the raw row count requested from the store. The service layer
/// owns clamping and over-fetch; the repository just selects rows strictly
/// older than `before` in `(created_at, id)` descending order.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeedQuery {
    pub before: Option<FeedCursor>,
    pub limit: i64,
}

#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Find post by ID
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Post>>;

    /// List feed rows for a pagination query
    async fn list_feed(&self, query: FeedQuery) -> RepoResult<Vec<Post>>;

    /// Create a new post; id, score, and timestamps are assigned by the store
    async fn create(&self, creator_id: i64, title: &str, body: &str) -> RepoResult<Post>;

    /// Update title and body, only when `creator_id` owns the post.
    /// Returns `None` when no owned row matched (missing and non-owned are
    /// indistinguishable to the caller).
    async fn update_owned(
        &self,
        id: i64,
        creator_id: i64,
        title: &str,
        body: &str,
    ) -> RepoResult<Option<Post>>;

    /// Delete a post owned by `creator_id`; the post's votes go with it.
    /// Returns whether a row was deleted.
    async fn delete_owned(&self, id: i64, creator_id: i64) -> RepoResult<bool>;
}

// ============================================================================
// Vote Repository
// ============================================================================

#[async_trait]
pub trait VoteRepository: Send + Sync {
    /// Fetch a user's votes across a batch of posts in one query
    async fn find_for_posts(&self, user_id: i64, post_ids: &[i64]) -> RepoResult<Vec<Vote>>;

    /// Apply a vote atomically: insert or flip the vote row and adjust the
    /// post's score by a relative delta (±1 on first vote, ±2 on a flip,
    /// nothing on a repeat) in a single transaction.
    async fn cast(&self, user_id: i64, post_id: i64, value: VoteValue) -> RepoResult<VoteOutcome>;
}
