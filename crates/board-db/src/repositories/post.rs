//! PostgreSQL implementation of PostRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use board_core::entities::Post;
use board_core::traits::{FeedQuery, PostRepository, RepoResult};
use board_core::value_objects::MAX_FEED_LIMIT;

use crate::models::PostModel;

use super::error::map_db_error;

/// PostgreSQL implementation of PostRepository
#[derive(Clone)]
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    /// Create a new PgPostRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Post>> {
        let result = sqlx::query_as::<_, PostModel>(
            r#"
            SELECT id, title, body, score, creator_id, created_at, updated_at
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Post::from))
    }

    #[instrument(skip(self))]
    async fn list_feed(&self, query: FeedQuery) -> RepoResult<Vec<Post>> {
        // The service over-fetches by one, so the hard cap here is one above
        // the public page-size cap.
        let limit = query.limit.clamp(1, MAX_FEED_LIMIT + 1);

        let results = match query.before {
            Some(cursor) => {
                // Strictly older than the cursor position. The row-value
                // comparison matches the (created_at DESC, id DESC) ordering,
                // so ties on created_at cannot drop or repeat items.
                sqlx::query_as::<_, PostModel>(
                    r#"
                    SELECT id, title, body, score, creator_id, created_at, updated_at
                    FROM posts
                    WHERE (created_at, id) < ($1, $2)
                    ORDER BY created_at DESC, id DESC
                    LIMIT $3
                    "#,
                )
                .bind(cursor.created_at)
                .bind(cursor.id)
                .bind(limit)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, PostModel>(
                    r#"
                    SELECT id, title, body, score, creator_id, created_at, updated_at
                    FROM posts
                    ORDER BY created_at DESC, id DESC
                    LIMIT $1
                    "#,
                )
                .bind(limit)
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Post::from).collect())
    }

    #[instrument(skip(self, title, body))]
    async fn create(&self, creator_id: i64, title: &str, body: &str) -> RepoResult<Post> {
        let result = sqlx::query_as::<_, PostModel>(
            r#"
            INSERT INTO posts (title, body, creator_id)
            VALUES ($1, $2, $3)
            RETURNING id, title, body, score, creator_id, created_at, updated_at
            "#,
        )
        .bind(title)
        .bind(body)
        .bind(creator_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(Post::from(result))
    }

    #[instrument(skip(self, title, body))]
    async fn update_owned(
        &self,
        id: i64,
        creator_id: i64,
        title: &str,
        body: &str,
    ) -> RepoResult<Option<Post>> {
        // A missing post and a post owned by someone else both match zero
        // rows; the caller cannot tell them apart.
        let result = sqlx::query_as::<_, PostModel>(
            r#"
            UPDATE posts
            SET title = $3, body = $4, updated_at = NOW()
            WHERE id = $1 AND creator_id = $2
            RETURNING id, title, body, score, creator_id, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(creator_id)
        .bind(title)
        .bind(body)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Post::from))
    }

    #[instrument(skip(self))]
    async fn delete_owned(&self, id: i64, creator_id: i64) -> RepoResult<bool> {
        // Votes are removed by the ON DELETE CASCADE on votes.post_id
        let result = sqlx::query(
            r#"
            DELETE FROM posts WHERE id = $1 AND creator_id = $2
            "#,
        )
        .bind(id)
        .bind(creator_id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgPostRepository>();
    }
}
