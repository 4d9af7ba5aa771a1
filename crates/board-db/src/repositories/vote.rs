//! PostgreSQL implementation of VoteRepository
//!
//! The vote ledger: one signed vote per (user, post) pair plus the
//! denormalized score on the post row, kept in sync by a single transaction.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use board_core::entities::{Vote, VoteOutcome};
use board_core::traits::{RepoResult, VoteRepository};
use board_core::value_objects::VoteValue;

use crate::models::VoteModel;

use super::error::{map_db_error, post_not_found};

/// PostgreSQL implementation of VoteRepository
#[derive(Clone)]
pub struct PgVoteRepository {
    pool: PgPool,
}

impl PgVoteRepository {
    /// Create a new PgVoteRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Move a post's score by a relative delta inside the vote transaction.
///
/// The delta is applied by the store (`score = score + $2`), never as a
/// read-modify-write of a fetched score, so concurrent voters on the same
/// post commute. Zero rows affected means the post does not exist; the
/// caller's transaction rolls back on drop.
async fn apply_score_delta(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    post_id: i64,
    delta: i32,
) -> RepoResult<()> {
    let updated = sqlx::query(
        r#"
        UPDATE posts
        SET score = score + $2
        WHERE id = $1
        "#,
    )
    .bind(post_id)
    .bind(delta)
    .execute(&mut **tx)
    .await
    .map_err(map_db_error)?;

    if updated.rows_affected() == 0 {
        return Err(post_not_found(post_id));
    }

    Ok(())
}

#[async_trait]
impl VoteRepository for PgVoteRepository {
    #[instrument(skip(self, post_ids))]
    async fn find_for_posts(&self, user_id: i64, post_ids: &[i64]) -> RepoResult<Vec<Vote>> {
        if post_ids.is_empty() {
            return Ok(Vec::new());
        }

        let results = sqlx::query_as::<_, VoteModel>(
            r#"
            SELECT user_id, post_id, value, created_at
            FROM votes
            WHERE user_id = $1 AND post_id = ANY($2)
            "#,
        )
        .bind(user_id)
        .bind(post_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Vote::from).collect())
    }

    #[instrument(skip(self))]
    async fn cast(&self, user_id: i64, post_id: i64, value: VoteValue) -> RepoResult<VoteOutcome> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // Lock this user's vote row (if any) for the duration of the
        // transaction so two requests from the same user serialize.
        let existing = sqlx::query_scalar::<_, i16>(
            r#"
            SELECT value FROM votes
            WHERE user_id = $1 AND post_id = $2
            FOR UPDATE
            "#,
        )
        .bind(user_id)
        .bind(post_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?;

        let outcome = match existing.map(VoteValue::from_stored) {
            Some(prev) if prev == value => {
                // Idempotent repeat vote
                return Ok(VoteOutcome::Unchanged);
            }
            Some(_) => {
                // One adjustment removes the old contribution and adds the
                // new one, hence twice the value rather than two ±1 steps.
                apply_score_delta(&mut tx, post_id, value.switch_delta()).await?;

                sqlx::query(
                    r#"
                    UPDATE votes
                    SET value = $3
                    WHERE user_id = $1 AND post_id = $2
                    "#,
                )
                .bind(user_id)
                .bind(post_id)
                .bind(value.as_i16())
                .execute(&mut *tx)
                .await
                .map_err(map_db_error)?;

                VoteOutcome::Switched
            }
            None => {
                // Score first: a zero-row update means the post is gone and
                // nothing has been written yet.
                apply_score_delta(&mut tx, post_id, value.as_i32()).await?;

                let inserted = sqlx::query(
                    r#"
                    INSERT INTO votes (user_id, post_id, value)
                    VALUES ($1, $2, $3)
                    ON CONFLICT (user_id, post_id) DO NOTHING
                    "#,
                )
                .bind(user_id)
                .bind(post_id)
                .bind(value.as_i16())
                .execute(&mut *tx)
                .await
                .map_err(map_db_error)?;

                if inserted.rows_affected() == 0 {
                    // A concurrent request won the insert race. Dropping the
                    // transaction rolls the score bump back; the repeat vote
                    // is a success, not an error.
                    return Ok(VoteOutcome::Unchanged);
                }

                VoteOutcome::Created
            }
        };

        tx.commit().await.map_err(map_db_error)?;

        Ok(outcome)
    }

}
