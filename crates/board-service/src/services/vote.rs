//! Vote service
//!
//! Thin orchestration over the vote ledger: normalize the raw value, apply it
//! atomically, report success.

use board_core::entities::VoteOutcome;
use board_core::value_objects::VoteValue;
use tracing::{info, instrument};

use crate::dto::VoteResponse;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Vote service
pub struct VoteService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> VoteService<'a> {
    /// Create a new VoteService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Cast a vote on a post for the authenticated user
    ///
    /// A repeated identical vote is a successful no-op; flipping an existing
    /// vote moves the score by ±2 in one adjustment.
    #[instrument(skip(self))]
    pub async fn cast_vote(
        &self,
        user_id: i64,
        post_id: i64,
        raw_value: i32,
    ) -> ServiceResult<VoteResponse> {
        let value = VoteValue::from_raw(raw_value);

        let outcome = self.ctx.vote_repo().cast(user_id, post_id, value).await?;

        match outcome {
            VoteOutcome::Created => {
                info!(post_id = %post_id, value = %value, "Vote recorded");
            }
            VoteOutcome::Switched => {
                info!(post_id = %post_id, value = %value, "Vote flipped");
            }
            VoteOutcome::Unchanged => {}
        }

        Ok(VoteResponse { voted: true })
    }
}
