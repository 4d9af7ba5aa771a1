//! Post service
//!
//! Handles post creation, editing, deletion, and the cursor-paginated feed.

use std::collections::HashMap;

use board_core::entities::Post;
use board_core::traits::FeedQuery;
use board_core::value_objects::{FeedCursor, VoteValue, MAX_FEED_LIMIT};
use tracing::{info, instrument};

use crate::dto::{CreatePostRequest, PaginatedPostsResponse, PostResponse, UpdatePostRequest, UserResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Post service
pub struct PostService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PostService<'a> {
    /// Create a new PostService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// List the feed page for a pagination request
    ///
    /// The requested limit is clamped server-side; the store is asked for one
    /// row more than the page size, and that extra row only signals that
    /// another page exists - it is never returned.
    #[instrument(skip(self))]
    pub async fn list_posts(
        &self,
        limit: i64,
        cursor: Option<FeedCursor>,
        viewer: Option<i64>,
    ) -> ServiceResult<PaginatedPostsResponse> {
        let real_limit = limit.clamp(1, MAX_FEED_LIMIT);

        let mut posts = self
            .ctx
            .post_repo()
            .list_feed(FeedQuery {
                before: cursor,
                limit: real_limit + 1,
            })
            .await?;

        let has_more = posts.len() as i64 == real_limit + 1;
        posts.truncate(real_limit as usize);

        let next_cursor = posts.last().map(|p| p.cursor().to_string());
        let responses = self.hydrate(posts, viewer).await?;

        Ok(PaginatedPostsResponse {
            posts: responses,
            has_more,
            next_cursor,
        })
    }

    /// Get post by ID
    #[instrument(skip(self))]
    pub async fn get_post(&self, id: i64, viewer: Option<i64>) -> ServiceResult<PostResponse> {
        let post = self
            .ctx
            .post_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Post", id.to_string()))?;

        let mut responses = self.hydrate(vec![post], viewer).await?;
        Ok(responses.remove(0))
    }

    /// Create a new post
    #[instrument(skip(self, request))]
    pub async fn create_post(
        &self,
        creator_id: i64,
        request: CreatePostRequest,
    ) -> ServiceResult<PostResponse> {
        let post = self
            .ctx
            .post_repo()
            .create(creator_id, &request.title, &request.text)
            .await?;

        info!(post_id = %post.id, creator_id = %creator_id, "Post created");

        let mut responses = self.hydrate(vec![post], Some(creator_id)).await?;
        Ok(responses.remove(0))
    }

    /// Update a post's title and text
    ///
    /// Only succeeds when the caller created the post. A post owned by someone
    /// else reports not-found, exactly like a post that does not exist.
    #[instrument(skip(self, request))]
    pub async fn update_post(
        &self,
        id: i64,
        user_id: i64,
        request: UpdatePostRequest,
    ) -> ServiceResult<PostResponse> {
        let post = self
            .ctx
            .post_repo()
            .update_owned(id, user_id, &request.title, &request.text)
            .await?
            .ok_or_else(|| ServiceError::not_found("Post", id.to_string()))?;

        info!(post_id = %id, "Post updated");

        let mut responses = self.hydrate(vec![post], Some(user_id)).await?;
        Ok(responses.remove(0))
    }

    /// Delete a post owned by the caller; its votes cascade with it
    #[instrument(skip(self))]
    pub async fn delete_post(&self, id: i64, user_id: i64) -> ServiceResult<()> {
        let deleted = self.ctx.post_repo().delete_owned(id, user_id).await?;

        if !deleted {
            return Err(ServiceError::not_found("Post", id.to_string()));
        }

        info!(post_id = %id, "Post deleted");
        Ok(())
    }

    /// Attach creators and the viewer's vote status to a batch of posts.
    ///
    /// One query per concern for the whole batch, never one per row.
    async fn hydrate(
        &self,
        posts: Vec<Post>,
        viewer: Option<i64>,
    ) -> ServiceResult<Vec<PostResponse>> {
        let post_ids: Vec<i64> = posts.iter().map(|p| p.id).collect();
        let creator_ids: Vec<i64> = {
            let mut ids: Vec<i64> = posts.iter().map(|p| p.creator_id).collect();
            ids.sort_unstable();
            ids.dedup();
            ids
        };

        let creators: HashMap<i64, UserResponse> = self
            .ctx
            .user_repo()
            .find_many_by_ids(&creator_ids)
            .await?
            .iter()
            .map(|u| (u.id, UserResponse::from(u)))
            .collect();

        let vote_statuses: HashMap<i64, VoteValue> = match viewer {
            Some(user_id) => self
                .ctx
                .vote_repo()
                .find_for_posts(user_id, &post_ids)
                .await?
                .into_iter()
                .map(|v| (v.post_id, v.value))
                .collect(),
            None => HashMap::new(),
        };

        Ok(posts
            .into_iter()
            .map(|post| {
                let creator = creators.get(&post.creator_id).cloned().unwrap_or(UserResponse {
                    id: post.creator_id,
                    username: "[deleted]".to_string(),
                });
                let vote_status = vote_statuses.get(&post.id).copied();
                PostResponse::from_parts(post, creator, vote_status)
            })
            .collect())
    }
}
