//! Post handlers
//!
//! Endpoints for the feed, post CRUD, and voting.

use axum::{
    extract::{Path, State},
    Json,
};
use board_service::{
    CreatePostRequest, PaginatedPostsResponse, PostResponse, PostService, UpdatePostRequest,
    VoteRequest, VoteResponse, VoteService,
};

use crate::extractors::{AuthUser, FeedPagination, OptionalAuthUser, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// List the cursor-paginated feed
///
/// GET /posts?limit&cursor
pub async fn list_posts(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    pagination: FeedPagination,
) -> ApiResult<Json<PaginatedPostsResponse>> {
    let service = PostService::new(state.service_context());
    let page = service
        .list_posts(pagination.limit, pagination.cursor, auth.user_id())
        .await?;
    Ok(Json(page))
}

/// Get post by ID
///
/// GET /posts/{post_id}
pub async fn get_post(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    Path(post_id): Path<i64>,
) -> ApiResult<Json<PostResponse>> {
    let service = PostService::new(state.service_context());
    let response = service.get_post(post_id, auth.user_id()).await?;
    Ok(Json(response))
}

/// Create post
///
/// POST /posts
pub async fn create_post(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreatePostRequest>,
) -> ApiResult<Created<Json<PostResponse>>> {
    let service = PostService::new(state.service_context());
    let response = service.create_post(auth.user_id, request).await?;
    Ok(Created(Json(response)))
}

/// Edit post
///
/// PATCH /posts/{post_id}
pub async fn update_post(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(post_id): Path<i64>,
    ValidatedJson(request): ValidatedJson<UpdatePostRequest>,
) -> ApiResult<Json<PostResponse>> {
    let service = PostService::new(state.service_context());
    let response = service.update_post(post_id, auth.user_id, request).await?;
    Ok(Json(response))
}

/// Delete post
///
/// DELETE /posts/{post_id}
pub async fn delete_post(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(post_id): Path<i64>,
) -> ApiResult<NoContent> {
    let service = PostService::new(state.service_context());
    service.delete_post(post_id, auth.user_id).await?;
    Ok(NoContent)
}

/// Cast a vote on a post
///
/// POST /posts/{post_id}/vote
pub async fn vote(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(post_id): Path<i64>,
    ValidatedJson(request): ValidatedJson<VoteRequest>,
) -> ApiResult<Json<VoteResponse>> {
    let service = VoteService::new(state.service_context());
    let response = service.cast_vote(auth.user_id, post_id, request.value).await?;
    Ok(Json(response))
}
