//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance (with migrations applied)
//! - Running Redis instance
//! - Environment variables: DATABASE_URL, REDIS_URL
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{assert_json, assert_status, check_test_env, fixtures::*, TestServer};
use reqwest::StatusCode;

/// Register a fresh user and return their auth response
async fn register_user(server: &TestServer) -> AuthResponse {
    let request = RegisterRequest::unique();
    let response = server.post("/api/v1/auth/register", &request).await.unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

/// Create a post as the given user and return it
async fn create_post(server: &TestServer, token: &str, input: &PostInput) -> PostResponse {
    let response = server.post_auth("/api/v1/posts", token, input).await.unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

/// Fetch a single post
async fn get_post(server: &TestServer, token: &str, id: i64) -> PostResponse {
    let response = server
        .get_auth(&format!("/api/v1/posts/{id}"), token)
        .await
        .unwrap();
    assert_json(response, StatusCode::OK).await.unwrap()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_register_user() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();

    let response = server.post("/api/v1/auth/register", &request).await.unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(auth.user.username, request.username);
    assert!(!auth.access_token.is_empty());
    assert!(!auth.refresh_token.is_empty());
}

#[tokio::test]
async fn test_register_duplicate_email() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();

    // First registration
    server.post("/api/v1/auth/register", &request).await.unwrap();

    // Second registration with same email
    let response = server.post("/api/v1/auth/register", &request).await.unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();
}

#[tokio::test]
async fn test_login() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    // Register first
    let register_req = RegisterRequest::unique();
    server.post("/api/v1/auth/register", &register_req).await.unwrap();

    // Login
    let login_req = LoginRequest::from_register(&register_req);
    let response = server.post("/api/v1/auth/login", &login_req).await.unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(auth.user.username, register_req.username);
    assert!(!auth.access_token.is_empty());
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let login_req = LoginRequest {
        email: "nonexistent@example.com".to_string(),
        password: "wrongpass".to_string(),
    };

    let response = server.post("/api/v1/auth/login", &login_req).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_refresh_token() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = register_user(&server).await;

    let request = RefreshTokenRequest {
        refresh_token: auth.refresh_token.clone(),
    };
    let response = server.post("/api/v1/auth/refresh", &request).await.unwrap();
    let refreshed: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(refreshed.user.id, auth.user.id);

    // The old refresh token was revoked
    let response = server.post("/api/v1/auth/refresh", &request).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_current_user() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = register_user(&server).await;

    let response = server.get_auth("/api/v1/users/@me", &auth.access_token).await.unwrap();
    let me: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(me.id, auth.user.id);
}

#[tokio::test]
async fn test_current_user_requires_auth() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/v1/users/@me").await.unwrap();
    let body: ErrorResponse = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(body.error.code, "NOT_AUTHENTICATED");
}

// ============================================================================
// Post CRUD Tests
// ============================================================================

#[tokio::test]
async fn test_create_post_requires_auth() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.post("/api/v1/posts", &PostInput::unique()).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_create_and_get_post() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = register_user(&server).await;

    let input = PostInput::unique();
    let post = create_post(&server, &auth.access_token, &input).await;

    assert_eq!(post.title, input.title);
    assert_eq!(post.body, input.text);
    assert_eq!(post.score, 0);
    assert_eq!(post.creator.id, auth.user.id);
    assert!(post.text_snippet.starts_with("Body of test post"));

    let fetched = get_post(&server, &auth.access_token, post.id).await;
    assert_eq!(fetched.id, post.id);
}

#[tokio::test]
async fn test_get_missing_post_is_not_found() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/v1/posts/999999999").await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_update_post_owner_only() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let owner = register_user(&server).await;
    let other = register_user(&server).await;

    let post = create_post(&server, &owner.access_token, &PostInput::unique()).await;

    let update = PostInput {
        title: "Updated title".to_string(),
        text: "Updated body".to_string(),
    };

    // Non-owner cannot tell the post apart from a missing one
    let response = server
        .patch_auth(&format!("/api/v1/posts/{}", post.id), &other.access_token, &update)
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    // Owner succeeds
    let response = server
        .patch_auth(&format!("/api/v1/posts/{}", post.id), &owner.access_token, &update)
        .await
        .unwrap();
    let updated: PostResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.title, "Updated title");
    assert_eq!(updated.body, "Updated body");
}

#[tokio::test]
async fn test_delete_post_owner_only() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let owner = register_user(&server).await;
    let other = register_user(&server).await;

    let post = create_post(&server, &owner.access_token, &PostInput::unique()).await;

    let response = server
        .delete_auth(&format!("/api/v1/posts/{}", post.id), &other.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server
        .delete_auth(&format!("/api/v1/posts/{}", post.id), &owner.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    // Gone for everyone
    let response = server.get(&format!("/api/v1/posts/{}", post.id)).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_delete_post_cascades_votes() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let owner = register_user(&server).await;
    let voter = register_user(&server).await;

    let post = create_post(&server, &owner.access_token, &PostInput::unique()).await;

    let response = server
        .post_auth(
            &format!("/api/v1/posts/{}/vote", post.id),
            &voter.access_token,
            &VoteInput { value: 1 },
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    // Deleting the post takes its votes with it
    let response = server
        .delete_auth(&format!("/api/v1/posts/{}", post.id), &owner.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();
}

// ============================================================================
// Vote Ledger Tests
// ============================================================================

#[tokio::test]
async fn test_vote_requires_auth() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = register_user(&server).await;
    let post = create_post(&server, &auth.access_token, &PostInput::unique()).await;

    let response = server
        .post(&format!("/api/v1/posts/{}/vote", post.id), &VoteInput { value: 1 })
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_vote_on_missing_post_is_not_found() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = register_user(&server).await;

    let response = server
        .post_auth("/api/v1/posts/999999999/vote", &auth.access_token, &VoteInput { value: 1 })
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_vote_moves_score_and_status() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let author = register_user(&server).await;
    let voter = register_user(&server).await;
    let post = create_post(&server, &author.access_token, &PostInput::unique()).await;

    let response = server
        .post_auth(
            &format!("/api/v1/posts/{}/vote", post.id),
            &voter.access_token,
            &VoteInput { value: 1 },
        )
        .await
        .unwrap();
    let vote: VoteResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(vote.voted);

    let fetched = get_post(&server, &voter.access_token, post.id).await;
    assert_eq!(fetched.score, 1);
    assert_eq!(fetched.vote_status, Some(1));
}

#[tokio::test]
async fn test_repeat_vote_is_idempotent() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let author = register_user(&server).await;
    let voter = register_user(&server).await;
    let post = create_post(&server, &author.access_token, &PostInput::unique()).await;

    for _ in 0..3 {
        let response = server
            .post_auth(
                &format!("/api/v1/posts/{}/vote", post.id),
                &voter.access_token,
                &VoteInput { value: 1 },
            )
            .await
            .unwrap();
        assert_status(response, StatusCode::OK).await.unwrap();
    }

    // Only the first call moved the score
    let fetched = get_post(&server, &voter.access_token, post.id).await;
    assert_eq!(fetched.score, 1);
    assert_eq!(fetched.vote_status, Some(1));
}

#[tokio::test]
async fn test_vote_flip_applies_double_delta() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let author = register_user(&server).await;
    let voter = register_user(&server).await;
    let post = create_post(&server, &author.access_token, &PostInput::unique()).await;

    server
        .post_auth(
            &format!("/api/v1/posts/{}/vote", post.id),
            &voter.access_token,
            &VoteInput { value: 1 },
        )
        .await
        .unwrap();

    // Flip: one -2 adjustment, not two steps
    server
        .post_auth(
            &format!("/api/v1/posts/{}/vote", post.id),
            &voter.access_token,
            &VoteInput { value: -1 },
        )
        .await
        .unwrap();

    let fetched = get_post(&server, &voter.access_token, post.id).await;
    assert_eq!(fetched.score, -1);
    assert_eq!(fetched.vote_status, Some(-1));
}

#[tokio::test]
async fn test_score_equals_sum_of_votes() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let author = register_user(&server).await;
    let alice = register_user(&server).await;
    let bob = register_user(&server).await;
    let post = create_post(&server, &author.access_token, &PostInput::unique()).await;

    let path = format!("/api/v1/posts/{}/vote", post.id);

    // alice +1, bob +1 -> 2
    server.post_auth(&path, &alice.access_token, &VoteInput { value: 1 }).await.unwrap();
    server.post_auth(&path, &bob.access_token, &VoteInput { value: 1 }).await.unwrap();
    assert_eq!(get_post(&server, &alice.access_token, post.id).await.score, 2);

    // alice flips to -1 -> 0
    server.post_auth(&path, &alice.access_token, &VoteInput { value: -1 }).await.unwrap();
    assert_eq!(get_post(&server, &alice.access_token, post.id).await.score, 0);

    // bob repeats +1 -> still 0
    server.post_auth(&path, &bob.access_token, &VoteInput { value: 1 }).await.unwrap();
    assert_eq!(get_post(&server, &bob.access_token, post.id).await.score, 0);
}

#[tokio::test]
async fn test_vote_value_normalization() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let author = register_user(&server).await;
    let voter = register_user(&server).await;
    let post = create_post(&server, &author.access_token, &PostInput::unique()).await;

    // Any value other than -1 is an upvote
    server
        .post_auth(
            &format!("/api/v1/posts/{}/vote", post.id),
            &voter.access_token,
            &VoteInput { value: 17 },
        )
        .await
        .unwrap();

    let fetched = get_post(&server, &voter.access_token, post.id).await;
    assert_eq!(fetched.score, 1);
    assert_eq!(fetched.vote_status, Some(1));
}

// ============================================================================
// Feed Pagination Tests
// ============================================================================

/// Walk the whole feed with the given page size, asserting page shape along
/// the way, and return every post seen in order.
async fn walk_feed(server: &TestServer, limit: i64) -> Vec<PostResponse> {
    let mut all = Vec::new();
    let mut cursor: Option<String> = None;

    // Bounded so a broken continuation flag cannot loop forever
    for _ in 0..500 {
        let path = match &cursor {
            Some(c) => format!("/api/v1/posts?limit={limit}&cursor={c}"),
            None => format!("/api/v1/posts?limit={limit}"),
        };
        let response = server.get(&path).await.unwrap();
        let page: PaginatedPostsResponse = assert_json(response, StatusCode::OK).await.unwrap();

        if page.has_more {
            assert_eq!(page.posts.len() as i64, limit, "non-final page must be full");
        } else {
            assert!(page.posts.len() as i64 <= limit);
        }

        all.extend(page.posts);

        if !page.has_more {
            break;
        }
        cursor = Some(page.next_cursor.expect("non-final page must carry a cursor"));
    }

    all
}

#[tokio::test]
async fn test_feed_walk_is_complete_ordered_and_duplicate_free() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = register_user(&server).await;

    let mut created_ids = Vec::new();
    for _ in 0..5 {
        let post = create_post(&server, &auth.access_token, &PostInput::unique()).await;
        created_ids.push(post.id);
    }

    let all = walk_feed(&server, 2).await;

    // No duplicates or omissions across page boundaries
    let mut seen = std::collections::HashSet::new();
    for post in &all {
        assert!(seen.insert(post.id), "duplicate post {} across pages", post.id);
    }
    for id in &created_ids {
        assert!(seen.contains(id), "post {id} missing from feed walk");
    }

    // Strictly descending creation order, ids breaking timestamp ties
    let ts = |s: &str| s.parse::<chrono::DateTime<chrono::Utc>>().expect("rfc3339 created_at");
    for pair in all.windows(2) {
        let newer = (ts(&pair[0].created_at), pair[0].id);
        let older = (ts(&pair[1].created_at), pair[1].id);
        assert!(newer > older, "feed out of order: {newer:?} before {older:?}");
    }

    // Our posts appear newest-first
    let ours: Vec<i64> = all
        .iter()
        .map(|p| p.id)
        .filter(|id| created_ids.contains(id))
        .collect();
    let mut expected = created_ids.clone();
    expected.reverse();
    assert_eq!(ours, expected);
}

#[tokio::test]
async fn test_feed_limit_is_clamped_to_50() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = register_user(&server).await;

    // Enough posts to overflow the cap
    for _ in 0..55 {
        create_post(&server, &auth.access_token, &PostInput::unique()).await;
    }

    let response = server.get("/api/v1/posts?limit=100").await.unwrap();
    let page: PaginatedPostsResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(page.posts.len(), 50, "limit=100 must be served as limit=50");
    assert!(page.has_more);
}

#[tokio::test]
async fn test_feed_vote_status_for_authenticated_reader() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let author = register_user(&server).await;
    let voter = register_user(&server).await;
    let post = create_post(&server, &author.access_token, &PostInput::unique()).await;

    server
        .post_auth(
            &format!("/api/v1/posts/{}/vote", post.id),
            &voter.access_token,
            &VoteInput { value: -1 },
        )
        .await
        .unwrap();

    // Authenticated reader sees their own vote on the feed item
    let response = server.get_auth("/api/v1/posts?limit=10", &voter.access_token).await.unwrap();
    let page: PaginatedPostsResponse = assert_json(response, StatusCode::OK).await.unwrap();
    let item = page.posts.iter().find(|p| p.id == post.id).expect("post in feed");
    assert_eq!(item.vote_status, Some(-1));

    // Anonymous reader sees none
    let response = server.get("/api/v1/posts?limit=10").await.unwrap();
    let page: PaginatedPostsResponse = assert_json(response, StatusCode::OK).await.unwrap();
    let item = page.posts.iter().find(|p| p.id == post.id).expect("post in feed");
    assert_eq!(item.vote_status, None);
}

// ============================================================================
// Client Cache Round-trip
// ============================================================================

#[tokio::test]
async fn test_client_cache_stitches_real_pages() {
    if !check_test_env().await {
        return;
    }

    use board_client::{resolve_feed, write_feed_page, CacheStore, FEED_FIELD};
    use serde_json::json;

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = register_user(&server).await;

    let mut created_ids = Vec::new();
    for _ in 0..5 {
        let post = create_post(&server, &auth.access_token, &PostInput::unique()).await;
        created_ids.push(post.id);
    }

    // Fetch two consecutive pages over the wire and record them in the
    // client cache exactly as the UI layer would
    let mut store = CacheStore::new();

    let response = server.get("/api/v1/posts?limit=2").await.unwrap();
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    let first_args = json!({"limit": 2, "cursor": null});
    write_feed_page(
        &mut store,
        FEED_FIELD,
        &first_args,
        body["posts"].as_array().unwrap(),
        body["has_more"].as_bool().unwrap(),
    );

    let cursor = body["next_cursor"].as_str().unwrap();
    let response = server
        .get(&format!("/api/v1/posts?limit=2&cursor={cursor}"))
        .await
        .unwrap();
    let body2: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    let second_args = json!({"limit": 2, "cursor": cursor});
    write_feed_page(
        &mut store,
        FEED_FIELD,
        &second_args,
        body2["posts"].as_array().unwrap(),
        body2["has_more"].as_bool().unwrap(),
    );

    // The resolver stitches both pages into one view, in call order, with no
    // duplicates across the boundary
    let view = resolve_feed(&store, FEED_FIELD, &second_args).unwrap();
    assert_eq!(view.post_refs.len(), 4);
    let mut seen = std::collections::HashSet::new();
    for key in &view.post_refs {
        assert!(seen.insert(key.clone()), "duplicate across page boundary");
    }
    assert!(!view.partial);
}
