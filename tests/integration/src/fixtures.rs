//! Test fixtures and data generators
//!
//! Provides reusable test data for integration tests.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Registration request
#[derive(Debug, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        // The pid keeps parallel test binaries from colliding on unique columns
        let pid = std::process::id();
        Self {
            username: format!("testuser{pid}x{suffix}"),
            email: format!("test{pid}x{suffix}@example.com"),
            password: "TestPass123!".to_string(),
        }
    }
}

/// Login request
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn from_register(reg: &RegisterRequest) -> Self {
        Self {
            email: reg.email.clone(),
            password: reg.password.clone(),
        }
    }
}

/// Auth response
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub access_token: String,
    pub refresh_token: String,
}

/// User response
#[derive(Debug, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: Option<String>,
    pub created_at: String,
}

/// Create / update post request
#[derive(Debug, Serialize)]
pub struct PostInput {
    pub title: String,
    pub text: String,
}

impl PostInput {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            title: format!("Test post {suffix}"),
            text: format!("Body of test post {suffix}"),
        }
    }
}

/// Vote request
#[derive(Debug, Serialize)]
pub struct VoteInput {
    pub value: i32,
}

/// Post response
#[derive(Debug, Deserialize)]
pub struct PostResponse {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub text_snippet: String,
    pub score: i32,
    pub creator: CreatorResponse,
    pub created_at: String,
    pub vote_status: Option<i32>,
}

/// Post creator in responses
#[derive(Debug, Deserialize)]
pub struct CreatorResponse {
    pub id: i64,
    pub username: String,
}

/// Feed page response
#[derive(Debug, Deserialize)]
pub struct PaginatedPostsResponse {
    pub posts: Vec<PostResponse>,
    pub has_more: bool,
    pub next_cursor: Option<String>,
}

/// Vote mutation response
#[derive(Debug, Deserialize)]
pub struct VoteResponse {
    pub voted: bool,
}

/// Token refresh request
#[derive(Debug, Serialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

/// Error response envelope
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}
