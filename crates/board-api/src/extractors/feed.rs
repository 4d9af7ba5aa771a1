//! Feed pagination extractor
//!
//! Extracts cursor-based pagination parameters from query strings.

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use board_core::FeedCursor;
use serde::Deserialize;

use crate::response::ApiError;

/// Default page size when the client sends no limit
const DEFAULT_LIMIT: i64 = 20;

/// Raw feed query parameters
#[derive(Debug, Deserialize)]
pub struct FeedParams {
    /// Maximum number of posts to return
    #[serde(default)]
    pub limit: Option<i64>,
    /// Resume strictly before this cursor
    #[serde(default)]
    pub cursor: Option<String>,
}

/// Parsed feed pagination parameters
///
/// The limit is passed through as requested; the service layer owns the
/// server-side cap so a clamped page is served the same way regardless of
/// how the request arrived.
#[derive(Debug, Clone, Copy)]
pub struct FeedPagination {
    pub limit: i64,
    pub cursor: Option<FeedCursor>,
}

impl Default for FeedPagination {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            cursor: None,
        }
    }
}

impl TryFrom<FeedParams> for FeedPagination {
    type Error = ApiError;

    fn try_from(params: FeedParams) -> Result<Self, Self::Error> {
        let cursor = params
            .cursor
            .map(|s| {
                s.parse::<FeedCursor>()
                    .map_err(|_| ApiError::invalid_query("Invalid 'cursor' format"))
            })
            .transpose()?;

        Ok(FeedPagination {
            limit: params.limit.unwrap_or(DEFAULT_LIMIT),
            cursor,
        })
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for FeedPagination
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<FeedParams>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_query(e.to_string()))?;

        FeedPagination::try_from(params)
    }
}
