//! # board-client
//!
//! Client-side normalized cache for the board API.
//!
//! The cache holds two explicit containers: entity fragments keyed by
//! `(typename, id)` and query results keyed by `(field, arguments)`. Feed
//! pages are stored one entry per `(limit, cursor)` invocation and stitched
//! back into a single logical list by the pagination resolver; mutation
//! reconcilers patch the store directly from each mutation's response so no
//! refetch is needed to keep views consistent.
//!
//! All operations are synchronous and single-threaded relative to the UI's
//! event dispatch; the store takes `&mut self` and needs no locking.

pub mod error;
pub mod feed;
pub mod store;
pub mod updates;

pub use error::{inspect_error, SessionAction};
pub use feed::{resolve_feed, write_feed_page, FeedView, FEED_FIELD};
pub use store::{CacheStore, EntityKey, FieldLink, Fragment, QueryKey};
pub use updates::{
    apply_create_post, apply_delete_post, apply_vote, write_current_user, ME_FIELD,
};
