//! Value objects - immutable domain values

mod cursor;
mod vote_value;

pub use cursor::{CursorParseError, FeedCursor, MAX_FEED_LIMIT};
pub use vote_value::VoteValue;
