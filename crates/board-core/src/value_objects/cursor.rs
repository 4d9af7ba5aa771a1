//! Feed cursor - opaque position marker for cursor-based pagination
//!
//! Encodes "resume strictly before this point" as a composite of the post's
//! creation timestamp and its id. The id tie-break keeps the ordering total
//! even when two posts share a timestamp, so a page boundary can never drop
//! or duplicate an item.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Hard cap on feed page size, enforced server-side regardless of the
/// requested limit.
pub const MAX_FEED_LIMIT: i64 = 50;

/// Composite pagination cursor: `(created_at, id)`, compared descending.
///
/// The wire format is `<micros>:<id>` and must be treated as opaque by
/// clients; it round-trips through [`fmt::Display`] and [`std::str::FromStr`].
/// Microsecond precision matches the storage engine's timestamp resolution,
/// so encoding is lossless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FeedCursor {
    pub created_at: DateTime<Utc>,
    pub id: i64,
}

impl FeedCursor {
    /// Create a cursor marking the given position.
    pub const fn new(created_at: DateTime<Utc>, id: i64) -> Self {
        Self { created_at, id }
    }

    /// Microsecond timestamp component of the cursor.
    #[inline]
    pub fn timestamp_micros(&self) -> i64 {
        self.created_at.timestamp_micros()
    }
}

impl fmt::Display for FeedCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.timestamp_micros(), self.id)
    }
}

/// Error when parsing a cursor from its wire format
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CursorParseError {
    #[error("invalid cursor format")]
    InvalidFormat,
}

impl std::str::FromStr for FeedCursor {
    type Err = CursorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (micros, id) = s.split_once(':').ok_or(CursorParseError::InvalidFormat)?;
        let micros: i64 = micros.parse().map_err(|_| CursorParseError::InvalidFormat)?;
        let id: i64 = id.parse().map_err(|_| CursorParseError::InvalidFormat)?;
        let created_at =
            DateTime::from_timestamp_micros(micros).ok_or(CursorParseError::InvalidFormat)?;
        Ok(Self { created_at, id })
    }
}

// Serialize as the opaque wire string
impl Serialize for FeedCursor {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for FeedCursor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
