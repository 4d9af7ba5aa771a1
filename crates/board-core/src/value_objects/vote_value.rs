//! Vote value - the two-valued vote polarity
//!
//! There is no "retract vote" state: any raw value other than `-1` is an
//! upvote. This is an intentional policy, not input sanitization.

use std::fmt;

/// Signed vote polarity: exactly `+1` or `-1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VoteValue {
    Up,
    Down,
}

impl VoteValue {
    /// Normalize a raw client-supplied value. Anything that is not `-1`
    /// counts as an upvote.
    #[inline]
    pub const fn from_raw(raw: i32) -> Self {
        if raw == -1 {
            Self::Down
        } else {
            Self::Up
        }
    }

    /// Reconstruct from a stored column value.
    ///
    /// The votes table only ever holds `1` or `-1`; anything else maps to
    /// `Up` through the same normalization as raw input.
    #[inline]
    pub const fn from_stored(value: i16) -> Self {
        Self::from_raw(value as i32)
    }

    /// The signed contribution of this vote to a post's score.
    #[inline]
    pub const fn as_i32(self) -> i32 {
        match self {
            Self::Up => 1,
            Self::Down => -1,
        }
    }

    /// Column representation for storage.
    #[inline]
    pub const fn as_i16(self) -> i16 {
        self.as_i32() as i16
    }

    /// Score delta when this vote replaces its opposite: the single
    /// adjustment removes the old contribution and adds the new one.
    #[inline]
    pub const fn switch_delta(self) -> i32 {
        2 * self.as_i32()
    }
}

impl fmt::Display for VoteValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_i32())
    }
}
