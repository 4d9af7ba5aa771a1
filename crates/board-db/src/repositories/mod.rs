//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in board-core.
//! Each repository handles database operations for a specific domain entity.

mod error;
mod post;
mod user;
mod vote;

pub use post::PgPostRepository;
pub use user::PgUserRepository;
pub use vote::PgVoteRepository;
