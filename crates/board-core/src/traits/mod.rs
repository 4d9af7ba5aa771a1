//! Repository traits (ports)

mod repositories;

pub use repositories::{FeedQuery, PostRepository, RepoResult, UserRepository, VoteRepository};
