//! Entity to model mappers
//!
//! This module provides conversions from database models (rows) to domain
//! entities (board-core). Inserts bind entity fields directly, so there is no
//! separate insert-struct layer here.

mod post;
mod user;
mod vote;
