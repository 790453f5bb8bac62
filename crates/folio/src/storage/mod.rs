//! Storage backend implementations.
//!
//! - `sqlite`: the SQLite repository behind every gateway
//! - `cached`: memoizing decorators that the handlers talk to

pub mod cached;
pub mod sqlite;

pub use cached::{CachedFavourites, CachedGateway};
pub use sqlite::SqliteRepository;
