//! Memoizing decorators over the storage gateways.

mod favourites;
mod gateway;

pub use favourites::CachedFavourites;
pub use gateway::CachedGateway;
