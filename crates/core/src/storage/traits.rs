use std::sync::Arc;

use async_trait::async_trait;

use crate::content::{Entity, FavouritePicture, User};

use super::Result;

/// Owns all persistence access for one entity type.
///
/// Writes return `Ok(false)` when no row was affected (for `update` and
/// `delete_by_key` that means the key does not exist). A unique key clash
/// on `save` or `update` is reported as [`super::RepositoryError::AlreadyExists`].
#[async_trait]
pub trait Gateway<E: Entity>: Send + Sync {
    /// Inserts a new entity.
    async fn save(&self, entity: &E) -> Result<bool>;

    /// Updates the entity addressed by its natural key.
    async fn update(&self, entity: &E) -> Result<bool>;

    /// Gets an entity by its natural key.
    async fn get_by_key(&self, key: &str) -> Result<Option<E>>;

    /// Gets every entity in the type's display order.
    async fn get_all(&self) -> Result<Arc<Vec<E>>>;

    /// Deletes the entity addressed by its natural key.
    async fn delete_by_key(&self, key: &str) -> Result<bool>;
}

/// User lookups needed by the authorization gate.
#[async_trait]
pub trait UserGateway: Gateway<User> {
    async fn get_by_id(&self, id: i64) -> Result<Option<User>>;

    async fn count(&self) -> Result<u64>;
}

/// The curated list of pictures shown on the home page.
#[async_trait]
pub trait FavouriteGateway: Send + Sync {
    /// Atomically replaces the favourites with the pictures titled `titles`.
    ///
    /// Fails with `NotFound` naming the first unknown title, leaving the
    /// previous favourites untouched.
    async fn replace_all(&self, titles: &[String]) -> Result<bool>;

    /// Gets every favourite, oldest selection first.
    async fn get_all(&self) -> Result<Arc<Vec<FavouritePicture>>>;
}
