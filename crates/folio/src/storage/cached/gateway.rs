//! Cached gateway decorator.
//!
//! Wraps a `Gateway` implementation with a memoized `get_all`.

use std::sync::Arc;

use async_trait::async_trait;

use folio_core::cache::{Invalidate, MemoCache};
use folio_core::content::{compress_all, Entity, HasImage, ImageCompressor};
use folio_core::storage::{Gateway, RepositoryError, Result};

/// Cached gateway decorator.
///
/// - **Reads**: `get_all` is memoized with no key and no TTL; `get_by_key`
///   goes straight to the inner gateway
/// - **Writes**: persist through the inner gateway, then drop the memoized
///   results of this gateway and of every dependent
///
/// The compressed view is computed from the memoized base collection and
/// memoized on its own, so both are dropped together.
pub struct CachedGateway<E: Entity> {
    inner: Arc<dyn Gateway<E>>,
    all: MemoCache<Vec<E>>,
    compressed: MemoCache<Vec<E>>,
    compressor: Option<Arc<dyn ImageCompressor>>,
    dependents: Vec<Arc<dyn Invalidate>>,
}

impl<E: Entity> CachedGateway<E> {
    pub fn new(inner: Arc<dyn Gateway<E>>) -> Self {
        Self {
            inner,
            all: MemoCache::new(),
            compressed: MemoCache::new(),
            compressor: None,
            dependents: Vec::new(),
        }
    }

    /// Compress images in [`CachedGateway::get_all_compressed`].
    pub fn with_compressor(mut self, compressor: Arc<dyn ImageCompressor>) -> Self {
        self.compressor = Some(compressor);
        self
    }

    /// Invalidate `dependent` whenever this gateway is written to.
    ///
    /// Used where another cache embeds data from this table.
    pub fn invalidates(mut self, dependent: Arc<dyn Invalidate>) -> Self {
        self.dependents.push(dependent);
        self
    }

    /// Runs after every write, whatever its outcome.
    fn written<T>(&self, result: Result<T>) -> Result<T> {
        self.invalidate();
        result
    }
}

impl<E: Entity + HasImage> CachedGateway<E> {
    /// Every entity with its image downsized. Without a compressor this is
    /// the same collection as `get_all`.
    pub async fn get_all_compressed(&self) -> Result<Arc<Vec<E>>> {
        let Some(compressor) = self.compressor.clone() else {
            return self.get_all().await;
        };

        self.compressed
            .get_or_try_load(|| async move {
                let base = self.get_all().await?;
                tracing::debug!(entity = E::KIND, count = base.len(), "compressing images");
                let compressed = tokio::task::spawn_blocking(move || {
                    compress_all(base.as_slice(), compressor.as_ref())
                })
                .await
                .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;
                Ok(Arc::new(compressed))
            })
            .await
    }
}

impl<E: Entity> Invalidate for CachedGateway<E> {
    fn invalidate(&self) {
        let stats = self.all.stats();
        self.all.invalidate();
        self.compressed.invalidate();
        tracing::debug!(
            entity = E::KIND,
            hits = stats.hits,
            misses = stats.misses,
            "cache invalidated"
        );
        for dependent in &self.dependents {
            dependent.invalidate();
        }
    }
}

#[async_trait]
impl<E: Entity> Gateway<E> for CachedGateway<E> {
    async fn save(&self, entity: &E) -> Result<bool> {
        let result = self.inner.save(entity).await;
        self.written(result)
    }

    async fn update(&self, entity: &E) -> Result<bool> {
        let result = self.inner.update(entity).await;
        self.written(result)
    }

    async fn get_by_key(&self, key: &str) -> Result<Option<E>> {
        self.inner.get_by_key(key).await
    }

    async fn get_all(&self) -> Result<Arc<Vec<E>>> {
        self.all
            .get_or_try_load(|| async {
                tracing::debug!(entity = E::KIND, "cache miss, loading from storage");
                self.inner.get_all().await
            })
            .await
    }

    async fn delete_by_key(&self, key: &str) -> Result<bool> {
        let result = self.inner.delete_by_key(key).await;
        self.written(result)
    }
}
