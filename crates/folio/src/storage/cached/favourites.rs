//! Cached favourites decorator.

use std::sync::Arc;

use async_trait::async_trait;

use folio_core::cache::{Invalidate, MemoCache};
use folio_core::content::{compress_all, FavouritePicture, ImageCompressor};
use folio_core::storage::{FavouriteGateway, RepositoryError, Result};

/// Memoizes the home page favourites.
///
/// Favourites embed picture and category data, so the picture and category
/// gateways invalidate this cache on their writes.
pub struct CachedFavourites {
    inner: Arc<dyn FavouriteGateway>,
    all: MemoCache<Vec<FavouritePicture>>,
    compressed: MemoCache<Vec<FavouritePicture>>,
    compressor: Option<Arc<dyn ImageCompressor>>,
}

impl CachedFavourites {
    pub fn new(inner: Arc<dyn FavouriteGateway>) -> Self {
        Self {
            inner,
            all: MemoCache::new(),
            compressed: MemoCache::new(),
            compressor: None,
        }
    }

    pub fn with_compressor(mut self, compressor: Arc<dyn ImageCompressor>) -> Self {
        self.compressor = Some(compressor);
        self
    }

    pub async fn get_all_compressed(&self) -> Result<Arc<Vec<FavouritePicture>>> {
        let Some(compressor) = self.compressor.clone() else {
            return self.get_all().await;
        };

        self.compressed
            .get_or_try_load(|| async move {
                let base = self.get_all().await?;
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

impl Invalidate for CachedFavourites {
    fn invalidate(&self) {
        let stats = self.all.stats();
        self.all.invalidate();
        self.compressed.invalidate();
        tracing::debug!(
            entity = "FavouritePicture",
            hits = stats.hits,
            misses = stats.misses,
            "cache invalidated"
        );
    }
}

#[async_trait]
impl FavouriteGateway for CachedFavourites {
    async fn replace_all(&self, titles: &[String]) -> Result<bool> {
        let result = self.inner.replace_all(titles).await;
        self.invalidate();
        result
    }

    async fn get_all(&self) -> Result<Arc<Vec<FavouritePicture>>> {
        self.all
            .get_or_try_load(|| async {
                tracing::debug!(entity = "FavouritePicture", "cache miss, loading from storage");
                self.inner.get_all().await
            })
            .await
    }
}
