use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use super::Invalidate;

/// Counters describing how a [`MemoCache`] has been used.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub generation: u64,
}

/// A single memoized value with generation-checked population.
///
/// Readers call [`MemoCache::get_or_try_load`]. The generation is captured
/// before the loader runs and the loaded value is only stored if no
/// [`MemoCache::invalidate`] happened in between. The loader's own caller
/// still receives the value it loaded.
pub struct MemoCache<T> {
    slot: RwLock<Option<Arc<T>>>,
    generation: AtomicU64,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<T> Default for MemoCache<T> {
    fn default() -> Self {
        Self {
            slot: RwLock::new(None),
            generation: AtomicU64::new(0),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }
}

impl<T> MemoCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the memoized value, counting a hit or a miss.
    pub fn get(&self) -> Option<Arc<T>> {
        let value = self
            .slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        let counter = if value.is_some() {
            &self.hits
        } else {
            &self.misses
        };
        counter.fetch_add(1, Ordering::Relaxed);
        value
    }

    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Stores `value` if the cache is still at `generation`.
    ///
    /// The generation is compared under the write lock, and [`MemoCache::invalidate`]
    /// bumps it before taking that lock, so a stale value is either rejected
    /// here or cleared by the invalidation that made it stale.
    pub fn store(&self, value: Arc<T>, generation: u64) -> bool {
        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        if self.generation.load(Ordering::SeqCst) != generation {
            return false;
        }
        *slot = Some(value);
        true
    }

    /// Drops the memoized value and makes in-flight loads stale.
    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Returns the memoized value or runs `load` and memoizes its result.
    pub async fn get_or_try_load<F, Fut, E>(&self, load: F) -> Result<Arc<T>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Arc<T>, E>>,
    {
        if let Some(value) = self.get() {
            tracing::trace!("memo cache hit");
            return Ok(value);
        }

        let generation = self.generation();
        let value = load().await?;
        if !self.store(value.clone(), generation) {
            tracing::debug!(generation, "discarding load that raced with an invalidation");
        }
        Ok(value)
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            generation: self.generation(),
        }
    }
}

impl<T: Send + Sync> Invalidate for MemoCache<T> {
    fn invalidate(&self) {
        MemoCache::invalidate(self);
    }
}
