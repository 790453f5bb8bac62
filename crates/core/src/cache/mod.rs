//! Explicit read caches for zero-argument gateway reads.
//!
//! A [`MemoCache`] holds one memoized value guarded by a generation counter.
//! Invalidation bumps the generation, so a load that started before a write
//! can never publish its pre-write result.

mod memo;
mod traits;

pub use memo::{CacheStats, MemoCache};
pub use traits::Invalidate;
