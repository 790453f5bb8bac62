/// Something whose memoized reads can be discarded after a write.
pub trait Invalidate: Send + Sync {
    fn invalidate(&self);
}
