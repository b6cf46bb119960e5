/// Counters kept by a [`ResponseCache`](super::ResponseCache).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from the cache.
    pub hits: u64,
    /// Lookups that found nothing.
    pub misses: u64,
    /// Results written to the cache.
    pub stored: u64,
    /// Fenced writes refused because an invalidation overtook the read.
    pub rejected: u64,
    /// Point and full invalidations.
    pub invalidations: u64,
}

impl CacheStats {
    pub fn lookups(&self) -> u64 {
        self.hits + self.misses
    }
}
