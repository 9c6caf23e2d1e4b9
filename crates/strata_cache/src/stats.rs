//! Cache usage counters.

use std::sync::atomic::{AtomicU64, Ordering};

/// A snapshot of a cache's usage counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from the live map.
    pub hits: u64,
    /// Lookups that found no live entry.
    pub misses: u64,
    /// Builder invocations that returned a value.
    pub builds: u64,
    /// Builds whose result was dropped because another thread stored first.
    pub lost_races: u64,
    /// Generation maps discarded because the scope's generation advanced.
    pub discarded_generations: u64,
    /// Live maps dropped through [`reclaim`](crate::GenerationGatedCache::reclaim).
    pub reclaims: u64,
}

impl CacheStats {
    /// Fraction of lookups answered from the cache (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct StatsCounters {
    pub(crate) hits: AtomicU64,
    pub(crate) misses: AtomicU64,
    pub(crate) builds: AtomicU64,
    pub(crate) lost_races: AtomicU64,
    pub(crate) discarded_generations: AtomicU64,
    pub(crate) reclaims: AtomicU64,
}

impl StatsCounters {
    pub(crate) fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            builds: self.builds.load(Ordering::Relaxed),
            lost_races: self.lost_races.load(Ordering::Relaxed),
            discarded_generations: self.discarded_generations.load(Ordering::Relaxed),
            reclaims: self.reclaims.load(Ordering::Relaxed),
        }
    }
}
