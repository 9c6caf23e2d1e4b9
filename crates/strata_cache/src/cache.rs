//! The generation-gated cache.
//!
//! A cache owns a single mutable slot holding the *live generation*: the
//! generation token the map was created under plus the concurrent map
//! itself. Every lookup first compares the scope's current token with the
//! live one and swaps in a fresh, empty map when the scope has moved on.
//! The slot lock is held only for that comparison and swap; builders run
//! against a cloned `Arc` of the generation, so unrelated keys never wait
//! on each other and two threads racing on one key may both build.

use std::hash::Hash;
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::RwLock;
use strata_config::{CacheConfig, Retention};
use strata_project::{GenerationSource, GenerationToken};

use crate::reclaim::{Held, Reclaimable};
use crate::stats::{CacheStats, StatsCounters};

/// A concurrent `K -> V` map that is discarded as a whole whenever its
/// scope's generation advances.
///
/// Invariant: every entry in the live map was inserted while the scope's
/// current token equalled the map's token, or a newer one (see
/// [`get_or_try_create`](Self::get_or_try_create)). A thread that observes
/// generation `g` never sees an entry from a map older than `g`.
pub struct GenerationGatedCache<K, V: Reclaimable> {
    name: &'static str,
    retention: Retention,
    initial_capacity: usize,
    live: RwLock<Option<Arc<Generation<K, V>>>>,
    stats: StatsCounters,
}

struct Generation<K, V: Reclaimable> {
    token: GenerationToken,
    entries: DashMap<K, Held<V>>,
}

impl<K, V> GenerationGatedCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Reclaimable,
{
    /// Creates an empty cache. `name` identifies the cache in log events.
    pub fn new(name: &'static str, config: &CacheConfig) -> Self {
        Self {
            name,
            retention: config.retention,
            initial_capacity: config.initial_capacity,
            live: RwLock::new(None),
            stats: StatsCounters::default(),
        }
    }

    /// Returns the value cached for `key`, building it with `build` on a miss.
    ///
    /// `build` receives the token of the map its value will be published
    /// into. If `build` fails nothing is stored and the error is returned as is.
    /// When several threads build the same absent key at once, the first
    /// value stored wins and every caller, including the losers, returns it.
    ///
    /// A caller whose view of the scope is older than the live map (its
    /// token was read just before another thread advanced the slot) uses the
    /// live map: the slot never moves backwards.
    pub fn get_or_try_create<S, E, F>(&self, scope: &S, key: K, build: F) -> Result<V, E>
    where
        S: GenerationSource + ?Sized,
        F: FnOnce(&K, GenerationToken) -> Result<V, E>,
    {
        let generation = self.live_generation(scope.current_generation());

        if let Some(value) = generation.lookup(&key) {
            StatsCounters::bump(&self.stats.hits);
            tracing::trace!(cache = self.name, generation = %generation.token, "hit");
            return Ok(value);
        }

        StatsCounters::bump(&self.stats.misses);
        tracing::trace!(cache = self.name, generation = %generation.token, "miss");
        let built = build(&key, generation.token)?;
        StatsCounters::bump(&self.stats.builds);

        Ok(self.publish(&generation, key, built))
    }

    /// Infallible form of [`get_or_try_create`](Self::get_or_try_create).
    pub fn get_or_create<S, F>(&self, scope: &S, key: K, build: F) -> V
    where
        S: GenerationSource + ?Sized,
        F: FnOnce(&K) -> V,
    {
        match self.get_or_try_create::<S, std::convert::Infallible, _>(scope, key, |k, _| {
            Ok(build(k))
        }) {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }

    /// Returns the cached value for `key` without building or swapping maps.
    ///
    /// Answers `None` when the live map belongs to a different generation
    /// than the scope's current one.
    pub fn peek<S>(&self, scope: &S, key: &K) -> Option<V>
    where
        S: GenerationSource + ?Sized,
    {
        let token = scope.current_generation();
        let live = self.live.read().clone()?;
        if live.token != token {
            return None;
        }
        live.lookup(key)
    }

    /// Drops the live map without touching the generation, as a low-memory
    /// signal would. The next lookup starts from an empty map.
    pub fn reclaim(&self) {
        if let Some(dropped) = self.live.write().take() {
            StatsCounters::bump(&self.stats.reclaims);
            tracing::debug!(
                cache = self.name,
                generation = %dropped.token,
                entries = dropped.entries.len(),
                "reclaimed cache generation"
            );
        }
    }

    /// The token of the live map, if one exists.
    pub fn generation(&self) -> Option<GenerationToken> {
        self.live.read().as_ref().map(|live| live.token)
    }

    /// Number of entries in the live map whose values are still alive.
    pub fn len(&self) -> usize {
        self.live.read().as_ref().map_or(0, |live| {
            live.entries
                .iter()
                .filter(|entry| entry.value().restore().is_some())
                .count()
        })
    }

    /// Returns `true` if no live value is cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// A snapshot of the usage counters.
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot()
    }

    /// The live generation for `token`, replacing an older map if needed.
    fn live_generation(&self, token: GenerationToken) -> Arc<Generation<K, V>> {
        if let Some(live) = self.live.read().as_ref() {
            if live.token >= token {
                return Arc::clone(live);
            }
        }

        let mut slot = self.live.write();
        if let Some(live) = slot.as_ref().filter(|live| live.token >= token) {
            return Arc::clone(live);
        }
        if let Some(stale) = slot.as_ref() {
            StatsCounters::bump(&self.stats.discarded_generations);
            tracing::debug!(
                cache = self.name,
                old = %stale.token,
                new = %token,
                entries = stale.entries.len(),
                "discarding stale cache generation"
            );
        }
        let fresh = Arc::new(Generation {
            token,
            entries: DashMap::with_capacity(self.initial_capacity),
        });
        *slot = Some(Arc::clone(&fresh));
        fresh
    }

    /// Offers `value` for `key`; returns whichever value ends up stored.
    fn publish(&self, generation: &Generation<K, V>, key: K, value: V) -> V {
        match generation.entries.entry(key) {
            Entry::Occupied(mut occupied) => {
                if let Some(winner) = occupied.get().restore() {
                    StatsCounters::bump(&self.stats.lost_races);
                    tracing::trace!(cache = self.name, "lost build race");
                    return winner;
                }
                occupied.insert(Held::new(&value, self.retention));
                value
            }
            Entry::Vacant(vacant) => {
                vacant.insert(Held::new(&value, self.retention));
                value
            }
        }
    }
}

impl<K, V> Generation<K, V>
where
    K: Eq + Hash,
    V: Reclaimable,
{
    fn lookup(&self, key: &K) -> Option<V> {
        self.entries.get(key).and_then(|held| held.restore())
    }
}
