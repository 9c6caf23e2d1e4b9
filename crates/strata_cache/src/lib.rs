//! Generation-gated memoization.
//!
//! This crate provides [`GenerationGatedCache`], a concurrent key/value cache
//! bound to a scope's [`GenerationToken`](strata_project::GenerationToken).
//! Whenever the scope's generation advances the whole map is discarded and
//! lazily recreated; entries are never invalidated one by one. Values may
//! also be reclaimed at any time (see [`Reclaimable`]), so a miss is always
//! a normal outcome that leads to a rebuild.

#![warn(missing_docs)]

pub mod cache;
pub mod reclaim;
pub mod stats;

pub use cache::GenerationGatedCache;
pub use reclaim::Reclaimable;
pub use stats::CacheStats;
pub use strata_config::{CacheConfig, Retention};
