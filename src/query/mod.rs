//! Query cache module
//!
//! Wraps reads in a cache keyed by [`QueryKey`] with freshness windows,
//! coalescing of concurrent identical reads, stale-while-revalidate, and
//! invalidation by [`ResourceFamily`]. Writes are wrapped in [`Mutation`].

mod client;
mod entry;
mod gc;
mod invalidation;
mod key;
mod mutation;
mod policy;
mod state;

use std::collections::{HashMap, HashSet};

pub use client::QueryClient;
pub use entry::CachedValue;
pub use key::{QueryKey, ResourceFamily};
pub use mutation::Mutation;
pub use policy::{CachePolicies, CachePolicy, FRESHNESS_WINDOW, RESOURCE_RETENTION, USER_RETENTION};
pub use state::{MaybeEmpty, QueryState, QueryStatus};

pub(crate) use client::InFlight;
pub(crate) use entry::{CacheEntry, FetchFailure};

/// Shared cache map. Only [`QueryClient`] touches it, and never across an
/// `.await`.
#[derive(Default)]
pub(crate) struct QueryCache {
    /// Cached values by key
    pub(crate) entries: HashMap<QueryKey, CacheEntry>,
    /// Family → owned keys, so invalidation never scans every entry
    pub(crate) families: HashMap<ResourceFamily, HashSet<QueryKey>>,
    /// Fetches currently running, joined by identical reads
    pub(crate) in_flight: HashMap<QueryKey, InFlight>,
    /// Bumped on every invalidation of the family
    pub(crate) epochs: HashMap<ResourceFamily, u64>,
    /// Last failure per key, cleared by the next success
    pub(crate) errors: HashMap<QueryKey, FetchFailure>,
    pub(crate) next_fetch_id: u64,
}

impl QueryCache {
    pub(crate) fn insert(&mut self, key: QueryKey, entry: CacheEntry) {
        self.families
            .entry(key.family())
            .or_default()
            .insert(key.clone());
        self.entries.insert(key, entry);
    }

    pub(crate) fn remove(&mut self, key: &QueryKey) -> Option<CacheEntry> {
        if let Some(keys) = self.families.get_mut(&key.family()) {
            keys.remove(key);
        }
        self.errors.remove(key);
        self.entries.remove(key)
    }

    pub(crate) fn epoch(&self, family: ResourceFamily) -> u64 {
        self.epochs.get(&family).copied().unwrap_or(0)
    }

    pub(crate) fn allocate_fetch_id(&mut self) -> u64 {
        self.next_fetch_id += 1;
        self.next_fetch_id
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
        self.families.clear();
        self.errors.clear();
        for epoch in self.epochs.values_mut() {
            *epoch += 1;
        }
    }
}
