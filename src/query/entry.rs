//! Cached values and their bookkeeping.

use std::any::Any;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;

use crate::error::{ClientError, ClientResult};

use super::QueryKey;

/// Type-erased cached value. Every family stores its own record type.
pub type CachedValue = Arc<dyn Any + Send + Sync>;

/// One cached read result.
#[derive(Clone)]
pub(crate) struct CacheEntry {
    pub(crate) value: CachedValue,
    /// Id of the fetch that produced this value; later fetches win
    pub(crate) fetch_id: u64,
    pub(crate) fetched_at: Instant,
    pub(crate) last_accessed: Instant,
    /// Set by invalidation; the next read re-fetches and waits for it
    pub(crate) invalidated: bool,
}

impl CacheEntry {
    pub(crate) fn new(value: CachedValue, fetch_id: u64, now: Instant, invalidated: bool) -> Self {
        Self {
            value,
            fetch_id,
            fetched_at: now,
            last_accessed: now,
            invalidated,
        }
    }

    pub(crate) fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.fetched_at)
    }

    pub(crate) fn idle(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.last_accessed)
    }

    pub(crate) fn touch(&mut self, now: Instant) {
        self.last_accessed = now;
    }
}

/// Last failed fetch for a key.
///
/// Cleared by the next success. Kept past retention only while the key has
/// a cached value or a fetch running.
#[derive(Debug, Clone)]
pub(crate) struct FetchFailure {
    pub(crate) error: ClientError,
    pub(crate) failed_at: Instant,
}

impl FetchFailure {
    pub(crate) fn new(error: ClientError, now: Instant) -> Self {
        Self {
            error,
            failed_at: now,
        }
    }

    pub(crate) fn idle(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.failed_at)
    }
}

impl std::fmt::Debug for CacheEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheEntry")
            .field("fetch_id", &self.fetch_id)
            .field("fetched_at", &self.fetched_at)
            .field("last_accessed", &self.last_accessed)
            .field("invalidated", &self.invalidated)
            .finish_non_exhaustive()
    }
}

/// Recover the concrete record type stored under `key`.
pub(crate) fn downcast<T: Clone + 'static>(key: &QueryKey, value: &CachedValue) -> ClientResult<T> {
    value
        .downcast_ref::<T>()
        .cloned()
        .ok_or_else(|| ClientError::TypeMismatch {
            key: key.to_string(),
        })
}
