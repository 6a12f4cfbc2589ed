//! The query client: cached, coalesced reads.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};

use futures::future::{BoxFuture, FutureExt, Shared};
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::error::ClientResult;

use super::entry::downcast;
use super::{
    CacheEntry, CachePolicies, CachedValue, FetchFailure, QueryCache, QueryKey, QueryState,
    ResourceFamily,
};

type SharedFetch = Shared<BoxFuture<'static, ClientResult<CachedValue>>>;

/// A running fetch that identical reads attach to.
#[derive(Clone)]
pub(crate) struct InFlight {
    id: u64,
    /// Family epoch when the fetch started
    epoch: u64,
    future: SharedFetch,
}

/// Cache for read operations.
///
/// Cloning is cheap; clones share one cache.
///
/// # Read lifecycle
///
/// | Entry | Result |
/// |-------|--------|
/// | fresh | cached value, no call |
/// | stale | cached value, one background refresh |
/// | missing or invalidated | wait for a fetch (joining one in flight) |
#[derive(Clone)]
pub struct QueryClient {
    cache: Arc<Mutex<QueryCache>>,
    policies: CachePolicies,
}

impl QueryClient {
    pub fn new(policies: CachePolicies) -> Self {
        Self {
            cache: Arc::new(Mutex::new(QueryCache::default())),
            policies,
        }
    }

    pub fn policies(&self) -> &CachePolicies {
        &self.policies
    }

    fn lock(&self) -> MutexGuard<'_, QueryCache> {
        lock_cache(&self.cache)
    }

    /// Read `key` through the cache, calling `fetcher` only when needed.
    ///
    /// The fetcher is invoked at most once per call and only when this call
    /// is the one that starts a fetch.
    pub async fn fetch<T, F, Fut>(&self, key: QueryKey, fetcher: F) -> ClientResult<T>
    where
        T: Clone + Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = ClientResult<T>> + Send + 'static,
    {
        let policy = self.policies.for_family(key.family());

        let pending = {
            let mut guard = self.lock();
            let cache = &mut *guard;
            let now = Instant::now();
            cache.collect_garbage(now, &self.policies);

            let cached = cache.entries.get_mut(&key).map(|entry| {
                entry.touch(now);
                (
                    entry.value.clone(),
                    entry.invalidated,
                    policy.is_fresh(entry.age(now)),
                )
            });

            match cached {
                Some((value, false, true)) => {
                    debug!(key = %key, "cache hit");
                    return downcast(&key, &value);
                }
                Some((value, false, false)) => {
                    if !cache.in_flight.contains_key(&key) {
                        debug!(key = %key, "stale, revalidating in background");
                        let refresh = self.start_fetch(cache, key.clone(), fetcher);
                        tokio::spawn(refresh);
                    }
                    return downcast(&key, &value);
                }
                _ => {
                    let epoch = cache.epoch(key.family());
                    let running = cache
                        .in_flight
                        .get(&key)
                        .filter(|f| f.epoch == epoch)
                        .map(|f| f.future.clone());
                    match running {
                        Some(future) => {
                            debug!(key = %key, "joining in-flight fetch");
                            future
                        }
                        None => self.start_fetch(cache, key.clone(), fetcher),
                    }
                }
            }
        };

        let value = pending.await?;
        downcast(&key, &value)
    }

    /// Like [`fetch`](Self::fetch) but reports the outcome as a view state.
    ///
    /// On failure the previously cached value, if any, stays in `data`.
    pub async fn query<T, F, Fut>(&self, key: QueryKey, fetcher: F) -> QueryState<T>
    where
        T: Clone + Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = ClientResult<T>> + Send + 'static,
    {
        match self.fetch(key.clone(), fetcher).await {
            Ok(data) => QueryState::success(data),
            Err(error) => QueryState::failed(self.peek(&key), error),
        }
    }

    fn start_fetch<T, F, Fut>(&self, cache: &mut QueryCache, key: QueryKey, fetcher: F) -> SharedFetch
    where
        T: Clone + Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = ClientResult<T>> + Send + 'static,
    {
        let id = cache.allocate_fetch_id();
        let epoch = cache.epoch(key.family());
        let store = Arc::clone(&self.cache);
        let request = fetcher();
        let task_key = key.clone();

        let future = async move {
            debug!(key = %task_key, "fetching");
            let result = request
                .await
                .map(|value| Arc::new(value) as CachedValue);
            complete_fetch(&store, &task_key, id, epoch, &result);
            result
        }
        .boxed()
        .shared();

        cache.in_flight.insert(
            key,
            InFlight {
                id,
                epoch,
                future: future.clone(),
            },
        );
        future
    }

    /// Snapshot of `key` for the view without triggering a fetch.
    pub fn state<T: Clone + 'static>(&self, key: &QueryKey) -> QueryState<T> {
        let cache = self.lock();
        let data = cache
            .entries
            .get(key)
            .and_then(|entry| downcast::<T>(key, &entry.value).ok());
        QueryState {
            data,
            is_loading: cache.in_flight.contains_key(key),
            error: cache.errors.get(key).map(|failure| failure.error.clone()),
            enabled: true,
        }
    }

    /// Cached value for `key`, fresh or not.
    pub fn peek<T: Clone + 'static>(&self, key: &QueryKey) -> Option<T> {
        let cache = self.lock();
        cache
            .entries
            .get(key)
            .and_then(|entry| downcast::<T>(key, &entry.value).ok())
    }

    /// Mark every entry of `family` stale; the next read re-fetches.
    pub fn invalidate(&self, family: ResourceFamily) -> usize {
        let marked = self.lock().invalidate(family);
        debug!(family = %family, marked, "invalidated family");
        marked
    }

    pub fn invalidate_all(&self) {
        let mut cache = self.lock();
        for family in ResourceFamily::ALL {
            cache.invalidate(family);
        }
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn remove(&self, key: &QueryKey) -> bool {
        self.lock().remove(key).is_some()
    }

    pub fn contains(&self, key: &QueryKey) -> bool {
        self.lock().entries.contains_key(key)
    }

    /// True when `key` is cached but past its freshness window or invalidated.
    pub fn is_stale(&self, key: &QueryKey) -> bool {
        let cache = self.lock();
        let policy = self.policies.for_family(key.family());
        cache
            .entries
            .get(key)
            .is_some_and(|e| e.invalidated || !policy.is_fresh(e.age(Instant::now())))
    }

    pub fn is_fetching(&self, key: &QueryKey) -> bool {
        self.lock().in_flight.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Evict idle entries and expired failures now instead of on the next read.
    pub fn collect_garbage(&self) -> usize {
        self.lock().collect_garbage(Instant::now(), &self.policies)
    }
}

impl Default for QueryClient {
    fn default() -> Self {
        Self::new(CachePolicies::default())
    }
}

impl std::fmt::Debug for QueryClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cache = self.lock();
        f.debug_struct("QueryClient")
            .field("entries", &cache.entries.len())
            .field("in_flight", &cache.in_flight.len())
            .field("policies", &self.policies)
            .finish()
    }
}

fn lock_cache(cache: &Mutex<QueryCache>) -> MutexGuard<'_, QueryCache> {
    cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Record a finished fetch. A result from a fetch superseded by a newer one
/// is returned to its callers but not stored.
fn complete_fetch(
    store: &Mutex<QueryCache>,
    key: &QueryKey,
    id: u64,
    epoch: u64,
    result: &ClientResult<CachedValue>,
) {
    let mut cache = lock_cache(store);
    if cache.in_flight.get(key).is_some_and(|f| f.id == id) {
        cache.in_flight.remove(key);
    }

    match result {
        Ok(value) => {
            if cache.entries.get(key).is_some_and(|e| e.fetch_id > id) {
                return;
            }
            let invalidated = cache.epoch(key.family()) != epoch;
            cache.insert(
                key.clone(),
                CacheEntry::new(value.clone(), id, Instant::now(), invalidated),
            );
            cache.errors.remove(key);
        }
        Err(err) => {
            warn!(key = %key, error = %err, "fetch failed");
            cache
                .errors
                .insert(key.clone(), FetchFailure::new(err.clone(), Instant::now()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ClientError, NetworkError};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn counted(calls: &Arc<AtomicUsize>, value: u64) -> impl Future<Output = ClientResult<u64>> + Send + 'static {
        let calls = Arc::clone(calls);
        async move {
            calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(50)).await;
            Ok(value)
        }
    }

    fn key() -> QueryKey {
        QueryKey::new(ResourceFamily::Posts).with(1)
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_reads_coalesce() {
        let client = QueryClient::default();
        let calls = Arc::new(AtomicUsize::new(0));

        let (a, b) = tokio::join!(
            client.fetch(key(), || counted(&calls, 1)),
            client.fetch(key(), || counted(&calls, 2)),
        );

        assert_eq!(a.unwrap(), 1);
        assert_eq!(b.unwrap(), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(!client.is_fetching(&key()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_fresh_entry_skips_fetch() {
        let client = QueryClient::default();
        let calls = Arc::new(AtomicUsize::new(0));

        client.fetch(key(), || counted(&calls, 1)).await.unwrap();
        tokio::time::advance(Duration::from_secs(60)).await;
        let value = client.fetch(key(), || counted(&calls, 2)).await.unwrap();

        assert_eq!(value, 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_entry_served_then_refreshed_once() {
        let client = QueryClient::default();
        let calls = Arc::new(AtomicUsize::new(0));

        client.fetch(key(), || counted(&calls, 1)).await.unwrap();
        tokio::time::advance(Duration::from_secs(6 * 60)).await;

        let first = client.fetch(key(), || counted(&calls, 2)).await.unwrap();
        let second = client.fetch(key(), || counted(&calls, 3)).await.unwrap();
        assert_eq!(first, 1);
        assert_eq!(second, 1);
        assert!(client.is_fetching(&key()));

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(client.peek::<u64>(&key()), Some(2));
        assert!(!client.is_stale(&key()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalidated_entry_waits_for_refetch() {
        let client = QueryClient::default();
        let calls = Arc::new(AtomicUsize::new(0));

        client.fetch(key(), || counted(&calls, 1)).await.unwrap();
        assert_eq!(client.invalidate(ResourceFamily::Posts), 1);
        assert!(client.is_stale(&key()));

        let value = client.fetch(key(), || counted(&calls, 2)).await.unwrap();
        assert_eq!(value, 2);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_running_across_invalidation_is_not_trusted() {
        let client = QueryClient::default();
        let calls = Arc::new(AtomicUsize::new(0));

        let early = {
            let client = client.clone();
            let calls = Arc::clone(&calls);
            tokio::spawn(async move { client.fetch(key(), || counted(&calls, 1)).await })
        };
        tokio::task::yield_now().await;
        client.invalidate(ResourceFamily::Posts);

        let late = client.fetch(key(), || counted(&calls, 2)).await.unwrap();
        assert_eq!(late, 2);
        assert_eq!(early.await.unwrap().unwrap(), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(client.peek::<u64>(&key()), Some(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_keeps_previous_data() {
        let client = QueryClient::default();
        client.fetch(key(), || async { Ok(5u64) }).await.unwrap();
        client.invalidate(ResourceFamily::Posts);

        let state: QueryState<u64> = client
            .query(key(), || async {
                Err(NetworkError::HttpStatus {
                    status: 500,
                    message: "boom".into(),
                }
                .into())
            })
            .await;

        assert_eq!(state.data, Some(5));
        assert_eq!(state.error.and_then(|e| e.status()), Some(500));
        assert!(client.state::<u64>(&key()).error.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_fetch_is_shared_by_waiters() {
        let client = QueryClient::default();
        let calls = Arc::new(AtomicUsize::new(0));
        let failing = |calls: &Arc<AtomicUsize>| {
            let calls = Arc::clone(calls);
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(10)).await;
                Err::<u64, ClientError>(ClientError::Configuration {
                    message: "nope".into(),
                })
            }
        };

        let (a, b) = tokio::join!(
            client.fetch(key(), || failing(&calls)),
            client.fetch(key(), || failing(&calls)),
        );
        assert!(a.is_err());
        assert!(b.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(!client.contains(&key()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_entries_are_collected_on_access() {
        let client = QueryClient::default();
        client.fetch(key(), || async { Ok(1u64) }).await.unwrap();
        assert_eq!(client.len(), 1);

        tokio::time::advance(Duration::from_secs(10 * 60)).await;
        let other = QueryKey::new(ResourceFamily::Users).with(9);
        client.fetch(other.clone(), || async { Ok(2u64) }).await.unwrap();

        assert!(!client.contains(&key()));
        assert!(client.contains(&other));
    }

    #[tokio::test]
    async fn test_type_mismatch_reported() {
        let client = QueryClient::default();
        client.fetch(key(), || async { Ok(1u64) }).await.unwrap();
        let result = client.fetch(key(), || async { Ok(String::new()) }).await;
        assert!(matches!(result, Err(ClientError::TypeMismatch { .. })));
    }
}
