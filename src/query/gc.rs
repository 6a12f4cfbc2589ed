//! Eviction of idle entries for QueryCache

use tokio::time::Instant;

use super::{CachePolicies, QueryCache, QueryKey};

impl QueryCache {
    /// Evict entries idle for longer than their family's retention window,
    /// then failures of keys with no cached value once they are as old.
    ///
    /// Keys with a fetch in flight are kept. Returns the number of keys
    /// evicted.
    pub(crate) fn collect_garbage(&mut self, now: Instant, policies: &CachePolicies) -> usize {
        let expired: Vec<QueryKey> = self
            .entries
            .iter()
            .filter(|(key, entry)| {
                policies.for_family(key.family()).is_expired(entry.idle(now))
                    && !self.in_flight.contains_key(*key)
            })
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            tracing::debug!(key = %key, "evicting idle cache entry");
            self.remove(key);
        }

        let orphaned: Vec<QueryKey> = self
            .errors
            .iter()
            .filter(|(key, failure)| {
                !self.entries.contains_key(*key)
                    && !self.in_flight.contains_key(*key)
                    && policies.for_family(key.family()).is_expired(failure.idle(now))
            })
            .map(|(key, _)| key.clone())
            .collect();

        for key in &orphaned {
            tracing::debug!(key = %key, "dropping expired fetch failure");
            self.errors.remove(key);
        }

        expired.len() + orphaned.len()
    }
}

#[cfg(test)]
mod tests {
    use crate::error::ClientError;
    use crate::query::{
        CacheEntry, CachePolicies, FetchFailure, QueryCache, QueryKey, ResourceFamily,
        RESOURCE_RETENTION,
    };
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_retention_differs_by_family() {
        let mut cache = QueryCache::default();
        let user = QueryKey::new(ResourceFamily::Users).with(1);
        let post = QueryKey::new(ResourceFamily::Posts).with(1);
        let now = Instant::now();
        cache.insert(user.clone(), CacheEntry::new(Arc::new(1u8), 1, now, false));
        cache.insert(post.clone(), CacheEntry::new(Arc::new(1u8), 2, now, false));

        tokio::time::advance(Duration::from_secs(11 * 60)).await;
        let evicted = cache.collect_garbage(Instant::now(), &CachePolicies::default());

        assert_eq!(evicted, 1);
        assert!(cache.entries.contains_key(&user));
        assert!(!cache.entries.contains_key(&post));

        tokio::time::advance(Duration::from_secs(5 * 60)).await;
        cache.collect_garbage(Instant::now(), &CachePolicies::default());
        assert!(cache.entries.is_empty());
    }

    fn failure(now: Instant) -> FetchFailure {
        FetchFailure::new(
            ClientError::Configuration {
                message: "unreachable".into(),
            },
            now,
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_failures_without_entry_expire() {
        let mut cache = QueryCache::default();
        let now = Instant::now();
        for i in 0..3 {
            let key = QueryKey::new(ResourceFamily::Users).with("search").with(i);
            cache.errors.insert(key, failure(now));
        }

        tokio::time::advance(Duration::from_secs(60)).await;
        assert_eq!(cache.collect_garbage(Instant::now(), &CachePolicies::default()), 0);
        assert_eq!(cache.errors.len(), 3);

        tokio::time::advance(Duration::from_secs(60 * 60)).await;
        assert_eq!(cache.collect_garbage(Instant::now(), &CachePolicies::default()), 3);
        assert!(cache.errors.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_kept_while_entry_cached() {
        let mut cache = QueryCache::default();
        let key = QueryKey::new(ResourceFamily::Posts).with(1);
        let now = Instant::now();
        cache.insert(key.clone(), CacheEntry::new(Arc::new(1u8), 1, now, false));
        cache.errors.insert(key.clone(), failure(now));

        tokio::time::advance(RESOURCE_RETENTION / 2).await;
        cache.entries.get_mut(&key).unwrap().touch(Instant::now());
        tokio::time::advance(RESOURCE_RETENTION / 2 + Duration::from_secs(1)).await;
        cache.collect_garbage(Instant::now(), &CachePolicies::default());
        assert!(cache.errors.contains_key(&key));

        tokio::time::advance(RESOURCE_RETENTION).await;
        assert_eq!(cache.collect_garbage(Instant::now(), &CachePolicies::default()), 1);
        assert!(cache.errors.is_empty());
        assert!(cache.entries.is_empty());
    }
}
