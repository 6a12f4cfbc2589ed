//! Freshness and retention windows.

use std::time::Duration;

use super::ResourceFamily;

/// Data younger than this is served without a network call.
pub const FRESHNESS_WINDOW: Duration = Duration::from_secs(5 * 60);

/// Retention for users after last use (15 minutes).
pub const USER_RETENTION: Duration = Duration::from_secs(15 * 60);

/// Retention for posts, friendships and timeline after last use (10 minutes).
pub const RESOURCE_RETENTION: Duration = Duration::from_secs(10 * 60);

/// Staleness and garbage-collection windows for one family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    /// Age after which an entry is stale and revalidated in the background
    pub stale_time: Duration,
    /// Idle time after which an entry is evicted
    pub gc_time: Duration,
}

impl CachePolicy {
    pub const fn new(stale_time: Duration, gc_time: Duration) -> Self {
        Self {
            stale_time,
            gc_time,
        }
    }

    pub fn is_fresh(&self, age: Duration) -> bool {
        age < self.stale_time
    }

    pub fn is_expired(&self, idle: Duration) -> bool {
        idle >= self.gc_time
    }
}

/// Per-family policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicies {
    pub users: CachePolicy,
    /// Posts, friendships and both timeline families
    pub resources: CachePolicy,
}

impl Default for CachePolicies {
    fn default() -> Self {
        Self {
            users: CachePolicy::new(FRESHNESS_WINDOW, USER_RETENTION),
            resources: CachePolicy::new(FRESHNESS_WINDOW, RESOURCE_RETENTION),
        }
    }
}

impl CachePolicies {
    /// One policy for every family.
    pub fn uniform(policy: CachePolicy) -> Self {
        Self {
            users: policy,
            resources: policy,
        }
    }

    pub fn for_family(&self, family: ResourceFamily) -> CachePolicy {
        match family {
            ResourceFamily::Users => self.users,
            ResourceFamily::Posts
            | ResourceFamily::Friendships
            | ResourceFamily::Timeline
            | ResourceFamily::TimelineCount => self.resources,
        }
    }
}
