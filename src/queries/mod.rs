//! Typed reads and writes over the resource client and the query cache.
//!
//! Reads take the required parameters as `Option`; a missing one disables
//! the read (no call, placeholder data, [`QueryStatus::Idle`]). Writes
//! validate locally, call the API, and on success invalidate the affected
//! families:
//!
//! | Write | Invalidates |
//! |-------|-------------|
//! | create/update user | users |
//! | delete user | everything |
//! | create/update/delete post | posts, timeline, timelineCount |
//! | add/remove friend | friendships, timeline, timelineCount |
//!
//! [`QueryStatus::Idle`]: crate::query::QueryStatus::Idle

mod friendships;
pub mod keys;
mod posts;
mod timeline;
mod users;

use std::future::Future;

use crate::api::ApiClient;
use crate::config::AppConfig;
use crate::error::ClientResult;
use crate::query::{Mutation, QueryClient, ResourceFamily};

/// Entry point for the view layer.
///
/// Cloning is cheap; clones share the cache and the HTTP client.
#[derive(Debug, Clone)]
pub struct Queries {
    api: ApiClient,
    cache: QueryClient,
    default_page_size: u32,
}

impl Queries {
    pub fn new(api: ApiClient, cache: QueryClient, default_page_size: u32) -> Self {
        Self {
            api,
            cache,
            default_page_size,
        }
    }

    /// Build the reqwest-backed client and a cache with the configured policies.
    pub fn from_config(config: &AppConfig) -> ClientResult<Self> {
        let api = ApiClient::new(config)?;
        Ok(Self::new(
            api,
            QueryClient::new(config.cache),
            config.default_page_size,
        ))
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn cache(&self) -> &QueryClient {
        &self.cache
    }

    pub fn default_page_size(&self) -> u32 {
        self.default_page_size
    }

    /// Wrap a write as a [`Mutation`] with a pending flag.
    ///
    /// ```ignore
    /// let create = queries.mutation(|q, req| async move { q.create_post(req).await });
    /// create.invoke(PostRequest::new(7, "hello")).await?;
    /// ```
    pub fn mutation<P, R, F, Fut>(&self, operation: F) -> Mutation<P, R>
    where
        P: Send + 'static,
        R: Send + 'static,
        F: Fn(Queries, P) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ClientResult<R>> + Send + 'static,
    {
        let queries = self.clone();
        Mutation::new(move |params| operation(queries.clone(), params))
    }

    /// Mark both timeline families stale.
    pub fn invalidate_timeline(&self) {
        self.invalidate(&[ResourceFamily::Timeline, ResourceFamily::TimelineCount]);
    }

    pub(crate) fn invalidate(&self, families: &[ResourceFamily]) {
        for family in families {
            self.cache.invalidate(*family);
        }
    }
}
