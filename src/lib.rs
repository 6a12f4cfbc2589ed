//! Social Client - data synchronization layer for the social network API.
//!
//! - [`api`]: typed HTTP resource client for users, posts, friendships and
//!   the timeline
//! - [`query`]: keyed read cache with freshness, retention, request
//!   coalescing and family invalidation
//! - [`queries`]: cached reads and invalidating writes built on both
//! - [`state`]: persisted session and transient UI state
//!
//! The [`cli`] module and the `social-client` binary are a small view layer
//! over the above.

pub mod adapters;
pub mod api;
pub mod cli;
pub mod config;
pub mod dates;
pub mod error;
pub mod logging;
pub mod models;
pub mod prelude;
pub mod queries;
pub mod query;
pub mod state;
pub mod traits;
pub mod validation;
