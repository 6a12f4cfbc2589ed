//! Resource client for the social network API.
//!
//! One operation per (resource, verb) pair, split by family:
//!
//! - users: list, search, get, get by username, create, update, delete
//! - posts: create, get, list by user, update, delete
//! - friendships: list, add, remove, check, count
//! - timeline: full, paginated, filtered, count

mod client;
pub mod endpoints;
mod friendships;
mod posts;
mod timeline;
mod users;

pub use client::ApiClient;
