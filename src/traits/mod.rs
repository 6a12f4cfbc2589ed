//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`HttpClient`] - HTTP client operations (GET, POST, PUT, DELETE)
//! - [`SessionStore`] - Session snapshot storage and retrieval

pub mod http;
pub mod session_store;

pub use http::{Headers, HttpClient, HttpError, Response};
pub use session_store::{SessionStore, StoreError};
