//! Prelude module for convenient imports.
//!
//! ```ignore
//! use social_client::prelude::*;
//! ```

// Configuration
pub use crate::config::AppConfig;

// Errors
pub use crate::error::{ClientError, ClientResult, ErrorContext, ResultExt, ValidationError};

// Model types
pub use crate::models::{
    Friendship, FriendshipRequest, Page, Post, PostRequest, PostUpdate, TimelineFilter,
    TimelinePost, User, UserRequest,
};

// Reads, writes and the cache
pub use crate::api::ApiClient;
pub use crate::queries::Queries;
pub use crate::query::{Mutation, QueryClient, QueryKey, QueryState, QueryStatus, ResourceFamily};

// State types
pub use crate::state::{SessionContext, SessionState, Severity, UiState};
