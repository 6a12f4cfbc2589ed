//! Session snapshot storage trait.
//!
//! The session is the only state this client persists. It is written through
//! this trait so the file-backed store can be swapped for an in-memory one
//! in tests.

use async_trait::async_trait;

use crate::state::SessionSnapshot;

/// Session storage errors.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreError {
    /// Failed to load the snapshot
    LoadFailed(String),
    /// Failed to save the snapshot
    SaveFailed(String),
    /// Failed to clear the snapshot
    ClearFailed(String),
    /// Stored snapshot is not valid JSON for the expected shape
    Serialization(String),
    /// Storage location could not be determined
    Unavailable(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::LoadFailed(msg) => write!(f, "Failed to load session: {}", msg),
            StoreError::SaveFailed(msg) => write!(f, "Failed to save session: {}", msg),
            StoreError::ClearFailed(msg) => write!(f, "Failed to clear session: {}", msg),
            StoreError::Serialization(msg) => write!(f, "Corrupt session snapshot: {}", msg),
            StoreError::Unavailable(msg) => write!(f, "Session storage unavailable: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

/// Trait for loading and saving the session snapshot.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Load the stored snapshot.
    ///
    /// # Returns
    /// - `Ok(Some(snapshot))` if a snapshot exists and parsed
    /// - `Ok(None)` if nothing is stored
    /// - `Err(error)` if reading or parsing failed
    async fn load(&self) -> Result<Option<SessionSnapshot>, StoreError>;

    /// Save a snapshot, replacing any previous one.
    async fn save(&self, snapshot: &SessionSnapshot) -> Result<(), StoreError>;

    /// Remove the stored snapshot. Succeeds if nothing was stored.
    async fn clear(&self) -> Result<(), StoreError>;
}
