//! In-memory session store for testing.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::state::SessionSnapshot;
use crate::traits::{SessionStore, StoreError};

/// In-memory session store for testing.
///
/// Each operation can be configured to fail so tests can exercise the
/// "unreadable snapshot" and "could not persist" paths.
#[derive(Debug, Clone)]
pub struct InMemorySessionStore {
    snapshot: Arc<Mutex<Option<SessionSnapshot>>>,
    save_should_fail: Arc<Mutex<bool>>,
    load_should_fail: Arc<Mutex<bool>>,
    clear_should_fail: Arc<Mutex<bool>>,
}

impl InMemorySessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            snapshot: Arc::new(Mutex::new(None)),
            save_should_fail: Arc::new(Mutex::new(false)),
            load_should_fail: Arc::new(Mutex::new(false)),
            clear_should_fail: Arc::new(Mutex::new(false)),
        }
    }

    /// Create a store holding `snapshot`.
    pub fn with_snapshot(snapshot: SessionSnapshot) -> Self {
        let store = Self::new();
        store.set_snapshot(Some(snapshot));
        store
    }

    pub fn set_save_should_fail(&self, should_fail: bool) {
        *self.save_should_fail.lock().unwrap() = should_fail;
    }

    pub fn set_load_should_fail(&self, should_fail: bool) {
        *self.load_should_fail.lock().unwrap() = should_fail;
    }

    pub fn set_clear_should_fail(&self, should_fail: bool) {
        *self.clear_should_fail.lock().unwrap() = should_fail;
    }

    /// Get the stored snapshot synchronously (for testing).
    pub fn get_snapshot(&self) -> Option<SessionSnapshot> {
        *self.snapshot.lock().unwrap()
    }

    /// Replace the stored snapshot synchronously (for testing).
    pub fn set_snapshot(&self, snapshot: Option<SessionSnapshot>) {
        *self.snapshot.lock().unwrap() = snapshot;
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self) -> Result<Option<SessionSnapshot>, StoreError> {
        if *self.load_should_fail.lock().unwrap() {
            return Err(StoreError::LoadFailed("Mock load failure".to_string()));
        }

        Ok(*self.snapshot.lock().unwrap())
    }

    async fn save(&self, snapshot: &SessionSnapshot) -> Result<(), StoreError> {
        if *self.save_should_fail.lock().unwrap() {
            return Err(StoreError::SaveFailed("Mock save failure".to_string()));
        }

        *self.snapshot.lock().unwrap() = Some(*snapshot);
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        if *self.clear_should_fail.lock().unwrap() {
            return Err(StoreError::ClearFailed("Mock clear failure".to_string()));
        }

        *self.snapshot.lock().unwrap() = None;
        Ok(())
    }
}
