//! File-based session store.
//!
//! The session snapshot lives in `~/.social-client/auth-storage.json`.

use async_trait::async_trait;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::state::SessionSnapshot;
use crate::traits::{SessionStore, StoreError};

/// The storage directory name under the home directory.
const STORAGE_DIR: &str = ".social-client";

/// The session snapshot file name.
const SESSION_FILE: &str = "auth-storage.json";

/// Session store backed by a JSON file.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Create a store at the default location in the home directory.
    pub fn new() -> Result<Self, StoreError> {
        let home = dirs::home_dir().ok_or_else(|| {
            StoreError::Unavailable("Failed to determine home directory".to_string())
        })?;
        Ok(Self::with_path(home.join(STORAGE_DIR).join(SESSION_FILE)))
    }

    /// Create a store at an explicit path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the path to the snapshot file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_snapshot(&self) -> Result<Option<SessionSnapshot>, StoreError> {
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::LoadFailed(e.to_string())),
        };

        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .map(Some)
            .map_err(|e| StoreError::Serialization(e.to_string()))
    }

    fn write_snapshot(&self, snapshot: &SessionSnapshot) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| StoreError::SaveFailed(e.to_string()))?;
        }

        let file = File::create(&self.path).map_err(|e| StoreError::SaveFailed(e.to_string()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, snapshot)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        writer
            .flush()
            .map_err(|e| StoreError::SaveFailed(e.to_string()))
    }

    fn remove_snapshot(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::ClearFailed(e.to_string())),
        }
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self) -> Result<Option<SessionSnapshot>, StoreError> {
        let store = self.clone();
        tokio::task::spawn_blocking(move || store.read_snapshot())
            .await
            .map_err(|e| StoreError::LoadFailed(e.to_string()))?
    }

    async fn save(&self, snapshot: &SessionSnapshot) -> Result<(), StoreError> {
        let store = self.clone();
        let snapshot = *snapshot;
        tokio::task::spawn_blocking(move || store.write_snapshot(&snapshot))
            .await
            .map_err(|e| StoreError::SaveFailed(e.to_string()))?
    }

    async fn clear(&self) -> Result<(), StoreError> {
        let store = self.clone();
        tokio::task::spawn_blocking(move || store.remove_snapshot())
            .await
            .map_err(|e| StoreError::ClearFailed(e.to_string()))?
    }
}
