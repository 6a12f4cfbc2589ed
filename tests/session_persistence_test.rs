//! Session persistence across restarts using the file-backed store.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use social_client::adapters::FileSessionStore;
use social_client::state::{SessionContext, SessionSnapshot};
use social_client::traits::SessionStore;
use tempfile::TempDir;

/// Temporary home for one test's session file.
fn setup_session_dir() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join(".social-client").join("auth-storage.json");
    (temp_dir, path)
}

async fn restore(path: &PathBuf) -> SessionContext {
    SessionContext::restore(Arc::new(FileSessionStore::with_path(path.clone()))).await
}

#[tokio::test]
async fn test_first_start_is_logged_out() {
    let (_dir, path) = setup_session_dir();

    let session = restore(&path).await;

    assert_eq!(session.current_user_id(), None);
    assert!(!session.is_authenticated());
    assert!(!path.exists());
}

#[tokio::test]
async fn test_active_user_survives_restart() {
    let (_dir, path) = setup_session_dir();

    let mut session = restore(&path).await;
    session.set_current_user(7).await.unwrap();
    drop(session);

    let session = restore(&path).await;
    assert_eq!(session.current_user_id(), Some(7));
    assert!(session.is_authenticated());
}

#[tokio::test]
async fn test_snapshot_file_format() {
    let (_dir, path) = setup_session_dir();

    let mut session = restore(&path).await;
    session.set_current_user(42).await.unwrap();

    let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(
        raw,
        serde_json::json!({"currentUserId": 42, "isAuthenticated": true})
    );
}

#[tokio::test]
async fn test_logout_resets_and_persists() {
    let (_dir, path) = setup_session_dir();

    let mut session = restore(&path).await;
    session.set_current_user(7).await.unwrap();
    session.logout().await.unwrap();

    assert_eq!(session.current_user_id(), None);
    assert!(!session.is_authenticated());

    let session = restore(&path).await;
    assert_eq!(session.current_user_id(), None);
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn test_switching_user_overwrites_slot() {
    let (_dir, path) = setup_session_dir();

    let mut session = restore(&path).await;
    session.set_current_user(1).await.unwrap();
    session.set_current_user(2).await.unwrap();

    let stored = FileSessionStore::with_path(path.clone())
        .load()
        .await
        .unwrap()
        .unwrap();
    assert_eq!(
        stored,
        SessionSnapshot {
            current_user_id: Some(2),
            is_authenticated: true,
        }
    );
}

#[tokio::test]
async fn test_corrupt_file_restores_logged_out() {
    let (_dir, path) = setup_session_dir();
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "{not json").unwrap();

    let session = restore(&path).await;

    assert_eq!(session.current_user_id(), None);
    assert!(!session.is_authenticated());
}
