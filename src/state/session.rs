//! Active-user session.
//!
//! A single slot: at most one user id is active at a time. The slot is
//! persisted through a [`SessionStore`] so it survives restarts. There is no
//! global instance; the [`SessionContext`] is constructed at startup and
//! passed to whoever needs it.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::ClientResult;
use crate::models::User;
use crate::traits::SessionStore;

/// The persisted form of the session.
///
/// Stored as `{"currentUserId": 7, "isAuthenticated": true}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    #[serde(default)]
    pub current_user_id: Option<i64>,
    #[serde(default)]
    pub is_authenticated: bool,
}

/// In-memory session state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionState {
    current_user_id: Option<i64>,
    is_authenticated: bool,
}

impl SessionState {
    /// A session with no active user.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild state from a stored snapshot.
    ///
    /// A snapshot that claims authentication without an id, or an id without
    /// authentication, is treated as logged out.
    pub fn from_snapshot(snapshot: SessionSnapshot) -> Self {
        match snapshot.current_user_id {
            Some(id) if snapshot.is_authenticated => Self {
                current_user_id: Some(id),
                is_authenticated: true,
            },
            _ => Self::default(),
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            current_user_id: self.current_user_id,
            is_authenticated: self.is_authenticated,
        }
    }

    pub fn current_user_id(&self) -> Option<i64> {
        self.current_user_id
    }

    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated
    }

    /// Make `user_id` the active user.
    pub fn set_current_user(&mut self, user_id: i64) {
        self.current_user_id = Some(user_id);
        self.is_authenticated = true;
    }

    /// Clear the active user.
    pub fn logout(&mut self) {
        *self = Self::default();
    }
}

/// Session state bound to its persistent store.
///
/// Every change is written through before the call returns. The resolved
/// profile of the active user is kept alongside but never persisted.
pub struct SessionContext {
    state: SessionState,
    profile: Option<User>,
    store: Arc<dyn SessionStore>,
}

impl SessionContext {
    /// Restore the session from `store`.
    ///
    /// A missing snapshot and an unreadable snapshot both yield a logged-out
    /// session; the latter is logged.
    pub async fn restore(store: Arc<dyn SessionStore>) -> Self {
        let state = match store.load().await {
            Ok(Some(snapshot)) => SessionState::from_snapshot(snapshot),
            Ok(None) => SessionState::default(),
            Err(e) => {
                tracing::warn!("Discarding unreadable session snapshot: {}", e);
                SessionState::default()
            }
        };

        tracing::debug!(
            user_id = ?state.current_user_id(),
            authenticated = state.is_authenticated(),
            "Session restored"
        );

        Self {
            state,
            profile: None,
            store,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn current_user_id(&self) -> Option<i64> {
        self.state.current_user_id()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.is_authenticated()
    }

    /// Profile of the active user, if one has been resolved this run.
    pub fn profile(&self) -> Option<&User> {
        self.profile.as_ref()
    }

    /// Attach the resolved profile. Ignored if it belongs to another user.
    pub fn set_profile(&mut self, user: User) {
        if self.state.current_user_id() == Some(user.id) {
            self.profile = Some(user);
        }
    }

    /// Switch the active user and persist the change.
    ///
    /// The in-memory state only changes once the store has accepted it; on
    /// error the previous user stays active.
    pub async fn set_current_user(&mut self, user_id: i64) -> ClientResult<()> {
        let mut next = self.state;
        next.set_current_user(user_id);
        self.store.save(&next.snapshot()).await?;

        if self.state.current_user_id() != Some(user_id) {
            self.profile = None;
        }
        self.state = next;
        tracing::info!(user_id, "Active user set");
        Ok(())
    }

    /// Clear the active user and remove the stored snapshot.
    ///
    /// The in-memory state is reset even if the store fails.
    pub async fn logout(&mut self) -> ClientResult<()> {
        self.state.logout();
        self.profile = None;
        self.store.clear().await?;
        tracing::info!("Logged out");
        Ok(())
    }
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext")
            .field("state", &self.state)
            .field("profile", &self.profile)
            .finish_non_exhaustive()
    }
}
