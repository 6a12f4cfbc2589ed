//! User reads and writes

use tracing::info;

use crate::error::ClientResult;
use crate::models::{User, UserRequest};
use crate::query::{QueryState, ResourceFamily};
use crate::validation::validate_user;

use super::{keys, Queries};

impl Queries {
    pub async fn all_users(&self) -> QueryState<Vec<User>> {
        let api = self.api.clone();
        self.cache
            .query(keys::all_users(), move || async move { api.list_users().await })
            .await
    }

    pub async fn user(&self, id: Option<i64>) -> QueryState<User> {
        let Some(id) = id else {
            return QueryState::disabled(None);
        };
        let api = self.api.clone();
        self.cache
            .query(keys::user(id), move || async move { api.get_user(id).await })
            .await
    }

    /// Disabled while the term is blank.
    pub async fn search_users(&self, term: &str) -> QueryState<Vec<User>> {
        let term = term.trim().to_string();
        if term.is_empty() {
            return QueryState::disabled(Some(Vec::new()));
        }
        let api = self.api.clone();
        let key = keys::user_search(&term);
        self.cache
            .query(key, move || async move { api.search_users(&term).await })
            .await
    }

    pub async fn user_by_username(&self, username: &str) -> QueryState<User> {
        let username = username.trim().to_string();
        if username.is_empty() {
            return QueryState::disabled(None);
        }
        let api = self.api.clone();
        let key = keys::user_by_username(&username);
        self.cache
            .query(key, move || async move {
                api.get_user_by_username(&username).await
            })
            .await
    }

    pub async fn create_user(&self, request: UserRequest) -> ClientResult<User> {
        validate_user(&request)?;
        let user = self.api.create_user(&request).await?;
        info!(user_id = user.id, "user created");
        self.invalidate(&[ResourceFamily::Users]);
        Ok(user)
    }

    pub async fn update_user(&self, id: i64, request: UserRequest) -> ClientResult<User> {
        validate_user(&request)?;
        let user = self.api.update_user(id, &request).await?;
        info!(user_id = id, "user updated");
        self.invalidate(&[ResourceFamily::Users]);
        Ok(user)
    }

    /// Deleting a user can remove posts and friendships server-side, so every
    /// family is invalidated.
    pub async fn delete_user(&self, id: i64) -> ClientResult<()> {
        self.api.delete_user(id).await?;
        info!(user_id = id, "user deleted");
        self.cache.invalidate_all();
        Ok(())
    }
}
