//! Friendship endpoints

use tracing::debug;

use crate::error::ClientResult;
use crate::models::{FriendCount, Friendship, FriendshipCheck, FriendshipRequest};

use super::endpoints::{self, with_query, FRIENDSHIPS, FRIENDSHIP_CHECK};
use super::ApiClient;

fn pair_query(path: &str, user_id: i64, friend_id: i64) -> String {
    with_query(
        path,
        &[
            ("userId", user_id.to_string()),
            ("friendId", friend_id.to_string()),
        ],
    )
}

impl ApiClient {
    pub async fn friends_of(&self, user_id: i64) -> ClientResult<Vec<Friendship>> {
        self.get_json(&endpoints::friendships_by_user(user_id)).await
    }

    pub async fn add_friend(&self, request: &FriendshipRequest) -> ClientResult<Friendship> {
        self.post_json(FRIENDSHIPS, request).await
    }

    /// Remove the friendship keyed by the (owner, friend) pair.
    pub async fn remove_friend(&self, user_id: i64, friend_id: i64) -> ClientResult<()> {
        self.delete(&pair_query(FRIENDSHIPS, user_id, friend_id))
            .await
    }

    /// Whether `user_id` and `friend_id` are friends.
    ///
    /// A 404 from this endpoint means "no friendship" and yields `false`.
    /// Every other failure, transport errors included, is returned.
    pub async fn check_friendship(&self, user_id: i64, friend_id: i64) -> ClientResult<bool> {
        let path = pair_query(FRIENDSHIP_CHECK, user_id, friend_id);
        match self.get_json::<FriendshipCheck>(&path).await {
            Ok(check) => Ok(check.is_friend),
            Err(err) if err.is_not_found() => {
                debug!(user_id, friend_id, "friendship check returned 404, treating as false");
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }

    pub async fn friend_count(&self, user_id: i64) -> ClientResult<u64> {
        let count: FriendCount = self.get_json(&endpoints::friend_count(user_id)).await?;
        Ok(count.friend_count)
    }
}
