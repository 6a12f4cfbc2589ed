//! Friendship reads and writes

use tracing::info;

use crate::error::ClientResult;
use crate::models::{Friendship, FriendshipRequest};
use crate::query::{QueryState, ResourceFamily};

use super::{keys, Queries};

/// The timeline shows friends' posts, so it moves with the friend set.
const FRIENDSHIP_WRITE_FAMILIES: [ResourceFamily; 3] = [
    ResourceFamily::Friendships,
    ResourceFamily::Timeline,
    ResourceFamily::TimelineCount,
];

impl Queries {
    pub async fn friends(&self, user_id: Option<i64>) -> QueryState<Vec<Friendship>> {
        let Some(user_id) = user_id else {
            return QueryState::disabled(Some(Vec::new()));
        };
        let api = self.api.clone();
        self.cache
            .query(keys::friends(user_id), move || async move {
                api.friends_of(user_id).await
            })
            .await
    }

    /// Disabled (and `false`) unless both ids are present.
    pub async fn check_friendship(
        &self,
        user_id: Option<i64>,
        friend_id: Option<i64>,
    ) -> QueryState<bool> {
        let (Some(user_id), Some(friend_id)) = (user_id, friend_id) else {
            return QueryState::disabled(Some(false));
        };
        let api = self.api.clone();
        self.cache
            .query(keys::friendship_check(user_id, friend_id), move || async move {
                api.check_friendship(user_id, friend_id).await
            })
            .await
    }

    pub async fn friend_count(&self, user_id: Option<i64>) -> QueryState<u64> {
        let Some(user_id) = user_id else {
            return QueryState::disabled(Some(0));
        };
        let api = self.api.clone();
        self.cache
            .query(keys::friend_count(user_id), move || async move {
                api.friend_count(user_id).await
            })
            .await
    }

    pub async fn add_friend(&self, request: FriendshipRequest) -> ClientResult<Friendship> {
        let friendship = self.api.add_friend(&request).await?;
        info!(
            user_id = request.user_id,
            friend_id = request.friend_id,
            "friend added"
        );
        self.invalidate(&FRIENDSHIP_WRITE_FAMILIES);
        Ok(friendship)
    }

    pub async fn remove_friend(&self, user_id: i64, friend_id: i64) -> ClientResult<()> {
        self.api.remove_friend(user_id, friend_id).await?;
        info!(user_id, friend_id, "friend removed");
        self.invalidate(&FRIENDSHIP_WRITE_FAMILIES);
        Ok(())
    }
}
