use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A directional friendship row as seen from `user_id`.
///
/// The server may store one or two rows per pair; the client never assumes
/// the reverse row exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Friendship {
    pub id: i64,
    pub user_id: i64,
    #[serde(default)]
    pub username: String,
    pub friend_id: i64,
    #[serde(default)]
    pub friend_username: String,
    #[serde(with = "super::timestamp")]
    pub created_at: NaiveDateTime,
}

/// Body for adding a friend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FriendshipRequest {
    pub user_id: i64,
    pub friend_id: i64,
}

impl FriendshipRequest {
    pub fn new(user_id: i64, friend_id: i64) -> Self {
        Self { user_id, friend_id }
    }
}

/// Body of `GET /friendships/check`.
///
/// Deployed servers answer either `{"isFriend": …}` or `{"areFriends": …}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FriendshipCheck {
    #[serde(alias = "areFriends")]
    pub is_friend: bool,
}

/// Body of `GET /friendships/user/{id}/count`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FriendCount {
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(alias = "count")]
    pub friend_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_accepts_both_field_names() {
        let a: FriendshipCheck = serde_json::from_str(r#"{"isFriend":true}"#).unwrap();
        let b: FriendshipCheck = serde_json::from_str(r#"{"areFriends":false}"#).unwrap();
        assert!(a.is_friend);
        assert!(!b.is_friend);
    }

    #[test]
    fn test_friendship_denormalized_names() {
        let f: Friendship = serde_json::from_str(
            r#"{"id":5,"userId":1,"username":"ana","friendId":2,"friendUsername":"bo","createdAt":"2024-02-01T12:00:00"}"#,
        )
        .unwrap();
        assert_eq!(f.friend_username, "bo");
        assert_eq!(f.username, "ana");
    }

    #[test]
    fn test_friend_count() {
        let c: FriendCount = serde_json::from_str(r#"{"userId":1,"friendCount":4}"#).unwrap();
        assert_eq!(c.friend_count, 4);
    }
}
