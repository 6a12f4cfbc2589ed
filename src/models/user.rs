use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A registered user (`UserResponse` on the wire).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    /// Display name
    pub username: String,
    /// Contact address
    pub email: String,
    #[serde(default, with = "super::timestamp::option")]
    pub created_at: Option<NaiveDateTime>,
}

/// Body for creating or updating a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRequest {
    pub username: String,
    pub email: String,
}

impl UserRequest {
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
        }
    }
}
