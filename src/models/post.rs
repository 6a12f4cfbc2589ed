use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A post (`PostResponse` on the wire). The owning user never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i64,
    pub text: String,
    pub user_id: i64,
    #[serde(with = "super::timestamp")]
    pub created_at: NaiveDateTime,
    #[serde(default, with = "super::timestamp::option")]
    pub updated_at: Option<NaiveDateTime>,
}

impl Post {
    /// True once the post has been edited after creation.
    pub fn is_edited(&self) -> bool {
        self.updated_at.is_some_and(|u| u > self.created_at)
    }
}

/// Body for creating a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRequest {
    pub text: String,
    pub user_id: i64,
}

impl PostRequest {
    pub fn new(user_id: i64, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            user_id,
        }
    }
}

/// Partial body for updating a post; absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
}

impl PostUpdate {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            user_id: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_camel_case() {
        let body = serde_json::to_value(PostRequest::new(7, "hello")).unwrap();
        assert_eq!(body, serde_json::json!({"text": "hello", "userId": 7}));
    }

    #[test]
    fn test_update_skips_absent_fields() {
        let body = serde_json::to_value(PostUpdate::text("edited")).unwrap();
        assert_eq!(body, serde_json::json!({"text": "edited"}));
    }

    #[test]
    fn test_is_edited() {
        let mut post: Post = serde_json::from_str(
            r#"{"id":1,"text":"t","userId":2,"createdAt":"2024-01-01T10:00:00","updatedAt":"2024-01-01T10:00:00"}"#,
        )
        .unwrap();
        assert!(!post.is_edited());

        post.updated_at = crate::models::parse_timestamp("2024-01-02T10:00:00");
        assert!(post.is_edited());
    }
}
