//! Post endpoints

use crate::error::ClientResult;
use crate::models::{Post, PostRequest, PostUpdate};

use super::endpoints::{self, with_query, POSTS, POSTS_SEARCH};
use super::ApiClient;

impl ApiClient {
    pub async fn create_post(&self, request: &PostRequest) -> ClientResult<Post> {
        self.post_json(POSTS, request).await
    }

    pub async fn get_post(&self, id: i64) -> ClientResult<Post> {
        self.get_json(&endpoints::post_by_id(id)).await
    }

    pub async fn posts_by_user(&self, user_id: i64) -> ClientResult<Vec<Post>> {
        self.get_json(&endpoints::posts_by_user(user_id)).await
    }

    /// One page of every post on the server.
    pub async fn all_posts(&self, page: u32, size: u32) -> ClientResult<Vec<Post>> {
        let path = with_query(
            POSTS,
            &[("page", page.to_string()), ("size", size.to_string())],
        );
        self.get_json(&path).await
    }

    /// Posts whose text contains `term`, case-insensitively.
    pub async fn search_posts(&self, term: &str) -> ClientResult<Vec<Post>> {
        self.get_json(&with_query(POSTS_SEARCH, &[("search", term)]))
            .await
    }

    pub async fn update_post(&self, id: i64, update: &PostUpdate) -> ClientResult<Post> {
        self.put_json(&endpoints::post_by_id(id), update).await
    }

    pub async fn delete_post(&self, id: i64) -> ClientResult<()> {
        self.delete(&endpoints::post_by_id(id)).await
    }
}
