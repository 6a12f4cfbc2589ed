//! Post reads and writes

use tracing::info;

use crate::error::ClientResult;
use crate::models::{Post, PostRequest, PostUpdate};
use crate::query::{QueryState, ResourceFamily};
use crate::validation::validate_post_text;

use super::{keys, Queries};

/// Families touched by any post write. The timeline is a projection of posts.
const POST_WRITE_FAMILIES: [ResourceFamily; 3] = [
    ResourceFamily::Posts,
    ResourceFamily::Timeline,
    ResourceFamily::TimelineCount,
];

impl Queries {
    pub async fn posts_by_user(&self, user_id: Option<i64>) -> QueryState<Vec<Post>> {
        let Some(user_id) = user_id else {
            return QueryState::disabled(Some(Vec::new()));
        };
        let api = self.api.clone();
        self.cache
            .query(keys::posts_by_user(user_id), move || async move {
                api.posts_by_user(user_id).await
            })
            .await
    }

    pub async fn post(&self, id: Option<i64>) -> QueryState<Post> {
        let Some(id) = id else {
            return QueryState::disabled(None);
        };
        let api = self.api.clone();
        self.cache
            .query(keys::post(id), move || async move { api.get_post(id).await })
            .await
    }

    /// One page of every post. `size` defaults to the configured page size.
    pub async fn all_posts(&self, page: u32, size: Option<u32>) -> QueryState<Vec<Post>> {
        let size = size.unwrap_or(self.default_page_size);
        let api = self.api.clone();
        self.cache
            .query(keys::all_posts(page, size), move || async move {
                api.all_posts(page, size).await
            })
            .await
    }

    /// Posts containing `term`. A blank term sends no request.
    pub async fn search_posts(&self, term: &str) -> QueryState<Vec<Post>> {
        let term = term.trim().to_string();
        if term.is_empty() {
            return QueryState::disabled(Some(Vec::new()));
        }
        let api = self.api.clone();
        let key = keys::post_search(&term);
        self.cache
            .query(key, move || async move { api.search_posts(&term).await })
            .await
    }

    /// Empty or over-long text is rejected before any request is sent.
    pub async fn create_post(&self, request: PostRequest) -> ClientResult<Post> {
        validate_post_text(&request.text)?;
        let post = self.api.create_post(&request).await?;
        info!(post_id = post.id, user_id = post.user_id, "post created");
        self.invalidate(&POST_WRITE_FAMILIES);
        Ok(post)
    }

    pub async fn update_post(&self, id: i64, update: PostUpdate) -> ClientResult<Post> {
        if let Some(ref text) = update.text {
            validate_post_text(text)?;
        }
        let post = self.api.update_post(id, &update).await?;
        info!(post_id = id, "post updated");
        self.invalidate(&POST_WRITE_FAMILIES);
        Ok(post)
    }

    pub async fn delete_post(&self, id: i64) -> ClientResult<()> {
        self.api.delete_post(id).await?;
        info!(post_id = id, "post deleted");
        self.invalidate(&POST_WRITE_FAMILIES);
        Ok(())
    }
}
