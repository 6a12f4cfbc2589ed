//! Timeline reads

use crate::models::{Page, TimelineFilter, TimelinePost};
use crate::query::QueryState;

use super::{keys, Queries};

impl Queries {
    pub async fn timeline(&self, user_id: Option<i64>) -> QueryState<Vec<TimelinePost>> {
        let Some(user_id) = user_id else {
            return QueryState::disabled(Some(Vec::new()));
        };
        let api = self.api.clone();
        self.cache
            .query(keys::timeline(user_id), move || async move {
                api.timeline(user_id).await
            })
            .await
    }

    /// One page of the timeline. `size` defaults to the configured page size.
    pub async fn timeline_page(
        &self,
        user_id: Option<i64>,
        page: u32,
        size: Option<u32>,
    ) -> QueryState<Page<TimelinePost>> {
        let Some(user_id) = user_id else {
            return QueryState::disabled(Some(Page::empty()));
        };
        let size = size.unwrap_or(self.default_page_size);
        let api = self.api.clone();
        self.cache
            .query(keys::timeline_page(user_id, page, size), move || async move {
                api.timeline_page(user_id, page, size).await
            })
            .await
    }

    /// One page of the timeline within `filter`'s date range.
    pub async fn timeline_filtered(
        &self,
        user_id: Option<i64>,
        page: u32,
        size: Option<u32>,
        filter: TimelineFilter,
    ) -> QueryState<Page<TimelinePost>> {
        let Some(user_id) = user_id else {
            return QueryState::disabled(Some(Page::empty()));
        };
        let size = size.unwrap_or(self.default_page_size);
        let api = self.api.clone();
        let key = keys::timeline_filtered(user_id, page, size, &filter);
        self.cache
            .query(key, move || async move {
                api.timeline_filtered(user_id, page, size, &filter).await
            })
            .await
    }

    /// The unpaged timeline within `filter`'s date range.
    pub async fn timeline_by_date_range(
        &self,
        user_id: Option<i64>,
        filter: TimelineFilter,
    ) -> QueryState<Vec<TimelinePost>> {
        let Some(user_id) = user_id else {
            return QueryState::disabled(Some(Vec::new()));
        };
        let api = self.api.clone();
        let key = keys::timeline_by_date_range(user_id, &filter);
        self.cache
            .query(key, move || async move {
                api.timeline_by_date_range(user_id, &filter).await
            })
            .await
    }

    pub async fn timeline_count_by_date_range(
        &self,
        user_id: Option<i64>,
        filter: TimelineFilter,
    ) -> QueryState<u64> {
        let Some(user_id) = user_id else {
            return QueryState::disabled(Some(0));
        };
        let api = self.api.clone();
        let key = keys::timeline_count_by_date_range(user_id, &filter);
        self.cache
            .query(key, move || async move {
                api.timeline_count_by_date_range(user_id, &filter).await
            })
            .await
    }

    pub async fn timeline_count(&self, user_id: Option<i64>) -> QueryState<u64> {
        let Some(user_id) = user_id else {
            return QueryState::disabled(Some(0));
        };
        let api = self.api.clone();
        self.cache
            .query(keys::timeline_count(user_id), move || async move {
                api.timeline_count(user_id).await
            })
            .await
    }
}
