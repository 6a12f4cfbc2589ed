//! Timeline endpoints

use crate::error::ClientResult;
use crate::models::{Page, TimelineCount, TimelineFilter, TimelinePost};

use super::endpoints::{self, with_query};
use super::ApiClient;

impl ApiClient {
    /// Every post visible in `user_id`'s timeline, newest first.
    pub async fn timeline(&self, user_id: i64) -> ClientResult<Vec<TimelinePost>> {
        self.get_json(&endpoints::timeline(user_id)).await
    }

    pub async fn timeline_page(
        &self,
        user_id: i64,
        page: u32,
        size: u32,
    ) -> ClientResult<Page<TimelinePost>> {
        let path = with_query(
            &endpoints::timeline_paginated(user_id),
            &[("page", page.to_string()), ("size", size.to_string())],
        );
        self.get_json(&path).await
    }

    /// One page of the timeline restricted to `filter`'s date range.
    pub async fn timeline_filtered(
        &self,
        user_id: i64,
        page: u32,
        size: u32,
        filter: &TimelineFilter,
    ) -> ClientResult<Page<TimelinePost>> {
        let mut params = vec![("page", page.to_string()), ("size", size.to_string())];
        params.extend(filter.query_pairs());
        let path = with_query(&endpoints::timeline_filtered(user_id), &params);
        self.get_json(&path).await
    }

    /// The whole timeline restricted to `filter`'s date range, unpaged.
    pub async fn timeline_by_date_range(
        &self,
        user_id: i64,
        filter: &TimelineFilter,
    ) -> ClientResult<Vec<TimelinePost>> {
        let path = with_query(
            &endpoints::timeline_by_date_range(user_id),
            &filter.query_pairs(),
        );
        self.get_json(&path).await
    }

    pub async fn timeline_count(&self, user_id: i64) -> ClientResult<u64> {
        let count: TimelineCount = self.get_json(&endpoints::timeline_count(user_id)).await?;
        Ok(count.count)
    }

    /// Number of timeline posts within `filter`'s date range.
    pub async fn timeline_count_by_date_range(
        &self,
        user_id: i64,
        filter: &TimelineFilter,
    ) -> ClientResult<u64> {
        let path = with_query(
            &endpoints::timeline_count_by_date_range(user_id),
            &filter.query_pairs(),
        );
        let count: TimelineCount = self.get_json(&path).await?;
        Ok(count.count)
    }
}

#[cfg(test)]
mod tests {
    use crate::adapters::mock::{MockHttpClient, MockResponse};
    use crate::api::ApiClient;
    use crate::models::{parse_timestamp, TimelineFilter};
    use serde_json::json;
    use std::sync::Arc;

    fn empty_page() -> serde_json::Value {
        json!({
            "content": [],
            "totalElements": 0,
            "totalPages": 0,
            "size": 10,
            "number": 0,
            "first": true,
            "last": true
        })
    }

    #[tokio::test]
    async fn test_filtered_query_string() {
        let mock = MockHttpClient::new();
        mock.set_default_response(MockResponse::json(200, empty_page()));
        let api = ApiClient::with_http_client("http://api.test", Arc::new(mock.clone()));
        let filter = TimelineFilter::new(
            parse_timestamp("2024-01-01T00:00:00"),
            parse_timestamp("2024-02-01T00:00:00"),
        );

        let page = api.timeline_filtered(7, 2, 5, &filter).await.unwrap();

        assert!(page.content.is_empty());
        assert_eq!(
            mock.get_requests()[0].url,
            "http://api.test/api/v1/timeline/user/7/filtered?page=2&size=5\
             &fromDate=2024-01-01T00%3A00%3A00&toDate=2024-02-01T00%3A00%3A00"
        );
    }

    #[tokio::test]
    async fn test_paginated_without_filter() {
        let mock = MockHttpClient::new();
        mock.set_default_response(MockResponse::json(200, empty_page()));
        let api = ApiClient::with_http_client("http://api.test", Arc::new(mock.clone()));

        api.timeline_page(7, 0, 10).await.unwrap();
        assert_eq!(
            mock.get_requests()[0].url,
            "http://api.test/api/v1/timeline/user/7/paginated?page=0&size=10"
        );
    }

    #[tokio::test]
    async fn test_date_range_reads() {
        let mock = MockHttpClient::new();
        mock.set_response(
            "GET http://api.test/api/v1/timeline/user/7/daterange?fromDate=2024-01-01T00%3A00%3A00",
            MockResponse::json(
                200,
                json!([{"id": 1, "text": "hi", "userId": 2, "username": "bo",
                        "createdAt": "2024-01-02T08:00:00"}]),
            ),
        );
        mock.set_response(
            "GET http://api.test/api/v1/timeline/user/7/count/daterange?fromDate=2024-01-01T00%3A00%3A00",
            MockResponse::json(
                200,
                json!({"userId": 7, "postCount": 1, "fromDate": "2024-01-01T00:00", "toDate": "null"}),
            ),
        );
        let api = ApiClient::with_http_client("http://api.test", Arc::new(mock));
        let filter = TimelineFilter::new(parse_timestamp("2024-01-01T00:00:00"), None);

        let posts = api.timeline_by_date_range(7, &filter).await.unwrap();
        assert_eq!(posts[0].username, "bo");
        assert_eq!(api.timeline_count_by_date_range(7, &filter).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_count_accepts_post_count_body() {
        let mock = MockHttpClient::new();
        mock.set_default_response(MockResponse::json(200, json!({"userId": 7, "postCount": 4})));
        let api = ApiClient::with_http_client("http://api.test", Arc::new(mock));
        assert_eq!(api.timeline_count(7).await.unwrap(), 4);
    }
}
