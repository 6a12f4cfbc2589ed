//! Cache key builders, one per read.
//!
//! Views use these with [`QueryClient::state`](crate::query::QueryClient::state)
//! to observe a read without triggering it.

use crate::models::TimelineFilter;
use crate::query::{QueryKey, ResourceFamily};

pub fn all_users() -> QueryKey {
    QueryKey::new(ResourceFamily::Users).with("all")
}

pub fn user(id: i64) -> QueryKey {
    QueryKey::new(ResourceFamily::Users).with(id)
}

pub fn user_search(term: &str) -> QueryKey {
    QueryKey::new(ResourceFamily::Users).with("search").with(term)
}

pub fn user_by_username(username: &str) -> QueryKey {
    QueryKey::new(ResourceFamily::Users)
        .with("username")
        .with(username)
}

pub fn post(id: i64) -> QueryKey {
    QueryKey::new(ResourceFamily::Posts).with(id)
}

pub fn posts_by_user(user_id: i64) -> QueryKey {
    QueryKey::new(ResourceFamily::Posts).with("user").with(user_id)
}

pub fn all_posts(page: u32, size: u32) -> QueryKey {
    QueryKey::new(ResourceFamily::Posts)
        .with("all")
        .with(page)
        .with(size)
}

pub fn post_search(term: &str) -> QueryKey {
    QueryKey::new(ResourceFamily::Posts).with("search").with(term)
}

pub fn friends(user_id: i64) -> QueryKey {
    QueryKey::new(ResourceFamily::Friendships).with(user_id)
}

pub fn friendship_check(user_id: i64, friend_id: i64) -> QueryKey {
    QueryKey::new(ResourceFamily::Friendships)
        .with("check")
        .with(user_id)
        .with(friend_id)
}

pub fn friend_count(user_id: i64) -> QueryKey {
    QueryKey::new(ResourceFamily::Friendships)
        .with("count")
        .with(user_id)
}

pub fn timeline(user_id: i64) -> QueryKey {
    QueryKey::new(ResourceFamily::Timeline).with(user_id)
}

pub fn timeline_page(user_id: i64, page: u32, size: u32) -> QueryKey {
    QueryKey::new(ResourceFamily::Timeline)
        .with(user_id)
        .with("paginated")
        .with(page)
        .with(size)
}

pub fn timeline_filtered(user_id: i64, page: u32, size: u32, filter: &TimelineFilter) -> QueryKey {
    QueryKey::new(ResourceFamily::Timeline)
        .with(user_id)
        .with(page)
        .with(size)
        .with_opt(filter.from_date)
        .with_opt(filter.to_date)
}

pub fn timeline_by_date_range(user_id: i64, filter: &TimelineFilter) -> QueryKey {
    QueryKey::new(ResourceFamily::Timeline)
        .with(user_id)
        .with("daterange")
        .with_opt(filter.from_date)
        .with_opt(filter.to_date)
}

pub fn timeline_count(user_id: i64) -> QueryKey {
    QueryKey::new(ResourceFamily::TimelineCount).with(user_id)
}

pub fn timeline_count_by_date_range(user_id: i64, filter: &TimelineFilter) -> QueryKey {
    QueryKey::new(ResourceFamily::TimelineCount)
        .with(user_id)
        .with("daterange")
        .with_opt(filter.from_date)
        .with_opt(filter.to_date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::parse_timestamp;

    #[test]
    fn test_filter_bounds_distinguish_keys() {
        let none = timeline_filtered(7, 0, 10, &TimelineFilter::default());
        let from = timeline_filtered(
            7,
            0,
            10,
            &TimelineFilter::new(parse_timestamp("2024-01-01T00:00:00"), None),
        );
        assert_ne!(none, from);
        assert_eq!(none.to_string(), "timeline/7/0/10/-/-");
    }

    #[test]
    fn test_page_and_size_distinguish_keys() {
        assert_ne!(timeline_page(7, 0, 10), timeline_page(7, 1, 10));
        assert_ne!(timeline_page(7, 0, 10), timeline_page(7, 0, 20));
    }

    #[test]
    fn test_families() {
        assert_eq!(friendship_check(1, 2).family(), ResourceFamily::Friendships);
        assert_eq!(timeline_count(1).family(), ResourceFamily::TimelineCount);
        assert_eq!(user_search("a").family(), ResourceFamily::Users);
        assert_eq!(post_search("a").family(), ResourceFamily::Posts);
        assert_eq!(all_posts(0, 10).family(), ResourceFamily::Posts);
        let filter = TimelineFilter::default();
        assert_eq!(
            timeline_by_date_range(1, &filter).family(),
            ResourceFamily::Timeline
        );
        assert_eq!(
            timeline_count_by_date_range(1, &filter).family(),
            ResourceFamily::TimelineCount
        );
        assert_ne!(timeline_by_date_range(1, &filter), timeline(1));
        assert_ne!(timeline_count_by_date_range(1, &filter), timeline_count(1));
    }
}
