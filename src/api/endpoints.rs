//! Endpoint templates of the social network API.

pub const USERS: &str = "/api/v1/users";
pub const POSTS: &str = "/api/v1/posts";
pub const POSTS_SEARCH: &str = "/api/v1/posts/search";
pub const FRIENDSHIPS: &str = "/api/v1/friendships";
pub const FRIENDSHIP_CHECK: &str = "/api/v1/friendships/check";

pub fn user_by_id(id: i64) -> String {
    format!("{}/{}", USERS, id)
}

pub fn user_by_username(username: &str) -> String {
    format!("{}/username/{}", USERS, urlencoding::encode(username))
}

pub fn post_by_id(id: i64) -> String {
    format!("{}/{}", POSTS, id)
}

pub fn posts_by_user(user_id: i64) -> String {
    format!("{}/user/{}", POSTS, user_id)
}

pub fn friendships_by_user(user_id: i64) -> String {
    format!("{}/user/{}", FRIENDSHIPS, user_id)
}

pub fn friend_count(user_id: i64) -> String {
    format!("{}/user/{}/count", FRIENDSHIPS, user_id)
}

pub fn timeline(user_id: i64) -> String {
    format!("/api/v1/timeline/user/{}", user_id)
}

pub fn timeline_paginated(user_id: i64) -> String {
    format!("{}/paginated", timeline(user_id))
}

pub fn timeline_filtered(user_id: i64) -> String {
    format!("{}/filtered", timeline(user_id))
}

pub fn timeline_by_date_range(user_id: i64) -> String {
    format!("{}/daterange", timeline(user_id))
}

pub fn timeline_count(user_id: i64) -> String {
    format!("{}/count", timeline(user_id))
}

pub fn timeline_count_by_date_range(user_id: i64) -> String {
    format!("{}/daterange", timeline_count(user_id))
}

/// Append `pairs` as a percent-encoded query string.
pub fn with_query<K, V>(path: &str, pairs: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    if pairs.is_empty() {
        return path.to_string();
    }
    let query = pairs
        .iter()
        .map(|(k, v)| {
            format!(
                "{}={}",
                urlencoding::encode(k.as_ref()),
                urlencoding::encode(v.as_ref())
            )
        })
        .collect::<Vec<_>>()
        .join("&");
    format!("{}?{}", path, query)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templates() {
        assert_eq!(user_by_id(3), "/api/v1/users/3");
        assert_eq!(posts_by_user(7), "/api/v1/posts/user/7");
        assert_eq!(friendships_by_user(7), "/api/v1/friendships/user/7");
        assert_eq!(timeline_filtered(7), "/api/v1/timeline/user/7/filtered");
        assert_eq!(timeline_count(7), "/api/v1/timeline/user/7/count");
        assert_eq!(friend_count(2), "/api/v1/friendships/user/2/count");
        assert_eq!(timeline_by_date_range(7), "/api/v1/timeline/user/7/daterange");
        assert_eq!(
            timeline_count_by_date_range(7),
            "/api/v1/timeline/user/7/count/daterange"
        );
    }

    #[test]
    fn test_query_encoding() {
        assert_eq!(
            with_query(USERS, &[("search", "ana maria")]),
            "/api/v1/users?search=ana%20maria"
        );
        assert_eq!(with_query::<&str, &str>(USERS, &[]), USERS);
        assert_eq!(
            with_query(
                "/x",
                &[("fromDate", "2024-01-01T00:00:00"), ("page", "0")]
            ),
            "/x?fromDate=2024-01-01T00%3A00%3A00&page=0"
        );
    }

    #[test]
    fn test_username_is_encoded() {
        assert_eq!(user_by_username("a/b"), "/api/v1/users/username/a%2Fb");
    }
}
