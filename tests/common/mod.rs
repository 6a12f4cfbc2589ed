//! Shared fixtures for integration tests.
//!
//! JSON bodies mirror what the backend sends: camelCase keys and naive
//! `yyyy-MM-ddTHH:mm:ss` timestamps.

#![allow(dead_code)]

use serde_json::{json, Value};
use std::sync::Arc;

use social_client::adapters::mock::MockHttpClient;
use social_client::api::ApiClient;
use social_client::queries::Queries;
use social_client::query::QueryClient;

pub const BASE_URL: &str = "http://api.test";

/// Full URL of an API path on the mock base.
pub fn url(path: &str) -> String {
    format!("{}{}", BASE_URL, path)
}

/// Route key for [`MockHttpClient::set_response`].
pub fn route(method: &str, path: &str) -> String {
    format!("{} {}", method, url(path))
}

/// Queries over a fresh mock transport and an empty cache.
pub fn mock_queries() -> (MockHttpClient, Queries) {
    let mock = MockHttpClient::new();
    let api = ApiClient::with_http_client(BASE_URL, Arc::new(mock.clone()));
    (mock, Queries::new(api, QueryClient::default(), 10))
}

pub fn user_json(id: i64, username: &str) -> Value {
    json!({
        "id": id,
        "username": username,
        "email": format!("{}@example.com", username),
        "createdAt": "2024-01-15T10:30:00"
    })
}

pub fn post_json(id: i64, user_id: i64, text: &str) -> Value {
    json!({
        "id": id,
        "text": text,
        "userId": user_id,
        "createdAt": "2024-03-01T09:00:00",
        "updatedAt": null
    })
}

pub fn timeline_post_json(id: i64, user_id: i64, username: &str, text: &str) -> Value {
    json!({
        "id": id,
        "text": text,
        "userId": user_id,
        "username": username,
        "createdAt": "2024-03-01T09:00:00"
    })
}

pub fn friendship_json(id: i64, user_id: i64, friend_id: i64, friend_username: &str) -> Value {
    json!({
        "id": id,
        "userId": user_id,
        "username": "owner",
        "friendId": friend_id,
        "friendUsername": friend_username,
        "createdAt": "2024-02-01T08:00:00"
    })
}

/// A Spring-style page envelope around `content`.
pub fn page_json(content: Vec<Value>, number: u32, size: u32, total_elements: u64) -> Value {
    let total_pages = if size == 0 {
        0
    } else {
        ((total_elements + size as u64 - 1) / size as u64) as u32
    };
    json!({
        "content": content,
        "totalElements": total_elements,
        "totalPages": total_pages,
        "size": size,
        "number": number,
        "first": number == 0,
        "last": total_pages == 0 || number + 1 >= total_pages
    })
}
