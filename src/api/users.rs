//! User endpoints

use crate::error::ClientResult;
use crate::models::{User, UserRequest};

use super::endpoints::{self, with_query, USERS};
use super::ApiClient;

impl ApiClient {
    pub async fn list_users(&self) -> ClientResult<Vec<User>> {
        self.get_json(USERS).await
    }

    pub async fn search_users(&self, term: &str) -> ClientResult<Vec<User>> {
        self.get_json(&with_query(USERS, &[("search", term)])).await
    }

    pub async fn get_user(&self, id: i64) -> ClientResult<User> {
        self.get_json(&endpoints::user_by_id(id)).await
    }

    pub async fn get_user_by_username(&self, username: &str) -> ClientResult<User> {
        self.get_json(&endpoints::user_by_username(username)).await
    }

    pub async fn create_user(&self, request: &UserRequest) -> ClientResult<User> {
        self.post_json(USERS, request).await
    }

    pub async fn update_user(&self, id: i64, request: &UserRequest) -> ClientResult<User> {
        self.put_json(&endpoints::user_by_id(id), request).await
    }

    pub async fn delete_user(&self, id: i64) -> ClientResult<()> {
        self.delete(&endpoints::user_by_id(id)).await
    }
}

#[cfg(test)]
mod tests {
    use crate::adapters::mock::{MockHttpClient, MockResponse};
    use crate::api::ApiClient;
    use crate::models::UserRequest;
    use serde_json::json;
    use std::sync::Arc;

    fn setup() -> (MockHttpClient, ApiClient) {
        let mock = MockHttpClient::new();
        let api = ApiClient::with_http_client("http://api.test", Arc::new(mock.clone()));
        (mock, api)
    }

    #[tokio::test]
    async fn test_search_encodes_term() {
        let (mock, api) = setup();
        mock.set_response(
            "GET http://api.test/api/v1/users?search=ana%20b",
            MockResponse::json(200, json!([{"id": 1, "username": "ana b", "email": "a@b.co"}])),
        );

        let users = api.search_users("ana b").await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].username, "ana b");
    }

    #[tokio::test]
    async fn test_update_user_puts_body() {
        let (mock, api) = setup();
        mock.set_response(
            "PUT http://api.test/api/v1/users/4",
            MockResponse::json(200, json!({"id": 4, "username": "new", "email": "n@x.io"})),
        );

        let user = api
            .update_user(4, &UserRequest::new("new", "n@x.io"))
            .await
            .unwrap();
        assert_eq!(user.username, "new");
        let body = mock.get_requests()[0].body.clone().unwrap();
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&body).unwrap(),
            json!({"username": "new", "email": "n@x.io"})
        );
    }

    #[tokio::test]
    async fn test_get_by_username() {
        let (mock, api) = setup();
        mock.set_response(
            "GET http://api.test/api/v1/users/username/bo",
            MockResponse::json(200, json!({"id": 2, "username": "bo", "email": "bo@x.io"})),
        );
        assert_eq!(api.get_user_by_username("bo").await.unwrap().id, 2);
    }
}
