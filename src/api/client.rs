//! HTTP plumbing shared by every resource family.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::adapters::ReqwestHttpClient;
use crate::config::AppConfig;
use crate::error::{ClientError, ClientResult, NetworkError};
use crate::traits::{Headers, HttpClient, Response};

/// Resource client for the social network API.
///
/// One attempt per call: no retries, no backoff. Non-2xx responses become
/// [`NetworkError::HttpStatus`] carrying the server's message.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    http: Arc<dyn HttpClient>,
    headers: Headers,
}

impl ApiClient {
    /// Create a client backed by reqwest with the configured timeout.
    pub fn new(config: &AppConfig) -> ClientResult<Self> {
        config.validate()?;
        let http = ReqwestHttpClient::with_timeout(config.timeout).map_err(|e| {
            ClientError::Configuration {
                message: format!("failed to build HTTP client: {}", e),
            }
        })?;
        Ok(Self::with_http_client(config.base_url.clone(), Arc::new(http)))
    }

    /// Create a client over any [`HttpClient`], e.g. a mock.
    pub fn with_http_client(base_url: impl Into<String>, http: Arc<dyn HttpClient>) -> Self {
        let mut headers = Headers::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert("Accept".to_string(), "application/json".to_string());

        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
            headers,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let url = self.url(path);
        debug!(url = %url, "GET");
        let response = self
            .http
            .get(&url, &self.headers)
            .await
            .map_err(|e| NetworkError::from_http(e, &url))?;
        decode(&url, response)
    }

    pub(crate) async fn post_json<B, T>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        let body = serde_json::to_string(body).map_err(|e| NetworkError::Other {
            message: format!("failed to encode request body: {}", e),
        })?;
        debug!(url = %url, "POST");
        let response = self
            .http
            .post(&url, &body, &self.headers)
            .await
            .map_err(|e| NetworkError::from_http(e, &url))?;
        decode(&url, response)
    }

    pub(crate) async fn put_json<B, T>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        let body = serde_json::to_string(body).map_err(|e| NetworkError::Other {
            message: format!("failed to encode request body: {}", e),
        })?;
        debug!(url = %url, "PUT");
        let response = self
            .http
            .put(&url, &body, &self.headers)
            .await
            .map_err(|e| NetworkError::from_http(e, &url))?;
        decode(&url, response)
    }

    /// DELETE; any 2xx counts as success and the body is ignored.
    pub(crate) async fn delete(&self, path: &str) -> ClientResult<()> {
        let url = self.url(path);
        debug!(url = %url, "DELETE");
        let response = self
            .http
            .delete(&url, &self.headers)
            .await
            .map_err(|e| NetworkError::from_http(e, &url))?;
        ensure_success(response).map(|_| ())
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

fn ensure_success(response: Response) -> ClientResult<Response> {
    if response.is_success() {
        Ok(response)
    } else {
        Err(NetworkError::from_status(response.status, &response.body).into())
    }
}

fn decode<T: DeserializeOwned>(url: &str, response: Response) -> ClientResult<T> {
    let response = ensure_success(response)?;
    response.json::<T>().map_err(|e| {
        NetworkError::InvalidResponse {
            message: format!("{}: {}", url, e),
        }
        .into()
    })
}
