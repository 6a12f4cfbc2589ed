//! Application configuration.
//!
//! Every setting comes from the environment with a default; unparsable
//! numbers fall back to the default rather than failing startup.

use std::time::Duration;

use crate::error::{ClientError, ClientResult};
use crate::query::CachePolicies;

pub const DEFAULT_BASE_URL: &str = "http://localhost";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_APP_NAME: &str = "Social Network";
pub const DEFAULT_PAGE_SIZE: u32 = 10;

pub const ENV_BASE_URL: &str = "SOCIAL_API_BASE_URL";
pub const ENV_TIMEOUT_MS: &str = "SOCIAL_API_TIMEOUT_MS";
pub const ENV_APP_NAME: &str = "SOCIAL_APP_NAME";
pub const ENV_PAGE_SIZE: &str = "SOCIAL_DEFAULT_PAGE_SIZE";

/// Configuration for the client layer.
///
/// Use the builder methods to override individual settings.
///
/// # Example
///
/// ```ignore
/// use social_client::config::AppConfig;
///
/// let config = AppConfig::from_env()
///     .with_base_url("http://localhost:9091")
///     .with_default_page_size(20);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// API base URL, without the `/api/v1` prefix
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Display name for the view layer
    pub app_name: String,
    /// Page size used when a timeline read does not name one
    pub default_page_size: u32,
    /// Freshness and retention per family
    pub cache: CachePolicies,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            app_name: DEFAULT_APP_NAME.to_string(),
            default_page_size: DEFAULT_PAGE_SIZE,
            cache: CachePolicies::default(),
        }
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read every setting from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read settings through `lookup`; missing or empty values keep defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(url) = get(ENV_BASE_URL) {
            config.base_url = url.trim().to_string();
        }
        if let Some(ms) = get(ENV_TIMEOUT_MS).and_then(|v| parse_positive::<u64>(&v)) {
            config.timeout = Duration::from_millis(ms);
        }
        if let Some(name) = get(ENV_APP_NAME) {
            config.app_name = name;
        }
        if let Some(size) = get(ENV_PAGE_SIZE).and_then(|v| parse_positive::<u32>(&v)) {
            config.default_page_size = size;
        }
        config
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_app_name(mut self, name: impl Into<String>) -> Self {
        self.app_name = name.into();
        self
    }

    pub fn with_default_page_size(mut self, size: u32) -> Self {
        self.default_page_size = size;
        self
    }

    pub fn with_cache(mut self, cache: CachePolicies) -> Self {
        self.cache = cache;
        self
    }

    /// Reject settings no request could succeed with.
    pub fn validate(&self) -> ClientResult<()> {
        let url = self.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ClientError::Configuration {
                message: format!("base URL must start with http:// or https://, got '{}'", url),
            });
        }
        if self.timeout.is_zero() {
            return Err(ClientError::Configuration {
                message: "request timeout must be greater than zero".to_string(),
            });
        }
        if self.default_page_size == 0 {
            return Err(ClientError::Configuration {
                message: "default page size must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

fn parse_positive<N>(raw: &str) -> Option<N>
where
    N: std::str::FromStr + PartialOrd + Default,
{
    raw.trim().parse::<N>().ok().filter(|n| *n > N::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.base_url, "http://localhost");
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.app_name, "Social Network");
        assert_eq!(config.default_page_size, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            (ENV_BASE_URL, "http://localhost:9091"),
            (ENV_TIMEOUT_MS, "2500"),
            (ENV_APP_NAME, "Friends"),
            (ENV_PAGE_SIZE, "25"),
        ]));
        assert_eq!(config.base_url, "http://localhost:9091");
        assert_eq!(config.timeout, Duration::from_millis(2500));
        assert_eq!(config.app_name, "Friends");
        assert_eq!(config.default_page_size, 25);
    }

    #[test]
    fn test_unparsable_numbers_fall_back() {
        let config = AppConfig::from_lookup(lookup(&[
            (ENV_TIMEOUT_MS, "soon"),
            (ENV_PAGE_SIZE, "0"),
            (ENV_APP_NAME, "   "),
        ]));
        assert_eq!(config.timeout, Duration::from_millis(DEFAULT_TIMEOUT_MS));
        assert_eq!(config.default_page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.app_name, DEFAULT_APP_NAME);
    }

    #[test]
    #[serial]
    fn test_from_env_reads_process_environment() {
        std::env::set_var(ENV_PAGE_SIZE, "42");
        let config = AppConfig::from_env();
        std::env::remove_var(ENV_PAGE_SIZE);
        assert_eq!(config.default_page_size, 42);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(AppConfig::default().with_base_url("localhost").validate().is_err());
        assert!(AppConfig::default()
            .with_timeout(Duration::ZERO)
            .validate()
            .is_err());
        assert!(AppConfig::default()
            .with_default_page_size(0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_builder() {
        let config = AppConfig::new()
            .with_base_url("https://api.example.com")
            .with_app_name("X");
        assert_eq!(config.base_url, "https://api.example.com");
        assert_eq!(config.app_name, "X");
    }
}
