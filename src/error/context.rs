//! Error context for enriched error information.
//!
//! Context records which operation and which cache key an error belongs to,
//! so a failure surfaced in a notification can be traced back in the logs.

use chrono::{DateTime, Utc};

/// Context information attached to errors for debugging.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorContext {
    /// Human-readable description of the operation that failed.
    pub operation: String,

    /// Cache key the operation was reading or invalidating, if any.
    pub query_key: Option<String>,

    /// Timestamp when the error occurred.
    pub timestamp: DateTime<Utc>,

    /// Optional component/module where the error originated.
    pub component: Option<String>,
}

impl ErrorContext {
    /// Create a new ErrorContext for an operation.
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            query_key: None,
            timestamp: Utc::now(),
            component: None,
        }
    }

    /// Set the cache key for this context.
    pub fn with_query_key(mut self, key: impl Into<String>) -> Self {
        self.query_key = Some(key.into());
        self
    }

    /// Set the component for this context.
    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.component = Some(component.into());
        self
    }

    /// Get a formatted context string suitable for logging.
    pub fn to_log_string(&self) -> String {
        let mut parts = vec![format!("operation={}", self.operation)];

        if let Some(ref key) = self.query_key {
            parts.push(format!("query_key={}", key));
        }

        if let Some(ref component) = self.component {
            parts.push(format!("component={}", component));
        }

        parts.push(format!("timestamp={}", self.timestamp.to_rfc3339()));

        parts.join(" ")
    }
}

impl std::fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.operation)?;

        if let Some(ref key) = self.query_key {
            write!(f, " key={}", key)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_builder() {
        let ctx = ErrorContext::new("fetch_timeline")
            .with_query_key("timeline/7")
            .with_component("query");

        assert_eq!(ctx.operation, "fetch_timeline");
        assert_eq!(ctx.query_key.as_deref(), Some("timeline/7"));
        assert_eq!(ctx.component.as_deref(), Some("query"));
        assert_eq!(ctx.to_string(), "[fetch_timeline] key=timeline/7");
    }

    #[test]
    fn test_log_string_contains_fields() {
        let log = ErrorContext::new("create_post")
            .with_component("queries")
            .to_log_string();
        assert!(log.starts_with("operation=create_post"));
        assert!(log.contains("component=queries"));
        assert!(log.contains("timestamp="));
        assert!(!log.contains("query_key"));
    }
}
