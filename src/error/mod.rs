//! Unified error handling for the client layer.
//!
//! - **Error Categories**: High-level classification for presentation decisions
//! - **Domain-specific Errors**: Network and validation errors
//! - **Unified Error Type**: `ClientError` consolidates all error types
//! - **Error Context**: Operation and cache key attached to errors
//! - **Result Type Alias**: `ClientResult<T>` for consistent return types
//!
//! # Propagation
//!
//! | Source | Surfaced as | Retried |
//! |--------|-------------|---------|
//! | Connection refused, timeout | `Network` | Never automatically |
//! | Non-2xx response | `Network(HttpStatus)` with server message | Never |
//! | Friendship check 404 | `Ok(false)` | n/a |
//! | Local validation | `Validation` | n/a, no request sent |
//!
//! Failures are scoped to the operation that triggered them. Cached data from
//! earlier successful reads is left intact.

mod category;
mod client_error;
mod context;
mod network;
mod result;
mod validation;

pub use category::ErrorCategory;
pub use client_error::ClientError;
pub use context::ErrorContext;
pub use network::NetworkError;
pub use result::{ClientResult, ResultExt};
pub use validation::ValidationError;

#[cfg(test)]
mod integration_tests {
    use super::*;
    use crate::traits::StoreError;

    #[test]
    fn test_error_unification() {
        let net: ClientError = NetworkError::Timeout {
            url: "http://localhost/api/v1/users".to_string(),
            message: "elapsed".to_string(),
        }
        .into();
        let val: ClientError = ValidationError::InvalidEmail.into();
        let store: ClientError = StoreError::SaveFailed("disk full".to_string()).into();

        assert_eq!(net.category(), ErrorCategory::Network);
        assert_eq!(val.category(), ErrorCategory::User);
        assert_eq!(store.category(), ErrorCategory::System);

        for err in [&net, &val, &store] {
            assert!(!err.error_code().is_empty());
            assert!(!err.user_message().is_empty());
        }
    }

    #[test]
    fn test_clone_preserves_everything() {
        let err: ClientError = NetworkError::HttpStatus {
            status: 409,
            message: "conflict".to_string(),
        }
        .into();
        let err = err.with_context(ErrorContext::new("add_friend"));
        let cloned = err.clone();

        assert_eq!(err.to_string(), cloned.to_string());
        assert_eq!(cloned.status(), Some(409));
        assert_eq!(cloned.context(), err.context());
    }
}
