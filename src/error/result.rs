//! Result type alias for client operations.

use super::client_error::ClientError;
use super::context::ErrorContext;

/// Type alias for Results using ClientError.
pub type ClientResult<T> = Result<T, ClientError>;

/// Extension trait for Result types to add context to errors.
pub trait ResultExt<T> {
    /// Add context to an error if the result is Err.
    fn context(self, ctx: ErrorContext) -> ClientResult<T>;

    /// Add context using a closure (only called on error).
    fn with_context<F>(self, f: F) -> ClientResult<T>
    where
        F: FnOnce() -> ErrorContext;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Into<ClientError>,
{
    fn context(self, ctx: ErrorContext) -> ClientResult<T> {
        self.map_err(|e| e.into().with_context(ctx))
    }

    fn with_context<F>(self, f: F) -> ClientResult<T>
    where
        F: FnOnce() -> ErrorContext,
    {
        self.map_err(|e| e.into().with_context(f()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    #[test]
    fn test_context_on_err() {
        let result: Result<(), ValidationError> = Err(ValidationError::EmptyPost);
        let err = result.context(ErrorContext::new("create_post")).unwrap_err();
        assert_eq!(err.context().unwrap().operation, "create_post");
    }

    #[test]
    fn test_with_context_is_lazy_on_ok() {
        let result: Result<u8, ValidationError> = Ok(1);
        let value = result
            .with_context(|| panic!("context built for Ok"))
            .unwrap();
        assert_eq!(value, 1);
    }
}
