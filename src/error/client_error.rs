//! Unified error type for the client layer.
//!
//! `ClientError` is what every read and write in this crate returns. It is
//! `Clone` because a single coalesced request may have many waiting callers
//! and each of them receives the same failure.

use std::fmt;

use super::category::ErrorCategory;
use super::context::ErrorContext;
use super::network::NetworkError;
use super::validation::ValidationError;
use crate::traits::StoreError;

/// Unified error type for the client layer.
#[derive(Debug, Clone)]
pub enum ClientError {
    /// Transport failure or server rejection.
    Network(NetworkError),

    /// Input rejected before any request was sent.
    Validation(ValidationError),

    /// Session snapshot could not be read or written.
    Storage(StoreError),

    /// Invalid configuration value.
    Configuration { message: String },

    /// A cache key was read back as a different type than it was stored as.
    TypeMismatch { key: String },

    /// Wrapped error with additional context.
    WithContext {
        error: Box<ClientError>,
        context: ErrorContext,
    },
}

impl ClientError {
    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ClientError::Network(err) => match err {
                NetworkError::HttpStatus { status, .. } if *status >= 500 => ErrorCategory::Server,
                NetworkError::HttpStatus { .. } | NetworkError::InvalidResponse { .. } => {
                    ErrorCategory::Client
                }
                NetworkError::InvalidUrl { .. } => ErrorCategory::Configuration,
                _ => ErrorCategory::Network,
            },
            ClientError::Validation(_) => ErrorCategory::User,
            ClientError::Storage(_) => ErrorCategory::System,
            ClientError::Configuration { .. } => ErrorCategory::Configuration,
            ClientError::TypeMismatch { .. } => ErrorCategory::Client,
            ClientError::WithContext { error, .. } => error.category(),
        }
    }

    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::Network(err) => err.is_retryable(),
            ClientError::WithContext { error, .. } => error.is_retryable(),
            _ => false,
        }
    }

    /// Get a user-friendly error message.
    ///
    /// Validation failures keep their exact text since forms display it
    /// inline next to the offending field.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Network(err) => err.user_message(),
            ClientError::Validation(err) => err.to_string(),
            ClientError::Storage(_) => "Could not save your session.".to_string(),
            ClientError::Configuration { message } => format!("Configuration error: {}", message),
            ClientError::TypeMismatch { .. } => {
                "An error occurred. Please try again.".to_string()
            }
            ClientError::WithContext { error, .. } => error.user_message(),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            ClientError::Network(err) => err.error_code(),
            ClientError::Validation(err) => err.error_code(),
            ClientError::Storage(_) => "E_SYS_STORE",
            ClientError::Configuration { .. } => "E_CFG",
            ClientError::TypeMismatch { .. } => "E_CACHE_TYPE",
            ClientError::WithContext { error, .. } => error.error_code(),
        }
    }

    /// Attach context to this error.
    pub fn with_context(self, ctx: ErrorContext) -> Self {
        ClientError::WithContext {
            error: Box::new(self),
            context: ctx,
        }
    }

    /// Get the context if this error has one attached.
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            ClientError::WithContext { context, .. } => Some(context),
            _ => None,
        }
    }

    /// Get the inner error without context.
    pub fn inner(&self) -> &ClientError {
        match self {
            ClientError::WithContext { error, .. } => error.inner(),
            _ => self,
        }
    }

    /// The HTTP status of a server rejection, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self.inner() {
            ClientError::Network(err) => err.status(),
            _ => None,
        }
    }

    /// True when the server answered 404.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Get the recovery hint for this error.
    pub fn recovery_hint(&self) -> &'static str {
        self.category().recovery_hint()
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Network(err) => write!(f, "{}", err),
            ClientError::Validation(err) => write!(f, "{}", err),
            ClientError::Storage(err) => write!(f, "{}", err),
            ClientError::Configuration { message } => write!(f, "Configuration error: {}", message),
            ClientError::TypeMismatch { key } => {
                write!(f, "Cached value for '{}' has an unexpected type", key)
            }
            ClientError::WithContext { error, context } => write!(f, "{} ({})", error, context),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ClientError::Network(err) => Some(err),
            ClientError::Validation(err) => Some(err),
            ClientError::Storage(err) => Some(err),
            ClientError::WithContext { error, .. } => error.source(),
            _ => None,
        }
    }
}

impl From<NetworkError> for ClientError {
    fn from(err: NetworkError) -> Self {
        ClientError::Network(err)
    }
}

impl From<ValidationError> for ClientError {
    fn from(err: ValidationError) -> Self {
        ClientError::Validation(err)
    }
}

impl From<StoreError> for ClientError {
    fn from(err: StoreError) -> Self {
        ClientError::Storage(err)
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Network(NetworkError::InvalidResponse {
            message: err.to_string(),
        })
    }
}
