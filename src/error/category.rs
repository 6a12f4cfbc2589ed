//! Error category classification for unified error handling.
//!
//! This module provides a high-level categorization of errors so the view
//! layer can decide how to present a failure without matching on every
//! concrete variant.

use std::fmt;

/// High-level categorization of errors for handling decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Network-related errors (connection refused, timeout).
    Network,

    /// The API rejected the request with a 5xx status.
    Server,

    /// The API rejected the request with a 4xx status, or the client
    /// misused the cache (type mismatch on a key).
    Client,

    /// Local validation failed before any request was made.
    User,

    /// Filesystem or OS errors (session persistence).
    System,

    /// Missing or invalid configuration.
    Configuration,
}

impl ErrorCategory {
    /// Returns true if errors in this category are generally transient.
    ///
    /// Nothing in this crate retries automatically; the flag is exposed so
    /// the caller can offer a "try again" action.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorCategory::Network | ErrorCategory::Server)
    }

    /// Returns a short label for the category suitable for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "network",
            ErrorCategory::Server => "server",
            ErrorCategory::Client => "client",
            ErrorCategory::User => "user",
            ErrorCategory::System => "system",
            ErrorCategory::Configuration => "configuration",
        }
    }

    /// Returns a user-friendly description of the category.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "Network connectivity issue",
            ErrorCategory::Server => "Server-side issue",
            ErrorCategory::Client => "Request rejected",
            ErrorCategory::User => "Invalid input",
            ErrorCategory::System => "System error",
            ErrorCategory::Configuration => "Configuration problem",
        }
    }

    /// Returns suggested recovery actions for this category.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "Check your connection to the API and try again.",
            ErrorCategory::Server => "The server is having trouble. Try again in a moment.",
            ErrorCategory::Client => "Check the request and try again.",
            ErrorCategory::User => "Correct the highlighted input and submit again.",
            ErrorCategory::System => "Check file permissions in your home directory.",
            ErrorCategory::Configuration => "Check the SOCIAL_* environment variables.",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
