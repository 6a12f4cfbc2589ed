//! Local validation errors.
//!
//! These are raised before any request is sent, so they never reach the
//! network and never touch the cache.

use std::fmt;

/// Input rejected by local validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Post text is empty or whitespace only.
    EmptyPost,

    /// Post text is longer than the allowed maximum.
    PostTooLong { max: usize },

    /// A required form field was left blank.
    Required { field: &'static str },

    /// Username length outside the allowed range.
    UsernameLength { min: usize, max: usize },

    /// Email does not look like `local@domain.tld`.
    InvalidEmail,

    /// Timeline filter end date precedes its start date.
    InvalidDateRange,
}

impl ValidationError {
    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::EmptyPost => "E_VAL_POST_EMPTY",
            ValidationError::PostTooLong { .. } => "E_VAL_POST_LONG",
            ValidationError::Required { .. } => "E_VAL_REQUIRED",
            ValidationError::UsernameLength { .. } => "E_VAL_USERNAME",
            ValidationError::InvalidEmail => "E_VAL_EMAIL",
            ValidationError::InvalidDateRange => "E_VAL_DATE_RANGE",
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyPost => write!(f, "Post cannot be empty"),
            ValidationError::PostTooLong { max } => {
                write!(f, "Post must be at most {} characters", max)
            }
            ValidationError::Required { field } => write!(f, "{} is required", field),
            ValidationError::UsernameLength { min, max } => write!(
                f,
                "Username must be between {} and {} characters",
                min, max
            ),
            ValidationError::InvalidEmail => write!(f, "Invalid email format"),
            ValidationError::InvalidDateRange => write!(f, "End date must be after start date"),
        }
    }
}

impl std::error::Error for ValidationError {}
