//! Local input validation, run before any request is sent.

use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ValidationError;
use crate::models::UserRequest;

pub const POST_MIN_LENGTH: usize = 1;
pub const POST_MAX_LENGTH: usize = 1000;
pub const NAME_MIN_LENGTH: usize = 2;
pub const NAME_MAX_LENGTH: usize = 100;

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid email regex pattern"));

/// Post text must hold 1 to 1000 characters, not counting surrounding
/// whitespace for the emptiness check.
pub fn validate_post_text(text: &str) -> Result<(), ValidationError> {
    if text.trim().chars().count() < POST_MIN_LENGTH {
        return Err(ValidationError::EmptyPost);
    }
    if text.chars().count() > POST_MAX_LENGTH {
        return Err(ValidationError::PostTooLong {
            max: POST_MAX_LENGTH,
        });
    }
    Ok(())
}

pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    let len = username.trim().chars().count();
    if len == 0 {
        return Err(ValidationError::Required { field: "Username" });
    }
    if !(NAME_MIN_LENGTH..=NAME_MAX_LENGTH).contains(&len) {
        return Err(ValidationError::UsernameLength {
            min: NAME_MIN_LENGTH,
            max: NAME_MAX_LENGTH,
        });
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.trim().is_empty() {
        return Err(ValidationError::Required { field: "Email" });
    }
    if !EMAIL_REGEX.is_match(email) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

pub fn validate_user(request: &UserRequest) -> Result<(), ValidationError> {
    validate_username(&request.username)?;
    validate_email(&request.email)
}

/// The end of a timeline filter may not precede its start. Open bounds are
/// always valid.
pub fn validate_date_range(
    from: Option<NaiveDateTime>,
    to: Option<NaiveDateTime>,
) -> Result<(), ValidationError> {
    match (from, to) {
        (Some(from), Some(to)) if to < from => Err(ValidationError::InvalidDateRange),
        _ => Ok(()),
    }
}
