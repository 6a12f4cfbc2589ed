//! Read state exposed to the view layer.

use crate::error::ClientError;
use crate::models::{Friendship, Page, Post, TimelinePost, User};

/// Screen-level state derived from a read: `idle → loading → success | error`,
/// with `success` branching to `empty` for zero-element collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStatus {
    /// Read disabled (a required parameter is missing)
    Idle,
    Loading,
    Success,
    Empty,
    Error,
}

/// Whether a value counts as "nothing to show".
pub trait MaybeEmpty {
    fn is_empty_value(&self) -> bool {
        false
    }
}

impl<T> MaybeEmpty for Vec<T> {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<T> MaybeEmpty for Page<T> {
    fn is_empty_value(&self) -> bool {
        self.content.is_empty()
    }
}

impl MaybeEmpty for User {}
impl MaybeEmpty for Post {}
impl MaybeEmpty for Friendship {}
impl MaybeEmpty for TimelinePost {}
impl MaybeEmpty for bool {}
impl MaybeEmpty for u64 {}

/// `{data, is_loading, error}` for one read.
#[derive(Debug, Clone)]
pub struct QueryState<T> {
    pub data: Option<T>,
    pub is_loading: bool,
    pub error: Option<ClientError>,
    pub(crate) enabled: bool,
}

impl<T> QueryState<T> {
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            is_loading: false,
            error: None,
            enabled: true,
        }
    }

    pub fn failed(data: Option<T>, error: ClientError) -> Self {
        Self {
            data,
            is_loading: false,
            error: Some(error),
            enabled: true,
        }
    }

    /// No call was made; `data` is the placeholder for the missing parameter.
    pub fn disabled(data: Option<T>) -> Self {
        Self {
            data,
            is_loading: false,
            error: None,
            enabled: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Data if the read succeeded, otherwise the error.
    pub fn into_result(self) -> Result<Option<T>, ClientError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.data),
        }
    }
}

impl<T: MaybeEmpty> QueryState<T> {
    pub fn status(&self) -> QueryStatus {
        if !self.enabled {
            return QueryStatus::Idle;
        }
        if self.error.is_some() {
            return QueryStatus::Error;
        }
        match &self.data {
            None if self.is_loading => QueryStatus::Loading,
            None => QueryStatus::Idle,
            Some(data) if data.is_empty_value() => QueryStatus::Empty,
            Some(_) => QueryStatus::Success,
        }
    }
}

impl<T> Default for QueryState<T> {
    fn default() -> Self {
        Self {
            data: None,
            is_loading: false,
            error: None,
            enabled: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_transitions() {
        let loading: QueryState<Vec<u8>> = QueryState {
            is_loading: true,
            ..Default::default()
        };
        assert_eq!(loading.status(), QueryStatus::Loading);

        assert_eq!(QueryState::success(vec![1u8]).status(), QueryStatus::Success);
        assert_eq!(QueryState::success(Vec::<u8>::new()).status(), QueryStatus::Empty);
        assert_eq!(
            QueryState::success(Page::<u8>::empty()).status(),
            QueryStatus::Empty
        );
        assert_eq!(QueryState::success(false).status(), QueryStatus::Success);
    }

    #[test]
    fn test_disabled_is_idle() {
        let state = QueryState::disabled(Some(Vec::<u8>::new()));
        assert!(!state.is_enabled());
        assert_eq!(state.status(), QueryStatus::Idle);
    }

    #[test]
    fn test_error_wins_over_stale_data() {
        let state = QueryState::failed(
            Some(vec![1u8]),
            ClientError::Configuration {
                message: "x".into(),
            },
        );
        assert_eq!(state.status(), QueryStatus::Error);
        assert!(state.into_result().is_err());
    }
}
