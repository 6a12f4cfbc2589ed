//! Transient UI state: notifications, modal flags, timeline filter.
//!
//! In memory only. A fresh [`UiState`] is empty; nothing here is persisted.

use chrono::{DateTime, NaiveDateTime, Utc};
use uuid::Uuid;

use crate::error::{ClientError, ValidationError};
use crate::models::TimelineFilter;
use crate::validation::validate_date_range;

/// Texts shown by the view layer.
pub mod messages {
    pub const POST_CREATED: &str = "Post created successfully!";
    pub const POST_DELETED: &str = "Post deleted successfully!";
    pub const FRIEND_ADDED: &str = "Friend added successfully!";
    pub const FRIEND_REMOVED: &str = "Friend removed successfully!";
    pub const ERROR_GENERIC: &str = "An error occurred. Please try again.";
    pub const ERROR_NETWORK: &str = "Network error. Please check your connection.";
    pub const LOADING: &str = "Loading...";
    pub const NO_POSTS: &str = "No posts to display.";
    pub const NO_FRIENDS: &str = "No friends yet. Start by adding some!";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    Info,
    Warning,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Error => "error",
            Severity::Info => "info",
            Severity::Warning => "warning",
        }
    }
}

/// A toast notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: String,
    pub message: String,
    pub severity: Severity,
    pub created_at: DateTime<Utc>,
}

/// Which modal dialogs are open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModalFlags {
    pub post_modal_open: bool,
    pub user_search_modal_open: bool,
}

#[derive(Debug, Clone, Default)]
pub struct UiState {
    modals: ModalFlags,
    /// Insertion order
    notifications: Vec<Notification>,
    timeline_filter: TimelineFilter,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn modals(&self) -> ModalFlags {
        self.modals
    }

    pub fn open_post_modal(&mut self) {
        self.modals.post_modal_open = true;
    }

    pub fn close_post_modal(&mut self) {
        self.modals.post_modal_open = false;
    }

    pub fn open_user_search_modal(&mut self) {
        self.modals.user_search_modal_open = true;
    }

    pub fn close_user_search_modal(&mut self) {
        self.modals.user_search_modal_open = false;
    }

    /// Append a notification and return its generated id.
    pub fn add_notification(&mut self, message: impl Into<String>, severity: Severity) -> String {
        let id = Uuid::new_v4().to_string();
        self.notifications.push(Notification {
            id: id.clone(),
            message: message.into(),
            severity,
            created_at: Utc::now(),
        });
        id
    }

    /// Report a failed operation: validation text verbatim, a connection
    /// message for transport failures, the generic message otherwise.
    pub fn notify_error(&mut self, error: &ClientError) -> String {
        let message = match error.inner() {
            ClientError::Validation(v) => v.to_string(),
            ClientError::Network(n) if n.status().is_none() && n.is_retryable() => {
                messages::ERROR_NETWORK.to_string()
            }
            other => other.user_message(),
        };
        self.add_notification(message, Severity::Error)
    }

    /// Remove by id; returns whether anything was removed.
    pub fn remove_notification(&mut self, id: &str) -> bool {
        let before = self.notifications.len();
        self.notifications.retain(|n| n.id != id);
        self.notifications.len() < before
    }

    pub fn clear_notifications(&mut self) {
        self.notifications.clear();
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn timeline_filter(&self) -> TimelineFilter {
        self.timeline_filter
    }

    /// Set the date range; an end before the start is rejected and the
    /// previous filter kept.
    pub fn set_timeline_filter(
        &mut self,
        from_date: Option<NaiveDateTime>,
        to_date: Option<NaiveDateTime>,
    ) -> Result<(), ValidationError> {
        validate_date_range(from_date, to_date)?;
        self.timeline_filter = TimelineFilter::new(from_date, to_date);
        Ok(())
    }

    pub fn clear_timeline_filter(&mut self) {
        self.timeline_filter = TimelineFilter::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NetworkError;
    use crate::models::parse_timestamp;

    #[test]
    fn test_notifications_keep_insertion_order() {
        let mut ui = UiState::new();
        let a = ui.add_notification(messages::POST_CREATED, Severity::Success);
        let b = ui.add_notification("second", Severity::Info);
        assert_ne!(a, b);

        let texts: Vec<_> = ui.notifications().iter().map(|n| n.message.as_str()).collect();
        assert_eq!(texts, vec!["Post created successfully!", "second"]);

        assert!(ui.remove_notification(&a));
        assert!(!ui.remove_notification(&a));
        assert_eq!(ui.notifications().len(), 1);
        assert_eq!(ui.notifications()[0].id, b);
    }

    #[test]
    fn test_modal_flags() {
        let mut ui = UiState::new();
        assert_eq!(ui.modals(), ModalFlags::default());
        ui.open_post_modal();
        ui.open_user_search_modal();
        ui.close_post_modal();
        assert!(!ui.modals().post_modal_open);
        assert!(ui.modals().user_search_modal_open);
    }

    #[test]
    fn test_timeline_filter() {
        let mut ui = UiState::new();
        let jan = parse_timestamp("2024-01-01T00:00:00");
        let feb = parse_timestamp("2024-02-01T00:00:00");

        ui.set_timeline_filter(jan, feb).unwrap();
        assert_eq!(ui.timeline_filter().from_date, jan);

        assert_eq!(
            ui.set_timeline_filter(feb, jan),
            Err(ValidationError::InvalidDateRange)
        );
        assert_eq!(ui.timeline_filter().to_date, feb);

        ui.clear_timeline_filter();
        assert!(ui.timeline_filter().is_empty());
    }

    #[test]
    fn test_notify_error_messages() {
        let mut ui = UiState::new();
        ui.notify_error(&ValidationError::EmptyPost.into());
        ui.notify_error(
            &NetworkError::ConnectionFailed {
                url: "http://x".into(),
                message: "refused".into(),
            }
            .into(),
        );
        ui.notify_error(
            &NetworkError::HttpStatus {
                status: 409,
                message: "conflict".into(),
            }
            .into(),
        );

        let texts: Vec<_> = ui.notifications().iter().map(|n| n.message.clone()).collect();
        assert_eq!(
            texts,
            vec![
                "Post cannot be empty".to_string(),
                messages::ERROR_NETWORK.to_string(),
                messages::ERROR_GENERIC.to_string(),
            ]
        );
        assert!(ui.notifications().iter().all(|n| n.severity == Severity::Error));
    }
}
