//! Client state containers
//!
//! - [`SessionContext`]: persisted single-slot active user
//! - [`UiState`]: in-memory notifications, modal flags and timeline filter

pub mod session;
pub mod ui;

pub use session::{SessionContext, SessionSnapshot, SessionState};
pub use ui::{messages, ModalFlags, Notification, Severity, UiState};
