//! CLI front end.
//!
//! A thin view layer over [`Queries`]: every command reads through the cache,
//! writes through the invalidating mutations, and reports outcomes as
//! [`UiState`] notifications.
//!
//! ```ignore
//! use social_client::cli::{parse_args, Cli};
//!
//! let command = parse_args(std::env::args())?;
//! let mut cli = Cli::new(queries, session);
//! for line in cli.run(command).await? {
//!     println!("{}", line);
//! }
//! ```

pub mod args;
pub mod version;

pub use args::{parse_args, ArgsError, CliCommand, USAGE};
pub use version::{help_lines, version_line, VERSION};

use chrono::NaiveDateTime;

use crate::config::DEFAULT_APP_NAME;

use crate::dates::{format_date, format_relative_time};
use crate::error::{ClientResult, ErrorContext, ResultExt, ValidationError};
use crate::models::{format_timestamp, FriendshipRequest, Page, PostRequest, TimelinePost};
use crate::queries::Queries;
use crate::query::QueryState;
use crate::state::{messages, SessionContext, Severity, UiState};

/// Command runner holding the read/write layer and both state stores.
#[derive(Debug)]
pub struct Cli {
    queries: Queries,
    session: SessionContext,
    ui: UiState,
    app_name: String,
}

impl Cli {
    pub fn new(queries: Queries, session: SessionContext) -> Self {
        Self {
            queries,
            session,
            ui: UiState::new(),
            app_name: DEFAULT_APP_NAME.to_string(),
        }
    }

    /// Display name shown by `help` and `version`.
    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = app_name.into();
        self
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    /// Run one command and return its output lines.
    ///
    /// Failures are also recorded as error notifications.
    pub async fn run(&mut self, command: CliCommand) -> ClientResult<Vec<String>> {
        let mut out = Vec::new();
        let result = self.dispatch(command, &mut out).await;
        match result {
            Ok(()) => Ok(out),
            Err(err) => {
                self.ui.notify_error(&err);
                Err(err)
            }
        }
    }

    /// Drain notifications, oldest first.
    pub fn take_notifications(&mut self) -> Vec<String> {
        let lines = self
            .ui
            .notifications()
            .iter()
            .map(|n| format!("[{}] {}", n.severity.as_str(), n.message))
            .collect();
        self.ui.clear_notifications();
        lines
    }

    async fn dispatch(&mut self, command: CliCommand, out: &mut Vec<String>) -> ClientResult<()> {
        match command {
            CliCommand::Version => {
                out.push(version_line(&self.app_name));
                Ok(())
            }
            CliCommand::Help => {
                out.extend(help_lines(&self.app_name));
                Ok(())
            }
            CliCommand::Login { user_id } => self.login(user_id, out).await,
            CliCommand::Logout => {
                self.session.logout().await?;
                self.ui.add_notification("Logged out.", Severity::Info);
                Ok(())
            }
            CliCommand::Whoami => self.whoami(out).await,
            CliCommand::Users { search } => {
                let state = match search {
                    Some(term) => self.queries.search_users(&term).await,
                    None => self.queries.all_users().await,
                };
                let users = settle(state, "list_users")?;
                for user in users {
                    out.push(format!("{:>5}  {:<20} {}", user.id, user.username, user.email));
                }
                Ok(())
            }
            CliCommand::User { id } => {
                let user = settle(self.queries.user(Some(id)).await, "get_user")?;
                out.push(format!("#{} {} <{}>", user.id, user.username, user.email));
                if let Some(created) = user.created_at {
                    out.push(format!("joined {}", format_date(&format_timestamp(&created))));
                }
                Ok(())
            }
            CliCommand::Posts { user_id } => {
                let user_id = user_id.or(self.session.current_user_id());
                let posts = settle(self.queries.posts_by_user(user_id).await, "posts_by_user")?;
                if posts.is_empty() {
                    out.push(messages::NO_POSTS.to_string());
                    return Ok(());
                }
                for post in posts {
                    let when = format_relative_time(&format_timestamp(&post.created_at));
                    let edited = if post.is_edited() { " (edited)" } else { "" };
                    out.push(format!("#{} {}{}  {}", post.id, when, edited, post.text));
                }
                Ok(())
            }
            CliCommand::Post { text } => {
                let user_id = self.require_user()?;
                let post = self
                    .queries
                    .create_post(PostRequest::new(user_id, text))
                    .await
                    .with_context(|| ErrorContext::new("create_post").with_component("cli"))?;
                self.ui.add_notification(messages::POST_CREATED, Severity::Success);
                out.push(format!("#{}", post.id));
                Ok(())
            }
            CliCommand::DeletePost { id } => {
                self.queries
                    .delete_post(id)
                    .await
                    .with_context(|| ErrorContext::new("delete_post").with_component("cli"))?;
                self.ui.add_notification(messages::POST_DELETED, Severity::Success);
                Ok(())
            }
            CliCommand::Friends { user_id } => {
                let user_id = user_id.or(self.session.current_user_id());
                let friends = settle(self.queries.friends(user_id).await, "friends_of")?;
                if friends.is_empty() {
                    out.push(messages::NO_FRIENDS.to_string());
                    return Ok(());
                }
                for friendship in friends {
                    out.push(format!("{:>5}  {}", friendship.friend_id, friendship.friend_username));
                }
                Ok(())
            }
            CliCommand::AddFriend { friend_id } => {
                let user_id = self.require_user()?;
                self.queries
                    .add_friend(FriendshipRequest::new(user_id, friend_id))
                    .await
                    .with_context(|| ErrorContext::new("add_friend").with_component("cli"))?;
                self.ui.add_notification(messages::FRIEND_ADDED, Severity::Success);
                Ok(())
            }
            CliCommand::RemoveFriend { friend_id } => {
                let user_id = self.require_user()?;
                self.queries
                    .remove_friend(user_id, friend_id)
                    .await
                    .with_context(|| ErrorContext::new("remove_friend").with_component("cli"))?;
                self.ui.add_notification(messages::FRIEND_REMOVED, Severity::Success);
                Ok(())
            }
            CliCommand::Timeline {
                page,
                size,
                from,
                to,
            } => self.timeline(page, size, from, to, out).await,
        }
    }

    async fn login(&mut self, user_id: i64, out: &mut Vec<String>) -> ClientResult<()> {
        let user = settle(self.queries.user(Some(user_id)).await, "login")?;
        self.session.set_current_user(user.id).await?;
        out.push(format!("Logged in as {}", user.username));
        self.session.set_profile(user);
        Ok(())
    }

    async fn whoami(&mut self, out: &mut Vec<String>) -> ClientResult<()> {
        let Some(user_id) = self.session.current_user_id() else {
            out.push("Not logged in.".to_string());
            return Ok(());
        };
        let user = settle(self.queries.user(Some(user_id)).await, "whoami")?;
        out.push(format!("#{} {}", user.id, user.username));
        self.session.set_profile(user);
        Ok(())
    }

    async fn timeline(
        &mut self,
        page: u32,
        size: Option<u32>,
        from: Option<NaiveDateTime>,
        to: Option<NaiveDateTime>,
        out: &mut Vec<String>,
    ) -> ClientResult<()> {
        let user_id = self.require_user()?;
        self.ui.set_timeline_filter(from, to)?;

        let filter = self.ui.timeline_filter();
        let state = if filter.is_empty() {
            self.queries.timeline_page(Some(user_id), page, size).await
        } else {
            self.queries
                .timeline_filtered(Some(user_id), page, size, filter)
                .await
        };
        let page = settle(state, "timeline")?;
        render_timeline(&page, out);
        Ok(())
    }

    fn require_user(&self) -> ClientResult<i64> {
        self.session
            .current_user_id()
            .ok_or_else(|| ValidationError::Required { field: "Active user" }.into())
    }
}

/// Turn a finished read into its data or its error.
///
/// A read disabled for lack of a user yields no data and is reported as a
/// missing active user.
fn settle<T>(state: QueryState<T>, operation: &str) -> ClientResult<T> {
    state
        .into_result()
        .and_then(|data| data.ok_or_else(|| ValidationError::Required { field: "Active user" }.into()))
        .with_context(|| ErrorContext::new(operation).with_component("cli"))
}

fn render_timeline(page: &Page<TimelinePost>, out: &mut Vec<String>) {
    if page.is_empty() {
        out.push(messages::NO_POSTS.to_string());
        return;
    }
    for post in &page.content {
        let when = format_relative_time(&format_timestamp(&post.created_at));
        out.push(format!("{} · {}", post.username, when));
        out.push(format!("  {}", post.text));
    }
    out.push(format!(
        "page {} of {} ({} posts)",
        page.number + 1,
        page.total_pages.max(1),
        page.total_elements
    ));
}
