//! Command-line argument parsing for the social client CLI.
//!
//! The first positional argument selects the command; the rest are its
//! operands and `--flag value` options.

use std::fmt;

use chrono::NaiveDateTime;

use crate::dates::parse_filter_bound;

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Make `user_id` the active user
    Login { user_id: i64 },
    /// Clear the active user
    Logout,
    /// Show the active user
    Whoami,
    /// List users, or search them by username
    Users { search: Option<String> },
    /// Show one user
    User { id: i64 },
    /// List posts of a user (the active user by default)
    Posts { user_id: Option<i64> },
    /// Publish a post as the active user
    Post { text: String },
    /// Delete a post
    DeletePost { id: i64 },
    /// List friends of a user (the active user by default)
    Friends { user_id: Option<i64> },
    /// Befriend a user as the active user
    AddFriend { friend_id: i64 },
    /// Unfriend a user as the active user
    RemoveFriend { friend_id: i64 },
    /// Show the active user's timeline
    Timeline {
        page: u32,
        size: Option<u32>,
        from: Option<NaiveDateTime>,
        to: Option<NaiveDateTime>,
    },
}

/// Why the arguments could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgsError {
    UnknownCommand(String),
    MissingArgument(&'static str),
    InvalidNumber { name: &'static str, value: String },
    InvalidDate { name: &'static str, value: String },
    UnexpectedArgument(String),
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::UnknownCommand(cmd) => write!(f, "Unknown command '{}'", cmd),
            ArgsError::MissingArgument(name) => write!(f, "Missing argument <{}>", name),
            ArgsError::InvalidNumber { name, value } => {
                write!(f, "Invalid value '{}' for <{}>: expected a number", value, name)
            }
            ArgsError::InvalidDate { name, value } => {
                write!(f, "Invalid value '{}' for <{}>: expected YYYY-MM-DD", value, name)
            }
            ArgsError::UnexpectedArgument(arg) => write!(f, "Unexpected argument '{}'", arg),
        }
    }
}

impl std::error::Error for ArgsError {}

/// Usage text printed by `help`.
pub const USAGE: &str = "\
Usage: social-client <command> [args]

Commands:
  login <user-id>           Make <user-id> the active user
  logout                    Clear the active user
  whoami                    Show the active user
  users [--search <term>]   List or search users
  user <id>                 Show a user
  posts [user-id]           List posts (active user by default)
  post <text...>            Publish a post
  delete-post <id>          Delete a post
  friends [user-id]         List friends (active user by default)
  add-friend <user-id>      Befriend a user
  remove-friend <user-id>   Unfriend a user
  timeline [--page N] [--size N] [--from YYYY-MM-DD] [--to YYYY-MM-DD]
  help                      Show this message
  --version, -V             Show version
";

/// Parse command-line arguments and return the command to run.
///
/// # Examples
///
/// ```
/// use social_client::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["social".to_string(), "login".to_string(), "7".to_string()];
/// assert_eq!(parse_args(args.into_iter()).unwrap(), CliCommand::Login { user_id: 7 });
/// ```
pub fn parse_args<I>(args: I) -> Result<CliCommand, ArgsError>
where
    I: Iterator<Item = String>,
{
    // Skip the program name
    let mut args = args.skip(1);
    let Some(command) = args.next() else {
        return Ok(CliCommand::Help);
    };
    let rest: Vec<String> = args.collect();

    let parsed = match command.as_str() {
        "--version" | "-V" => CliCommand::Version,
        "help" | "--help" | "-h" => CliCommand::Help,
        "login" => CliCommand::Login {
            user_id: required_id(&rest, "user-id")?,
        },
        "logout" => no_operands(&rest, CliCommand::Logout)?,
        "whoami" => no_operands(&rest, CliCommand::Whoami)?,
        "users" => {
            let (options, operands) = split_options(&rest, &["--search"])?;
            reject_operands(&operands)?;
            CliCommand::Users {
                search: option_value(&options, "--search"),
            }
        }
        "user" => CliCommand::User {
            id: required_id(&rest, "id")?,
        },
        "posts" => CliCommand::Posts {
            user_id: optional_id(&rest, "user-id")?,
        },
        "post" => {
            if rest.is_empty() {
                return Err(ArgsError::MissingArgument("text"));
            }
            CliCommand::Post {
                text: rest.join(" "),
            }
        }
        "delete-post" => CliCommand::DeletePost {
            id: required_id(&rest, "id")?,
        },
        "friends" => CliCommand::Friends {
            user_id: optional_id(&rest, "user-id")?,
        },
        "add-friend" => CliCommand::AddFriend {
            friend_id: required_id(&rest, "user-id")?,
        },
        "remove-friend" => CliCommand::RemoveFriend {
            friend_id: required_id(&rest, "user-id")?,
        },
        "timeline" => {
            let (options, operands) =
                split_options(&rest, &["--page", "--size", "--from", "--to"])?;
            reject_operands(&operands)?;
            let page = match option_value(&options, "--page") {
                Some(v) => parse_number(&v, "page")?,
                None => 0,
            };
            let size = option_value(&options, "--size")
                .map(|v| parse_number(&v, "size"))
                .transpose()?;
            CliCommand::Timeline {
                page,
                size,
                from: date_option(&options, "--from", false)?,
                to: date_option(&options, "--to", true)?,
            }
        }
        other => return Err(ArgsError::UnknownCommand(other.to_string())),
    };

    Ok(parsed)
}

fn parse_number<N: std::str::FromStr>(value: &str, name: &'static str) -> Result<N, ArgsError> {
    value.parse().map_err(|_| ArgsError::InvalidNumber {
        name,
        value: value.to_string(),
    })
}

/// A bare date as `--from` is the start of that day; as `--to`, its end.
fn date_option(
    options: &[(&'static str, String)],
    flag: &'static str,
    end_of_day: bool,
) -> Result<Option<NaiveDateTime>, ArgsError> {
    let Some(value) = option_value(options, flag) else {
        return Ok(None);
    };
    parse_filter_bound(&value, end_of_day)
        .map(Some)
        .ok_or_else(|| ArgsError::InvalidDate {
            name: flag.trim_start_matches("--"),
            value,
        })
}

fn optional_id(rest: &[String], name: &'static str) -> Result<Option<i64>, ArgsError> {
    match rest {
        [] => Ok(None),
        [value] => parse_number(value, name).map(Some),
        [_, extra, ..] => Err(ArgsError::UnexpectedArgument(extra.clone())),
    }
}

fn required_id(rest: &[String], name: &'static str) -> Result<i64, ArgsError> {
    optional_id(rest, name)?.ok_or(ArgsError::MissingArgument(name))
}

fn no_operands(rest: &[String], command: CliCommand) -> Result<CliCommand, ArgsError> {
    reject_operands(rest)?;
    Ok(command)
}

fn reject_operands(operands: &[String]) -> Result<(), ArgsError> {
    match operands.first() {
        Some(arg) => Err(ArgsError::UnexpectedArgument(arg.clone())),
        None => Ok(()),
    }
}

/// Split `--flag value` pairs (only `known` flags) from positional operands.
fn split_options(
    rest: &[String],
    known: &[&'static str],
) -> Result<(Vec<(&'static str, String)>, Vec<String>), ArgsError> {
    let mut options = Vec::new();
    let mut operands = Vec::new();
    let mut iter = rest.iter();

    while let Some(arg) = iter.next() {
        if let Some(flag) = known.iter().find(|k| **k == arg.as_str()) {
            let value = iter
                .next()
                .ok_or(ArgsError::MissingArgument(flag.trim_start_matches("--")))?;
            options.push((*flag, value.clone()));
        } else if arg.starts_with("--") {
            return Err(ArgsError::UnexpectedArgument(arg.clone()));
        } else {
            operands.push(arg.clone());
        }
    }

    Ok((options, operands))
}

fn option_value(options: &[(&'static str, String)], flag: &str) -> Option<String> {
    options
        .iter()
        .rev()
        .find(|(name, _)| *name == flag)
        .map(|(_, value)| value.clone())
}
