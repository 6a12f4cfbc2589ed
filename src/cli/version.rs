//! Version and help output.

use super::args::USAGE;

/// The crate version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// `social-client 0.1.0 (Social Network)`
pub fn version_line(app_name: &str) -> String {
    format!("social-client {} ({})", VERSION, app_name)
}

/// Usage text headed by the application's display name.
pub fn help_lines(app_name: &str) -> Vec<String> {
    let mut lines = vec![app_name.to_string(), String::new()];
    lines.extend(USAGE.lines().map(str::to_string));
    lines
}
