//! Date formatting for display and for API parameters.
//!
//! Inputs are server timestamps as strings. Anything that does not parse is
//! returned unchanged so the view can still show something.

use chrono::{NaiveDate, NaiveDateTime, Utc};

use crate::models::parse_timestamp;

/// `Mar 01, 2024`
pub fn format_date(timestamp: &str) -> String {
    match parse_timestamp(timestamp) {
        Some(dt) => dt.format("%b %d, %Y").to_string(),
        None => timestamp.to_string(),
    }
}

/// `Mar 01, 2024 09:15 AM`
pub fn format_date_time(timestamp: &str) -> String {
    match parse_timestamp(timestamp) {
        Some(dt) => dt.format("%b %d, %Y %I:%M %p").to_string(),
        None => timestamp.to_string(),
    }
}

/// Distance from now in words, e.g. `2 hours ago`.
pub fn format_relative_time(timestamp: &str) -> String {
    format_relative_time_at(timestamp, Utc::now().naive_utc())
}

/// [`format_relative_time`] against an explicit `now`.
pub fn format_relative_time_at(timestamp: &str, now: NaiveDateTime) -> String {
    let Some(dt) = parse_timestamp(timestamp) else {
        return timestamp.to_string();
    };

    let seconds = now.signed_duration_since(dt).num_seconds();
    let words = distance_in_words(seconds.unsigned_abs());
    if seconds >= 0 {
        format!("{} ago", words)
    } else {
        format!("in {}", words)
    }
}

fn plural(n: u64, unit: &str) -> String {
    if n == 1 {
        format!("1 {}", unit)
    } else {
        format!("{} {}s", n, unit)
    }
}

fn distance_in_words(seconds: u64) -> String {
    const MINUTE: u64 = 60;
    const HOUR: u64 = 60 * MINUTE;
    const DAY: u64 = 24 * HOUR;
    const MONTH: u64 = 30 * DAY;
    const YEAR: u64 = 365 * DAY;

    let minutes = (seconds + 30) / MINUTE;
    if seconds < 30 {
        "less than a minute".to_string()
    } else if minutes < 45 {
        plural(minutes.max(1), "minute")
    } else if minutes < 90 {
        "about 1 hour".to_string()
    } else if seconds < DAY {
        format!("about {}", plural((seconds + HOUR / 2) / HOUR, "hour"))
    } else if seconds < 42 * HOUR {
        "1 day".to_string()
    } else if seconds < MONTH {
        plural((seconds + DAY / 2) / DAY, "day")
    } else if seconds < 45 * DAY {
        "about 1 month".to_string()
    } else if seconds < 60 * DAY {
        "about 2 months".to_string()
    } else if seconds < YEAR {
        plural((seconds / MONTH).max(2), "month")
    } else {
        let years = seconds / YEAR;
        let rest = seconds % YEAR;
        if rest < 3 * MONTH {
            format!("about {}", plural(years, "year"))
        } else if rest < 9 * MONTH {
            format!("over {}", plural(years, "year"))
        } else {
            format!("almost {}", plural(years + 1, "year"))
        }
    }
}

/// `2024-03-01`
pub fn format_date_for_api(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parse a user-entered filter bound.
///
/// Accepts a full timestamp or a bare `yyyy-MM-dd` date; a bare date is the
/// start of that day, or its last second when `end_of_day` is set.
pub fn parse_filter_bound(input: &str, end_of_day: bool) -> Option<NaiveDateTime> {
    let input = input.trim();
    if let Some(dt) = parse_timestamp(input) {
        return Some(dt);
    }
    let date = NaiveDate::parse_from_str(input, "%Y-%m-%d").ok()?;
    if end_of_day {
        date.and_hms_opt(23, 59, 59)
    } else {
        date.and_hms_opt(0, 0, 0)
    }
}
