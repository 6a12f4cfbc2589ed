use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::format_timestamp;

/// A post in a user's timeline, enriched with the author's username.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelinePost {
    pub id: i64,
    pub text: String,
    pub user_id: i64,
    pub username: String,
    #[serde(with = "super::timestamp")]
    pub created_at: NaiveDateTime,
    #[serde(default, with = "super::timestamp::option")]
    pub updated_at: Option<NaiveDateTime>,
}

/// Optional inclusive date range applied to the filtered timeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TimelineFilter {
    pub from_date: Option<NaiveDateTime>,
    pub to_date: Option<NaiveDateTime>,
}

impl TimelineFilter {
    pub fn new(from_date: Option<NaiveDateTime>, to_date: Option<NaiveDateTime>) -> Self {
        Self { from_date, to_date }
    }

    pub fn is_empty(&self) -> bool {
        self.from_date.is_none() && self.to_date.is_none()
    }

    /// Query-string pairs for the bounds that are set.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(ref from) = self.from_date {
            pairs.push(("fromDate", format_timestamp(from)));
        }
        if let Some(ref to) = self.to_date {
            pairs.push(("toDate", format_timestamp(to)));
        }
        pairs
    }
}

/// Body of `GET /timeline/user/{id}/count`.
///
/// Deployed servers answer either `{"count": n}` or
/// `{"userId": …, "postCount": n}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct TimelineCount {
    #[serde(alias = "postCount")]
    pub count: u64,
}
