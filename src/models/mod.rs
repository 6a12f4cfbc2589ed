//! Wire records for the social network API.
//!
//! Every response envelope has an explicit struct here and is validated by
//! serde at the transport boundary. Field names follow the API's camelCase
//! JSON.

mod friendship;
mod page;
mod post;
mod timeline;
mod user;

pub use friendship::{FriendCount, Friendship, FriendshipCheck, FriendshipRequest};
pub use page::Page;
pub use post::{Post, PostRequest, PostUpdate};
pub use timeline::{TimelineCount, TimelineFilter, TimelinePost};
pub use user::{User, UserRequest};

use chrono::{DateTime, NaiveDateTime};

/// Parse a server timestamp.
///
/// The API emits local date-times without an offset
/// (`2024-03-01T09:15:00` or with fractional seconds); RFC 3339 values with an
/// offset are also accepted and converted to UTC.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .or_else(|| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M").ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.naive_utc())
        })
}

/// Format a timestamp the way the API expects it in query strings and bodies.
pub fn format_timestamp(value: &NaiveDateTime) -> String {
    value.format("%Y-%m-%dT%H:%M:%S%.f").to_string()
}

/// Serde adapter for required timestamps.
pub(crate) mod timestamp {
    use chrono::NaiveDateTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_timestamp(value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_timestamp(&raw)
            .ok_or_else(|| de::Error::custom(format!("invalid timestamp '{}'", raw)))
    }

    /// Serde adapter for optional timestamps; `null` and absent map to `None`.
    pub mod option {
        use chrono::NaiveDateTime;
        use serde::{de, Deserialize, Deserializer, Serializer};

        pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match value {
                Some(v) => serializer.serialize_str(&super::super::format_timestamp(v)),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
        where
            D: Deserializer<'de>,
        {
            match Option::<String>::deserialize(deserializer)? {
                Some(raw) => super::super::parse_timestamp(&raw)
                    .map(Some)
                    .ok_or_else(|| de::Error::custom(format!("invalid timestamp '{}'", raw))),
                None => Ok(None),
            }
        }
    }
}
