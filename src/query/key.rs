//! Cache keys and resource families.

use std::fmt;

/// Logical group of cache keys sharing a root resource type.
///
/// Mutations invalidate whole families; see [`ResourceFamily::ALL`] for the
/// complete set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceFamily {
    Users,
    Posts,
    Friendships,
    Timeline,
    TimelineCount,
}

impl ResourceFamily {
    pub const ALL: [ResourceFamily; 5] = [
        ResourceFamily::Users,
        ResourceFamily::Posts,
        ResourceFamily::Friendships,
        ResourceFamily::Timeline,
        ResourceFamily::TimelineCount,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceFamily::Users => "users",
            ResourceFamily::Posts => "posts",
            ResourceFamily::Friendships => "friendships",
            ResourceFamily::Timeline => "timeline",
            ResourceFamily::TimelineCount => "timelineCount",
        }
    }
}

impl fmt::Display for ResourceFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A cache key: the family plus every parameter that distinguishes one read
/// from another (user id, page, page size, date bounds, search term).
///
/// Two reads with equal keys share one cache entry and one in-flight fetch.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    family: ResourceFamily,
    parts: Vec<String>,
}

impl QueryKey {
    pub fn new(family: ResourceFamily) -> Self {
        Self {
            family,
            parts: Vec::new(),
        }
    }

    /// Append a distinguishing parameter.
    pub fn with(mut self, part: impl ToString) -> Self {
        self.parts.push(part.to_string());
        self
    }

    /// Append an optional parameter; `None` is recorded as `-` so that
    /// `(a, None)` and `(None, a)` stay distinct.
    pub fn with_opt<P: ToString>(self, part: Option<P>) -> Self {
        match part {
            Some(p) => self.with(p),
            None => self.with("-"),
        }
    }

    pub fn family(&self) -> ResourceFamily {
        self.family
    }

    pub fn parts(&self) -> &[String] {
        &self.parts
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.family)?;
        for part in &self.parts {
            write!(f, "/{}", part)?;
        }
        Ok(())
    }
}
