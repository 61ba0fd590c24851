//! Resumption cursor.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Timestamp of the newest event the consumer has already observed.
///
/// An absent cursor means the consumer holds nothing yet; the server then
/// sends its default window instead of a replay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor {
    since_millis: Option<i64>,
}

impl Cursor {
    /// Cursor for a fresh session.
    #[must_use]
    pub const fn none() -> Self {
        Self { since_millis: None }
    }

    /// Cursor at a timestamp in milliseconds since the Unix epoch.
    #[must_use]
    pub const fn from_millis(millis: i64) -> Self {
        Self {
            since_millis: Some(millis),
        }
    }

    /// Cursor derived from the consumer's latest post date.
    #[must_use]
    pub fn from_latest(latest: Option<DateTime<Utc>>) -> Self {
        Self {
            since_millis: latest.map(|date| date.timestamp_millis()),
        }
    }

    #[must_use]
    pub const fn since_millis(&self) -> Option<i64> {
        self.since_millis
    }

    #[must_use]
    pub const fn is_absent(&self) -> bool {
        self.since_millis.is_none()
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.since_millis {
            Some(millis) => write!(f, "since={millis}"),
            None => f.write_str("none"),
        }
    }
}
