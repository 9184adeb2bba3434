use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Binary unread state reported by the watcher and held by the daemon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Read,
    Unread,
}

impl Status {
    /// Returns the wire token for this status.
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Read => "read",
            Status::Unread => "unread",
        }
    }

    /// Returns the opposite status.
    pub fn toggled(self) -> Self {
        match self {
            Status::Read => Status::Unread,
            Status::Unread => Status::Read,
        }
    }

    /// Maps a detection result onto a status.
    pub fn from_unread(has_unread: bool) -> Self {
        if has_unread {
            Status::Unread
        } else {
            Status::Read
        }
    }

    pub fn is_unread(self) -> bool {
        self == Status::Unread
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a token is not exactly `read` or `unread`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid status token: {0:?}")]
pub struct ParseStatusError(pub String);

impl FromStr for Status {
    type Err = ParseStatusError;

    /// Tokens are matched exactly; `Read` or ` read` are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "read" => Ok(Status::Read),
            "unread" => Ok(Status::Unread),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}
