use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use crate::error::ModelError;

/// A user's relationship to one anime, shared across tracking services
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WatchStatus {
    /// Rewatching a finished show
    Repeating,
    /// Finished watching
    Watched,
    /// Currently watching
    Watching,
    /// On hold
    Paused,
    /// Plan to watch
    Want,
    /// Gave up on it
    Dropped,
}

impl WatchStatus {
    /// Every status, strongest engagement first. Scoring depends on positions in this list.
    pub const ORDER: [WatchStatus; 6] = [
        WatchStatus::Repeating,
        WatchStatus::Watched,
        WatchStatus::Watching,
        WatchStatus::Paused,
        WatchStatus::Want,
        WatchStatus::Dropped,
    ];

    /// Position in [`WatchStatus::ORDER`] (0 = strongest)
    pub fn strength_index(self) -> usize {
        // ORDER lists every variant
        Self::ORDER
            .iter()
            .position(|status| *status == self)
            .unwrap_or(Self::ORDER.len() - 1)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WatchStatus::Repeating => "REPEATING",
            WatchStatus::Watched => "WATCHED",
            WatchStatus::Watching => "WATCHING",
            WatchStatus::Paused => "PAUSED",
            WatchStatus::Want => "WANT",
            WatchStatus::Dropped => "DROPPED",
        }
    }
}

impl fmt::Display for WatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WatchStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();
        Self::ORDER
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| ModelError::UnknownStatus(s.to_string()))
    }
}
