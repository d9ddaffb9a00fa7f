use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_with::{DefaultOnNull, serde_as};
use time::OffsetDateTime;

/// Lifecycle status of a game in the user's library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// Not started yet.
    Backlog,
    /// Started, then set aside; grouped with the backlog.
    Break,
    /// Currently being played.
    Playing,
    /// Finished.
    Done,
    /// Dropped before finishing.
    Abandoned,
    /// Explicitly ruled out.
    #[serde(rename = "Won't Play")]
    WontPlay,
}

/// Coarse grouping used to decide which status list a game belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusGroup {
    /// Backlog or Break.
    Todo,
    /// Playing.
    InProgress,
    /// Done, Abandoned or Won't Play.
    Complete,
}

impl GameStatus {
    /// Every status, in display order.
    pub const ALL: [GameStatus; 6] = [
        GameStatus::Backlog,
        GameStatus::Break,
        GameStatus::Playing,
        GameStatus::Done,
        GameStatus::Abandoned,
        GameStatus::WontPlay,
    ];

    /// Wire representation of the status.
    pub fn as_str(self) -> &'static str {
        match self {
            GameStatus::Backlog => "Backlog",
            GameStatus::Break => "Break",
            GameStatus::Playing => "Playing",
            GameStatus::Done => "Done",
            GameStatus::Abandoned => "Abandoned",
            GameStatus::WontPlay => "Won't Play",
        }
    }

    /// Group this status falls into.
    pub fn group(self) -> StatusGroup {
        match self {
            GameStatus::Backlog | GameStatus::Break => StatusGroup::Todo,
            GameStatus::Playing => StatusGroup::InProgress,
            GameStatus::Done | GameStatus::Abandoned | GameStatus::WontPlay => {
                StatusGroup::Complete
            }
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown status string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown game status `{0}`")]
pub struct UnknownStatus(pub String);

impl FromStr for GameStatus {
    type Err = UnknownStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        GameStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| UnknownStatus(value.to_string()))
    }
}

/// A game record as returned by the backend.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    /// Server-assigned document identifier.
    pub id: String,
    /// Owner of the record.
    #[serde(default)]
    pub user_id: String,
    /// Display title.
    pub title: String,
    /// Catalogue identifier; absent or zero for manual entries.
    #[serde(default)]
    pub igdb_id: Option<i64>,
    /// Catalogue matching state maintained by the server-side sync.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_status: Option<String>,
    /// Cover image URL, empty when unknown.
    #[serde(default)]
    pub cover_url: String,
    /// Aggregated rating in the 0-100 range, 0 when unrated.
    #[serde(default)]
    pub rating: i32,
    /// Current lifecycle status.
    pub status: GameStatus,
    /// Catalogue genres; `null` decodes as empty.
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub genres: Vec<String>,
    /// Platforms the game was released on; `null` decodes as empty.
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub platforms: Vec<String>,
    /// First release date; the 2100-01-01 sentinel marks an unannounced release.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub release_date: Option<OffsetDateTime>,
    /// When the game was played; the epoch sentinel marks "not yet played".
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub date_played: Option<OffsetDateTime>,
    /// Creation time on the server.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
    /// Last modification on the server; orders the playing list.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub updated_at: Option<OffsetDateTime>,
}

impl Game {
    /// Catalogue identifier, ignoring the zero placeholder used for manual entries.
    pub fn catalogue_id(&self) -> Option<i64> {
        self.igdb_id.filter(|id| *id > 0)
    }

    /// Backlog or Break.
    pub fn is_todo(&self) -> bool {
        self.status.group() == StatusGroup::Todo
    }

    /// Playing.
    pub fn is_in_progress(&self) -> bool {
        self.status.group() == StatusGroup::InProgress
    }

    /// Done, Abandoned or Won't Play.
    pub fn is_complete(&self) -> bool {
        self.status.group() == StatusGroup::Complete
    }
}
