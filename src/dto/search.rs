use serde::{Deserialize, Serialize};

/// Minimal catalogue search hit returned by `GET /search`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCandidate {
    /// Catalogue identifier, usable as `igdb_id` when creating or matching a game.
    pub id: i64,
    /// Catalogue title.
    pub name: String,
    /// Cover image URL, empty when the catalogue has none.
    #[serde(default)]
    pub cover_url: String,
    /// Year of first release, 0 when unknown.
    #[serde(default)]
    pub release_year: i32,
}
