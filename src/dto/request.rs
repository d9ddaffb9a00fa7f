use serde::Serialize;
use time::OffsetDateTime;
use validator::{Validate, ValidationErrors};

use crate::dto::{
    game::GameStatus,
    validation::{validate_rating, validate_title},
};

/// Payload used to add a game to the library.
///
/// When `igdb_id` is set the backend fills cover, rating, genres, platforms and
/// release date from the catalogue and ignores the manual fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateGameRequest {
    /// Display title; must not be blank.
    pub title: String,
    /// Catalogue entry to copy metadata from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub igdb_id: Option<i64>,
    /// Defaults to Backlog on the server when omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<GameStatus>,
    /// Cover image for manual entries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
    /// Rating in the 0-100 range for manual entries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<i32>,
    /// Genres for manual entries.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub genres: Vec<String>,
    /// Platforms for manual entries.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub platforms: Vec<String>,
}

impl CreateGameRequest {
    /// Manual entry with only a title.
    pub fn manual(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Entry backed by a catalogue match.
    pub fn from_catalogue(title: impl Into<String>, igdb_id: i64) -> Self {
        Self {
            title: title.into(),
            igdb_id: Some(igdb_id),
            ..Self::default()
        }
    }

    /// Set the initial status.
    pub fn with_status(mut self, status: GameStatus) -> Self {
        self.status = Some(status);
        self
    }
}

impl Validate for CreateGameRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Err(e) = validate_title(&self.title) {
            errors.add("title", e);
        }

        if let Some(rating) = self.rating {
            if let Err(e) = validate_rating(rating) {
                errors.add("rating", e);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Body of `POST /games/{id}/status`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateStatusRequest {
    /// New lifecycle status.
    pub status: GameStatus,
    /// Only sent when set.
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "time::serde::rfc3339::option"
    )]
    pub date_played: Option<OffsetDateTime>,
}

/// Body of `POST /games/{id}/match`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UpdateMatchRequest {
    /// Catalogue entry to link the game to.
    pub igdb_id: i64,
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use time::macros::datetime;

    use super::*;

    #[test]
    fn manual_request_omits_unset_fields() {
        let body = serde_json::to_value(CreateGameRequest::manual("Outer Wilds")).unwrap();
        assert_eq!(body, json!({ "title": "Outer Wilds" }));
    }

    #[test]
    fn catalogue_request_carries_id_and_status() {
        let request =
            CreateGameRequest::from_catalogue("Hades", 113112).with_status(GameStatus::Playing);
        let body = serde_json::to_value(request).unwrap();
        assert_eq!(
            body,
            json!({ "title": "Hades", "igdb_id": 113112, "status": "Playing" })
        );
    }

    #[test]
    fn blank_title_and_bad_rating_fail_validation() {
        let request = CreateGameRequest {
            title: "  ".into(),
            rating: Some(140),
            ..CreateGameRequest::default()
        };
        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("title"));
        assert!(fields.contains_key("rating"));
    }

    #[test]
    fn status_update_omits_missing_date() {
        let body = serde_json::to_value(UpdateStatusRequest {
            status: GameStatus::Playing,
            date_played: None,
        })
        .unwrap();
        assert_eq!(body, json!({ "status": "Playing" }));

        let body = serde_json::to_value(UpdateStatusRequest {
            status: GameStatus::Done,
            date_played: Some(datetime!(2024-05-01 0:00 UTC)),
        })
        .unwrap();
        assert_eq!(
            body,
            json!({ "status": "Done", "date_played": "2024-05-01T00:00:00Z" })
        );
    }
}
