/// Sentinel-aware date helpers.
pub mod dates;
/// Game records and statuses.
pub mod game;
/// Backend health payload.
pub mod health;
/// Display helpers for platforms and ratings.
pub mod platform;
/// Request bodies sent to the backend.
pub mod request;
/// Catalogue search results.
pub mod search;
/// Field validators for request bodies.
pub mod validation;
/// Server-side list filters.
pub mod view;

pub use game::{Game, GameStatus, StatusGroup};
pub use request::{CreateGameRequest, UpdateMatchRequest, UpdateStatusRequest};
pub use search::SearchCandidate;
pub use view::View;
