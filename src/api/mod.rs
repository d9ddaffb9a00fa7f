//! Typed access to the game-tracker REST API.

mod client;
mod config;
mod error;

use futures::future::BoxFuture;

pub use client::HttpGamesApi;
pub use config::{ApiConfig, DEFAULT_API_URL, DEFAULT_REQUEST_TIMEOUT};
pub use error::{ApiError, ApiResult};

use crate::dto::{
    CreateGameRequest, Game, SearchCandidate, UpdateStatusRequest, View, health::HealthResponse,
};

/// Abstraction over the backend so the games store can run against HTTP or a fake.
pub trait GamesApi: Send + Sync {
    /// `None` asks for every game without server-side filtering.
    fn list_games(&self, view: Option<View>) -> BoxFuture<'static, ApiResult<Vec<Game>>>;
    /// Add a game; `409 Conflict` when the catalogue id is already in the library.
    fn create_game(&self, request: CreateGameRequest) -> BoxFuture<'static, ApiResult<Game>>;
    /// Change a game's status and optionally its play date.
    fn update_status(
        &self,
        id: String,
        request: UpdateStatusRequest,
    ) -> BoxFuture<'static, ApiResult<Game>>;
    /// Re-link a game to another catalogue entry; the server refreshes its metadata.
    fn update_match(&self, id: String, igdb_id: i64) -> BoxFuture<'static, ApiResult<Game>>;
    /// Remove a game from the library.
    fn delete_game(&self, id: String) -> BoxFuture<'static, ApiResult<()>>;
    /// Look up candidates in the external catalogue.
    fn search(&self, query: String) -> BoxFuture<'static, ApiResult<Vec<SearchCandidate>>>;
    /// Unauthenticated liveness check.
    fn health_check(&self) -> BoxFuture<'static, ApiResult<HealthResponse>>;
}
