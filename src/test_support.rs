//! Fixtures shared by unit tests.

use std::{
    collections::HashMap,
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use futures::future::BoxFuture;
use reqwest::StatusCode;
use time::OffsetDateTime;

use crate::{
    api::{ApiError, ApiResult, GamesApi},
    dto::{
        CreateGameRequest, Game, GameStatus, SearchCandidate, StatusGroup, UpdateStatusRequest,
        View, health::HealthResponse,
    },
};

/// Bare game with the given identity and status.
pub(crate) fn game(id: &str, title: &str, status: GameStatus) -> Game {
    Game {
        id: id.to_string(),
        user_id: "u1".to_string(),
        title: title.to_string(),
        igdb_id: None,
        match_status: None,
        cover_url: String::new(),
        rating: 0,
        status,
        genres: Vec::new(),
        platforms: Vec::new(),
        release_date: None,
        date_played: None,
        created_at: None,
        updated_at: None,
    }
}

pub(crate) fn released(mut game: Game, date: OffsetDateTime) -> Game {
    game.release_date = Some(date);
    game
}

pub(crate) fn played(mut game: Game, date: OffsetDateTime) -> Game {
    game.date_played = Some(date);
    game
}

pub(crate) fn updated(mut game: Game, date: OffsetDateTime) -> Game {
    game.updated_at = Some(date);
    game
}

pub(crate) fn ids(games: &[Game]) -> Vec<&str> {
    games.iter().map(|game| game.id.as_str()).collect()
}

/// In-memory backend standing in for the HTTP API.
#[derive(Default)]
pub(crate) struct FakeApi {
    games: Mutex<Vec<Game>>,
    /// Release dates the fake catalogue knows about, keyed by catalogue id.
    catalogue: HashMap<i64, OffsetDateTime>,
    failure: Mutex<Option<String>>,
    next_id: AtomicUsize,
    search_calls: AtomicUsize,
}

impl FakeApi {
    pub(crate) fn with_games(games: Vec<Game>) -> Self {
        Self {
            games: Mutex::new(games),
            ..Self::default()
        }
    }

    pub(crate) fn with_catalogue(mut self, igdb_id: i64, release: OffsetDateTime) -> Self {
        self.catalogue.insert(igdb_id, release);
        self
    }

    /// Make every following call fail with `message` (or succeed again with `None`).
    pub(crate) fn fail_with(&self, message: Option<&str>) {
        *self.failure.lock().unwrap() = message.map(str::to_string);
    }

    pub(crate) fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    fn check(&self) -> ApiResult<()> {
        match self.failure.lock().unwrap().clone() {
            Some(message) => Err(ApiError::RequestStatus {
                path: "fake".into(),
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message,
            }),
            None => Ok(()),
        }
    }

    /// `message` follows the HTTP client: fixed text, or the backend body where it is surfaced.
    fn not_found(message: &str) -> ApiError {
        ApiError::RequestStatus {
            path: "fake".into(),
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    fn modify(&self, id: &str, missing: &str, change: impl FnOnce(&mut Game)) -> ApiResult<Game> {
        self.check()?;
        let mut games = self.games.lock().unwrap();
        let game = games
            .iter_mut()
            .find(|game| game.id == id)
            .ok_or_else(|| Self::not_found(missing))?;
        change(game);
        game.updated_at = Some(OffsetDateTime::now_utc());
        Ok(game.clone())
    }
}

fn in_view(game: &Game, view: View) -> bool {
    match view {
        View::Backlog | View::Calendar => game.status.group() == StatusGroup::Todo,
        View::Playing => game.status.group() == StatusGroup::InProgress,
        View::History => game.status.group() == StatusGroup::Complete,
        View::All => true,
    }
}

impl GamesApi for FakeApi {
    fn list_games(&self, view: Option<View>) -> BoxFuture<'static, ApiResult<Vec<Game>>> {
        let result = self.check().map(|()| {
            self.games
                .lock()
                .unwrap()
                .iter()
                .filter(|game| view.is_none_or(|view| in_view(game, view)))
                .cloned()
                .collect()
        });
        Box::pin(async move { result })
    }

    fn create_game(&self, request: CreateGameRequest) -> BoxFuture<'static, ApiResult<Game>> {
        let result = self.check().map(|()| {
            let id = format!("g{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
            let mut created = game(
                &id,
                &request.title,
                request.status.unwrap_or(GameStatus::Backlog),
            );
            created.igdb_id = request.igdb_id;
            created.release_date = request
                .igdb_id
                .and_then(|igdb_id| self.catalogue.get(&igdb_id).copied());
            created.updated_at = Some(OffsetDateTime::now_utc());
            self.games.lock().unwrap().push(created.clone());
            created
        });
        Box::pin(async move { result })
    }

    fn update_status(
        &self,
        id: String,
        request: UpdateStatusRequest,
    ) -> BoxFuture<'static, ApiResult<Game>> {
        let result = self.modify(&id, "Failed to update game status", |game| {
            game.status = request.status;
            if request.date_played.is_some() {
                game.date_played = request.date_played;
            }
        });
        Box::pin(async move { result })
    }

    fn update_match(&self, id: String, igdb_id: i64) -> BoxFuture<'static, ApiResult<Game>> {
        let release = self.catalogue.get(&igdb_id).copied();
        let result = self.modify(&id, "Game not found", |game| {
            game.igdb_id = Some(igdb_id);
            game.match_status = Some("matched".into());
            game.release_date = release;
        });
        Box::pin(async move { result })
    }

    fn delete_game(&self, id: String) -> BoxFuture<'static, ApiResult<()>> {
        let result = self.check().and_then(|()| {
            let mut games = self.games.lock().unwrap();
            let before = games.len();
            games.retain(|game| game.id != id);
            if games.len() == before {
                Err(Self::not_found("Failed to delete game"))
            } else {
                Ok(())
            }
        });
        Box::pin(async move { result })
    }

    fn search(&self, query: String) -> BoxFuture<'static, ApiResult<Vec<SearchCandidate>>> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        let result = self.check().map(|()| {
            vec![SearchCandidate {
                id: 1,
                name: query,
                cover_url: String::new(),
                release_year: 2020,
            }]
        });
        Box::pin(async move { result })
    }

    fn health_check(&self) -> BoxFuture<'static, ApiResult<HealthResponse>> {
        let result = self.check().map(|()| HealthResponse {
            status: "ok".into(),
        });
        Box::pin(async move { result })
    }
}
