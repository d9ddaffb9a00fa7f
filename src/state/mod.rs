//! Games store: denormalized lists kept in sync with the backend.

pub mod lists;

use std::sync::Arc;

use time::OffsetDateTime;
use tokio::sync::{RwLock, watch};
use tracing::{debug, error, info, warn};
use validator::Validate;

use crate::{
    api::GamesApi,
    dto::{
        CreateGameRequest, Game, GameStatus, SearchCandidate, UpdateStatusRequest, View,
        dates::months_before,
    },
    error::StoreError,
};

pub use self::lists::{GameLists, in_calendar_window};

/// Store handle shared between tasks.
pub type SharedStore = Arc<GamesStore>;

/// Default length of the "recently released" part of the calendar.
pub const DEFAULT_CALENDAR_MONTHS: u8 = 1;
/// Queries shorter than this (after trimming) are not sent to the backend.
pub const DEFAULT_MIN_SEARCH_CHARS: usize = 2;

/// Tunables for [`GamesStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreSettings {
    /// The calendar shows to-do games released at most this many months ago.
    pub calendar_months: u8,
    /// Minimum trimmed query length, in characters, worth a catalogue search.
    pub min_search_chars: usize,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            calendar_months: DEFAULT_CALENDAR_MONTHS,
            min_search_chars: DEFAULT_MIN_SEARCH_CHARS,
        }
    }
}

#[derive(Debug, Default)]
struct LoadStatus {
    loading: bool,
    error: Option<String>,
}

/// Client-side cache of the user's library.
///
/// Mutations go to the backend first; on success the returned record is filed
/// into the local lists without refetching. Every change bumps a revision
/// counter observable through [`GamesStore::subscribe`].
pub struct GamesStore {
    api: Arc<dyn GamesApi>,
    settings: StoreSettings,
    lists: RwLock<GameLists>,
    status: RwLock<LoadStatus>,
    revision: watch::Sender<u64>,
}

impl GamesStore {
    /// Construct an empty store wrapped in an [`Arc`] so it can be cloned cheaply.
    pub fn new(api: Arc<dyn GamesApi>, settings: StoreSettings) -> SharedStore {
        let (revision, _rx) = watch::channel(0);
        Arc::new(Self {
            api,
            settings,
            lists: RwLock::new(GameLists::default()),
            status: RwLock::new(LoadStatus::default()),
            revision,
        })
    }

    /// Copy of every list.
    pub async fn snapshot(&self) -> GameLists {
        self.lists.read().await.clone()
    }

    /// Copy of the list backing `view`.
    pub async fn view(&self, view: View) -> Vec<Game> {
        self.lists.read().await.view(view).to_vec()
    }

    /// To-do games, earliest release first.
    pub async fn backlog(&self) -> Vec<Game> {
        self.view(View::Backlog).await
    }

    /// Games in progress, most recently touched first.
    pub async fn playing(&self) -> Vec<Game> {
        self.view(View::Playing).await
    }

    /// Finished or dropped games, most recently played first.
    pub async fn history(&self) -> Vec<Game> {
        self.view(View::History).await
    }

    /// To-do games released recently or still upcoming.
    pub async fn calendar(&self) -> Vec<Game> {
        self.view(View::Calendar).await
    }

    /// Whole library, newest release first.
    pub async fn all(&self) -> Vec<Game> {
        self.view(View::All).await
    }

    /// Whether a fetch is in flight.
    pub async fn is_loading(&self) -> bool {
        self.status.read().await.loading
    }

    /// Message of the last failed fetch, status update or delete.
    pub async fn error(&self) -> Option<String> {
        self.status.read().await.error.clone()
    }

    /// Forget the last recorded failure.
    pub async fn clear_error(&self) {
        self.status.write().await.error = None;
    }

    /// Receiver whose value increases every time a list changes.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    /// Load games from the backend and replace the matching lists.
    ///
    /// With `None` every game is fetched and all lists are rebuilt.
    pub async fn fetch_games(&self, view: Option<View>) -> Result<(), StoreError> {
        {
            let mut status = self.status.write().await;
            status.loading = true;
            status.error = None;
        }

        let outcome = self.api.list_games(view).await;

        let mut status = self.status.write().await;
        status.loading = false;
        match outcome {
            Ok(games) => {
                drop(status);
                info!(
                    view = view.map(View::as_query).unwrap_or("none"),
                    count = games.len(),
                    "fetched games"
                );
                self.lists.write().await.replace(view, games, self.cutoff());
                self.notify();
                Ok(())
            }
            Err(err) => {
                error!(error = %err, "failed to fetch games");
                status.error = Some(err.to_string());
                Err(err.into())
            }
        }
    }

    /// Add a game to the library and file it into the local lists.
    pub async fn create_game(&self, request: CreateGameRequest) -> Result<Game, StoreError> {
        request.validate()?;

        let game = self.api.create_game(request).await.map_err(|err| {
            error!(error = %err, "failed to create game");
            StoreError::from(err)
        })?;

        debug!(id = %game.id, title = %game.title, "game created");
        self.lists.write().await.insert(game.clone(), self.cutoff());
        self.notify();
        Ok(game)
    }

    /// Change the status of game `id`, optionally recording when it was played.
    pub async fn update_status(
        &self,
        id: &str,
        status: GameStatus,
        date_played: Option<OffsetDateTime>,
    ) -> Result<Game, StoreError> {
        self.clear_error().await;

        let request = UpdateStatusRequest {
            status,
            date_played,
        };
        let game = match self.api.update_status(id.to_string(), request).await {
            Ok(game) => game,
            Err(err) => {
                error!(id, error = %err, "failed to update game status");
                return Err(self.record(err.into()).await);
            }
        };

        debug!(id, status = %game.status, "game status updated");
        self.lists
            .write()
            .await
            .apply_status_update(game.clone(), self.cutoff());
        self.notify();
        Ok(game)
    }

    /// Search the catalogue.
    ///
    /// Short queries and backend failures both yield an empty result.
    pub async fn search(&self, query: &str) -> Vec<SearchCandidate> {
        let query = query.trim();
        if query.chars().count() < self.settings.min_search_chars {
            return Vec::new();
        }

        match self.api.search(query.to_string()).await {
            Ok(results) => results,
            Err(err) => {
                warn!(query, error = %err, "catalogue search failed");
                Vec::new()
            }
        }
    }

    /// Delete game `id` on the backend and drop it from every list.
    pub async fn delete_game(&self, id: &str) -> Result<(), StoreError> {
        self.clear_error().await;

        if let Err(err) = self.api.delete_game(id.to_string()).await {
            error!(id, error = %err, "failed to delete game");
            return Err(self.record(err.into()).await);
        }

        let removed = self.lists.write().await.remove(id);
        info!(id, removed, "game deleted");
        self.notify();
        Ok(())
    }

    /// Link game `id` to catalogue entry `igdb_id` and re-file it with its refreshed metadata.
    pub async fn update_game_match(&self, id: &str, igdb_id: i64) -> Result<Game, StoreError> {
        let game = self
            .api
            .update_match(id.to_string(), igdb_id)
            .await
            .map_err(|err| {
                error!(id, igdb_id, error = %err, "failed to update game match");
                StoreError::from(err)
            })?;

        info!(id, igdb_id, "game match updated");
        self.lists
            .write()
            .await
            .apply_match_update(game.clone(), self.cutoff());
        self.notify();
        Ok(game)
    }

    /// Release dates at or after this instant put a to-do game on the calendar.
    fn cutoff(&self) -> OffsetDateTime {
        months_before(OffsetDateTime::now_utc(), self.settings.calendar_months)
    }

    async fn record(&self, err: StoreError) -> StoreError {
        self.status.write().await.error = Some(err.to_string());
        err
    }

    fn notify(&self) {
        self.revision.send_modify(|revision| *revision += 1);
    }
}
