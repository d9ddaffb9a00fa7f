//! Denormalized game lists and the rules that keep them consistent.
//!
//! | list     | members                                   | order                  |
//! |----------|-------------------------------------------|------------------------|
//! | backlog  | Backlog, Break                            | release date ascending |
//! | playing  | Playing                                   | updated_at descending  |
//! | history  | Done, Abandoned, Won't Play               | date played descending |
//! | calendar | to-do games releasing after the cutoff    | release date ascending |
//! | all      | everything                                | release date descending|
//!
//! Missing dates sort as the Unix epoch. Every sort is stable.

use std::cmp::Reverse;

use time::OffsetDateTime;

use crate::dto::{Game, StatusGroup, View};

/// Snapshot of every list held by the games store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameLists {
    /// Backlog and Break games.
    pub backlog: Vec<Game>,
    /// Games currently being played.
    pub playing: Vec<Game>,
    /// Done, Abandoned and Won't Play games.
    pub history: Vec<Game>,
    /// To-do games released after the calendar cutoff.
    pub calendar: Vec<Game>,
    /// Every game in the library.
    pub all: Vec<Game>,
}

impl GameLists {
    /// List backing `view`.
    pub fn view(&self, view: View) -> &[Game] {
        match view {
            View::Backlog => &self.backlog,
            View::Playing => &self.playing,
            View::History => &self.history,
            View::Calendar => &self.calendar,
            View::All => &self.all,
        }
    }

    /// First copy of game `id` found in any list.
    pub fn find(&self, id: &str) -> Option<&Game> {
        [
            &self.all,
            &self.backlog,
            &self.playing,
            &self.history,
            &self.calendar,
        ]
        .into_iter()
        .flat_map(|list| list.iter())
        .find(|game| game.id == id)
    }

    /// Replace lists with a fresh server response.
    ///
    /// A specific view only replaces its own list. Without a view the response
    /// holds every game and all lists are rebuilt from it.
    pub fn replace(&mut self, view: Option<View>, games: Vec<Game>, cutoff: OffsetDateTime) {
        let Some(view) = view else {
            *self = Self::default();
            for game in &games {
                self.add_to_status_list(game.clone(), cutoff);
            }
            self.all = games;
            sort_by_release_date_desc(&mut self.all);
            return;
        };

        let list = match view {
            View::Backlog => &mut self.backlog,
            View::Playing => &mut self.playing,
            View::History => &mut self.history,
            View::Calendar => &mut self.calendar,
            View::All => &mut self.all,
        };
        *list = games;
        match view {
            View::Backlog | View::Calendar => sort_by_release_date(list),
            View::Playing => sort_by_updated_desc(list),
            View::History => sort_by_date_played_desc(list),
            View::All => sort_by_release_date_desc(list),
        }
    }

    /// Add a newly created game to its status list, the calendar and `all`.
    pub fn insert(&mut self, game: Game, cutoff: OffsetDateTime) {
        self.remove(&game.id);
        self.add_to_status_list(game.clone(), cutoff);
        self.all.push(game);
        sort_by_release_date_desc(&mut self.all);
    }

    /// Move a game whose status changed to its new list.
    ///
    /// The `all` entry is replaced in place since its sort key is unchanged.
    pub fn apply_status_update(&mut self, game: Game, cutoff: OffsetDateTime) {
        self.remove_from_status_lists(&game.id);
        if let Some(slot) = self.all.iter_mut().find(|existing| existing.id == game.id) {
            *slot = game.clone();
        }
        self.add_to_status_list(game, cutoff);
    }

    /// Re-file a game whose catalogue metadata (release date included) changed.
    pub fn apply_match_update(&mut self, game: Game, cutoff: OffsetDateTime) {
        self.insert(game, cutoff);
    }

    /// Drop game `id` from every list. Returns whether anything was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.all.len();
        self.all.retain(|game| game.id != id);
        let removed_from_status = self.remove_from_status_lists(id);
        removed_from_status || self.all.len() != before
    }

    fn remove_from_status_lists(&mut self, id: &str) -> bool {
        let mut removed = false;
        for list in [
            &mut self.backlog,
            &mut self.playing,
            &mut self.history,
            &mut self.calendar,
        ] {
            let before = list.len();
            list.retain(|game| game.id != id);
            removed |= list.len() != before;
        }
        removed
    }

    fn add_to_status_list(&mut self, game: Game, cutoff: OffsetDateTime) {
        match game.status.group() {
            StatusGroup::Todo => {
                if in_calendar_window(&game, cutoff) {
                    self.calendar.push(game.clone());
                    sort_by_release_date(&mut self.calendar);
                }
                self.backlog.push(game);
                sort_by_release_date(&mut self.backlog);
            }
            StatusGroup::InProgress => {
                self.playing.push(game);
                sort_by_updated_desc(&mut self.playing);
            }
            StatusGroup::Complete => {
                self.history.push(game);
                sort_by_date_played_desc(&mut self.history);
            }
        }
    }
}

/// Whether a to-do game belongs on the release calendar.
pub fn in_calendar_window(game: &Game, cutoff: OffsetDateTime) -> bool {
    game.is_todo() && game.release_date.is_some_and(|release| release >= cutoff)
}

fn or_epoch(date: Option<OffsetDateTime>) -> OffsetDateTime {
    date.unwrap_or(OffsetDateTime::UNIX_EPOCH)
}

fn sort_by_release_date(games: &mut [Game]) {
    games.sort_by_key(|game| or_epoch(game.release_date));
}

fn sort_by_release_date_desc(games: &mut [Game]) {
    games.sort_by_key(|game| Reverse(or_epoch(game.release_date)));
}

fn sort_by_updated_desc(games: &mut [Game]) {
    games.sort_by_key(|game| Reverse(or_epoch(game.updated_at)));
}

fn sort_by_date_played_desc(games: &mut [Game]) {
    games.sort_by_key(|game| Reverse(or_epoch(game.date_played)));
}
