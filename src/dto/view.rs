use std::fmt;
use std::str::FromStr;

/// Server-side filter applied by `GET /games?view=...`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    /// Backlog and Break games, release date ascending.
    Backlog,
    /// Playing games, most recently updated first.
    Playing,
    /// Completed games, most recently played first.
    History,
    /// To-do games releasing from one month ago onwards.
    Calendar,
    /// Every game, release date descending.
    All,
}

impl View {
    /// Every view, in navigation order.
    pub const ALL: [View; 5] = [
        View::Backlog,
        View::Playing,
        View::History,
        View::Calendar,
        View::All,
    ];

    /// Value used for the `view` query parameter.
    pub fn as_query(self) -> &'static str {
        match self {
            View::Backlog => "backlog",
            View::Playing => "playing",
            View::History => "history",
            View::Calendar => "calendar",
            View::All => "all",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_query())
    }
}

/// Error returned when parsing an unknown view name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown view `{0}` (expected backlog, playing, history, calendar or all)")]
pub struct UnknownView(pub String);

impl FromStr for View {
    type Err = UnknownView;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = value.trim().to_ascii_lowercase();
        View::ALL
            .into_iter()
            .find(|view| view.as_query() == wanted)
            .ok_or_else(|| UnknownView(value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_query_names() {
        for view in View::ALL {
            assert_eq!(view.as_query().parse::<View>().unwrap(), view);
        }
        assert_eq!("Calendar".parse::<View>().unwrap(), View::Calendar);
        assert!("wishlist".parse::<View>().is_err());
    }
}
