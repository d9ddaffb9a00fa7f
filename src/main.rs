//! Command-line entrypoint: signs in, fetches a view and prints the resulting lists.

use std::{env, sync::Arc};

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use game_tracker_client::{
    api::{GamesApi, HttpGamesApi},
    auth::{AuthSession, StaticIdentity},
    config::ClientConfig,
    dto::{
        Game, View,
        dates::{format_date_played, format_release_date},
        platform::sort_platforms,
    },
    state::{GameLists, GamesStore},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let view = env::args()
        .nth(1)
        .map(|arg| arg.parse::<View>())
        .transpose()
        .context("parsing view argument")?;

    let config = ClientConfig::load();
    let identity = Arc::new(StaticIdentity::new(
        config.id_token.clone(),
        config.profile.clone(),
    ));

    let session = AuthSession::new(identity.clone());
    session.sign_in().await.context("signing in")?;
    info!(user = %session.display_name().await, "authenticated");

    let api = Arc::new(
        HttpGamesApi::new(config.api.clone(), identity).context("building API client")?,
    );
    match api.health_check().await {
        Ok(health) if health.is_ok() => {}
        Ok(health) => warn!(status = %health.status, "backend reports degraded health"),
        Err(err) => warn!(error = %err, "backend health check failed"),
    }

    let store = GamesStore::new(api, config.store);
    store.fetch_games(view).await.context("fetching games")?;

    print_lists(&store.snapshot().await, view);
    Ok(())
}

/// Configure tracing subscribers so logs include spans by default.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,game_tracker_client=debug".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn print_lists(lists: &GameLists, view: Option<View>) {
    let views = match view {
        Some(view) => vec![view],
        None => vec![View::Backlog, View::Playing, View::History, View::Calendar],
    };

    for view in views {
        let games = lists.view(view);
        println!("== {} ({})", view, games.len());
        for game in games {
            println!("{}", describe(game));
        }
    }
}

fn describe(game: &Game) -> String {
    let mut line = format!(
        "  {:<40} {:<11} {}",
        game.title,
        game.status.as_str(),
        format_release_date(game.release_date)
    );
    if let Some(played) = format_date_played(game.date_played) {
        line.push_str(&format!("  played {played}"));
    }
    if !game.platforms.is_empty() {
        line.push_str(&format!("  [{}]", sort_platforms(&game.platforms).join(", ")));
    }
    line
}
