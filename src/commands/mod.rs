//! Command implementations for the volley CLI.
//!
//! Each page has a `handle_*` entry point that loads its view model and a
//! pure `render_*` function that turns the view into text, so the output
//! can be tested without a terminal.

pub mod matches;
pub mod players;
pub mod rankings;
pub mod snapshot;
pub mod teams;

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::mpsc;

use crate::{
    cli::{Commands, WatchArgs},
    queries::LeagueQueries,
    realtime::{spawn_watermark_poller, ChangeHub, Subscription},
    LeagueError, Result,
};

/// Resources shared by every command.
#[derive(Clone)]
pub struct CommandContext {
    pub queries: LeagueQueries,
    pub as_json: bool,
}

impl CommandContext {
    pub fn new(queries: LeagueQueries, as_json: bool) -> Self {
        Self { queries, as_json }
    }

    /// Print `value` as JSON, or the rendered text.
    pub fn emit<T>(&self, value: &T, text: impl FnOnce() -> String) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        if self.as_json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            print!("{}", text());
        }
        Ok(())
    }
}

/// Run a data command against the configured backend.
///
/// `snapshot` is handled before a backend exists and is rejected here.
pub async fn run(ctx: &CommandContext, command: Commands) -> Result<()> {
    match command {
        Commands::Teams { league } => teams::handle_teams(ctx, &league).await,
        Commands::Team { slug } => teams::handle_team(ctx, &slug).await,
        Commands::Players {
            search,
            position,
            team,
        } => players::handle_players(ctx, &search, position, &team).await,
        Commands::Player { id } => players::handle_player(ctx, id).await,
        Commands::PlayerRankings {
            position,
            league,
            nationality,
            age,
            search,
            watch,
        } => {
            let filters = rankings::RankingFilters {
                position,
                league,
                nationality,
                age,
                search,
            };
            rankings::handle_player_rankings(ctx, &filters, watch).await
        }
        Commands::Standings { league, sort } => rankings::handle_standings(ctx, &league, &sort).await,
        Commands::Schedule {
            league,
            status,
            watch,
        } => matches::handle_schedule(ctx, &league, status, watch).await,
        Commands::Match { id, tab } => matches::handle_match(ctx, id, tab).await,
        Commands::Featured { start } => players::handle_featured(ctx, start).await,
        Commands::Search { text } => players::handle_search(ctx, &text).await,
        Commands::Snapshot { .. } => Err(LeagueError::Snapshot {
            message: "snapshot commands do not use a backend".to_string(),
        }),
    }
}

/// Keep a page live until Ctrl-C.
///
/// `start` wires a subscription on the hub that forwards each refreshed
/// collection into the sender; a watermark poller on `table` feeds the hub.
pub(crate) async fn run_watch<T, S, F>(
    ctx: &CommandContext,
    table: &'static str,
    column: &'static str,
    watch: WatchArgs,
    start: S,
    mut on_push: F,
) -> Result<()>
where
    T: Send + 'static,
    S: FnOnce(&ChangeHub, mpsc::UnboundedSender<Vec<T>>) -> Subscription,
    F: FnMut(Vec<T>) -> Result<()>,
{
    let hub = Arc::new(ChangeHub::new());
    let (tx, mut rx) = mpsc::unbounded_channel();
    let subscription = start(&hub, tx);
    let poller = spawn_watermark_poller(
        Arc::clone(ctx.queries.backend()),
        Arc::clone(&hub),
        table,
        column,
        Duration::from_secs(watch.interval_secs),
    );
    eprintln!("{}", watch_banner(table, watch.interval_secs)); // tarpaulin::skip

    let result = loop {
        tokio::select! {
            pushed = rx.recv() => match pushed {
                Some(rows) => {
                    if let Err(e) = on_push(rows) {
                        break Err(e);
                    }
                }
                None => break Ok(()),
            },
            signal = tokio::signal::ctrl_c() => break signal.map_err(LeagueError::from),
        }
    };

    poller.abort();
    subscription.unsubscribe();
    result
}

/// Status line shown when a page goes live. Written to stderr so `--json`
/// output stays parseable.
pub(crate) fn watch_banner(table: &str, every_secs: u64) -> String {
    format!("Watching {} for changes every {}s, Ctrl-C to stop", table, every_secs)
}

/// Forwarding callback for [`run_watch`] subscriptions.
pub(crate) fn forward<T>(tx: mpsc::UnboundedSender<Vec<T>>) -> impl FnMut(Vec<T>) + Send + 'static
where
    T: Send + 'static,
{
    move |rows| {
        if tx.send(rows).is_err() {
            tracing::debug!("watch loop gone, dropping push");
        }
    }
}

/// Footer line: the counter, or the empty-state message.
pub(crate) fn footer(showing: crate::views::Showing) -> String {
    if showing.is_empty() {
        format!("{}\n", showing.empty_message())
    } else {
        format!("{}\n", showing)
    }
}
