//! CLI argument definitions and parsing.

pub mod types;

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use types::{AgeBucket, MatchId, MatchTab, PlayerId, Position, SortField, StatusFilter};

/// Where to read league data from. Flags win over environment variables.
#[derive(Debug, Default, Clone, Args)]
pub struct BackendArgs {
    /// Backend base URL (or set `VOLLEY_SUPABASE_URL`).
    #[clap(long, global = true)]
    pub url: Option<String>,

    /// Anonymous API key (or set `VOLLEY_SUPABASE_ANON_KEY`).
    #[clap(long = "anon-key", global = true)]
    pub anon_key: Option<String>,

    /// Read from a local SQLite snapshot instead (or set `VOLLEY_SNAPSHOT`).
    #[clap(long, global = true)]
    pub snapshot: Option<PathBuf>,

    /// Use the snapshot in the user cache directory.
    #[clap(long, global = true)]
    pub offline: bool,
}

/// Live refresh for pages that support it.
#[derive(Debug, Clone, Copy, Args)]
pub struct WatchArgs {
    /// Keep running and re-render on every backend change (Ctrl-C to stop).
    #[clap(long)]
    pub watch: bool,

    /// Seconds between change polls in watch mode.
    #[clap(long, default_value_t = 5, value_parser = clap::value_parser!(u64).range(1..))]
    pub interval_secs: u64,
}

#[derive(Debug, Parser)]
#[clap(name = "volley", about = "Volleyball league rosters, rankings and schedule", version)]
pub struct VolleyCli {
    #[clap(flatten)]
    pub backend: BackendArgs,

    /// More logging (-v debug, -vv trace).
    #[clap(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors.
    #[clap(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results as JSON instead of text.
    #[clap(long, global = true)]
    pub json: bool,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List teams, optionally for one league.
    Teams {
        /// League name, or "all".
        #[clap(long, short, default_value = "all")]
        league: String,
    },

    /// Show one team and its roster grouped by position.
    Team {
        /// Team slug (the numeric team id).
        slug: String,
    },

    /// Browse players.
    Players {
        /// Name or nationality substring.
        #[clap(long, short, default_value = "")]
        search: String,

        #[clap(long, short)]
        position: Option<Position>,

        /// Team name, or "all".
        #[clap(long, short, default_value = "all")]
        team: String,
    },

    /// Show a player profile.
    Player { id: PlayerId },

    /// Player rankings table.
    PlayerRankings {
        #[clap(long, short)]
        position: Option<Position>,

        /// League name, or "all".
        #[clap(long, short, default_value = "all")]
        league: String,

        /// Nationality, or "all".
        #[clap(long, short, default_value = "all")]
        nationality: String,

        #[clap(long, short, value_enum)]
        age: Option<AgeBucket>,

        /// Player or team name substring.
        #[clap(long, short, default_value = "")]
        search: String,

        #[clap(flatten)]
        watch: WatchArgs,
    },

    /// League standings with recent form.
    Standings {
        /// League name, or "all".
        #[clap(long, short, default_value = "all")]
        league: String,

        /// Column clicks in order; repeating a column flips its direction.
        #[clap(long = "sort", value_enum)]
        sort: Vec<SortField>,
    },

    /// Match schedule grouped by day.
    Schedule {
        /// League name, or "all".
        #[clap(long, short, default_value = "all")]
        league: String,

        #[clap(long, value_enum)]
        status: Option<StatusFilter>,

        #[clap(flatten)]
        watch: WatchArgs,
    },

    /// Show one match.
    Match {
        id: MatchId,

        #[clap(long, value_enum, default_value_t = MatchTab::Overview)]
        tab: MatchTab,
    },

    /// Featured players carousel.
    Featured {
        /// Carousel position of the first visible card.
        #[clap(long, default_value_t = 0)]
        start: usize,
    },

    /// Search players by name on the server.
    Search { text: String },

    /// Manage the local snapshot.
    Snapshot {
        #[clap(subcommand)]
        cmd: SnapshotCmd,
    },
}

#[derive(Debug, Subcommand)]
pub enum SnapshotCmd {
    /// Load a SQL script into the snapshot, creating it if needed.
    Import {
        /// SQL file with INSERT statements for the league tables.
        file: PathBuf,

        /// Snapshot to write (defaults to the cache-directory snapshot).
        #[clap(long)]
        path: Option<PathBuf>,
    },
}
