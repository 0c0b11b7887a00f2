//! Volleyball League Library
//!
//! Data access and view composition for a volleyball league site: team and
//! player rosters, rankings, standings, and the match schedule, read from a
//! hosted PostgREST backend or a local SQLite snapshot.
//!
//! ## Layers
//!
//! - **Backend**: a table-oriented [`backend::Backend`] trait with column
//!   selection, filters, ordering, limits and relational embeds
//! - **Query Layer**: [`queries::LeagueQueries`], one async function per
//!   page query; failures are logged and collapse to empty results
//! - **Realtime**: per-table change channels and re-query subscriptions
//! - **Views and Modals**: page view models that filter, sort and group the
//!   fetched collections
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use volley_league::{backend::SqliteBackend, queries::LeagueQueries, views::Standings};
//!
//! # async fn example() -> volley_league::Result<()> {
//! let backend = SqliteBackend::open(&SqliteBackend::default_path()?)?;
//! let queries = LeagueQueries::new(Arc::new(backend));
//!
//! let mut standings = Standings::new();
//! standings.load(&queries).await;
//! for (league, rows) in standings.grouped() {
//!     println!("{}: {} teams", league, rows.len());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Configuration
//!
//! ```bash
//! export VOLLEY_SUPABASE_URL=https://example.supabase.co
//! export VOLLEY_SUPABASE_ANON_KEY=...
//! # or read a local snapshot instead
//! export VOLLEY_SNAPSHOT=~/.cache/volley-league/league.db
//! ```

pub mod backend;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod modals;
pub mod models;
pub mod queries;
pub mod realtime;
pub mod views;

// Re-export commonly used types
pub use cli::types::{MatchId, PlayerId, Position, TeamId};
pub use error::{LeagueError, Result};

pub const URL_ENV_VAR: &str = "VOLLEY_SUPABASE_URL";
pub const ANON_KEY_ENV_VAR: &str = "VOLLEY_SUPABASE_ANON_KEY";
pub const SNAPSHOT_ENV_VAR: &str = "VOLLEY_SNAPSHOT";
