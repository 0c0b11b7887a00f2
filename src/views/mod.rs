//! Page view models.
//!
//! Each view owns its fetched collection plus the user's filter and sort
//! selections, and derives the display subset with the pure helpers in
//! [`filter`]. Loading goes through a [`RequestTracker`] so that only the
//! most recent request may replace the collection:
//!
//! ```rust
//! use volley_league::views::RequestTracker;
//!
//! let mut tracker = RequestTracker::default();
//! let first = tracker.begin();
//! let second = tracker.begin();
//! assert!(!tracker.is_current(first));
//! assert!(tracker.is_current(second));
//! ```

pub mod featured;
pub mod filter;
pub mod player_rankings;
pub mod players_grid;
pub mod schedule;
pub mod search;
pub mod standings;
pub mod team_roster;
pub mod teams_grid;

use std::fmt;

pub use featured::FeaturedCarousel;
pub use player_rankings::PlayerRankingsView;
pub use players_grid::PlayersGrid;
pub use schedule::Schedule;
pub use search::PlayerSearch;
pub use standings::{StandingRow, Standings};
pub use team_roster::{RosterState, TeamRoster};
pub use teams_grid::TeamsGrid;

/// Generation token handed out when a load starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// "Last request wins" guard.
///
/// Every new request, and every pushed replacement, advances the
/// generation; a response is applied only if its ticket is still current.
#[derive(Debug, Default)]
pub struct RequestTracker {
    generation: u64,
}

impl RequestTracker {
    pub fn begin(&mut self) -> LoadTicket {
        self.generation += 1;
        LoadTicket(self.generation)
    }

    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket.0 == self.generation
    }

    /// Retire every outstanding ticket.
    pub fn invalidate(&mut self) {
        self.generation += 1;
    }
}

/// Logs and reports whether a response for `ticket` should be applied.
pub(crate) fn accept(tracker: &RequestTracker, ticket: LoadTicket, view: &'static str) -> bool {
    let current = tracker.is_current(ticket);
    if !current {
        tracing::debug!(view, ticket = ticket.0, "discarding stale response");
    }
    current
}

/// "Showing X of Y" counter with the empty-state message for a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Showing {
    pub shown: usize,
    pub total: usize,
    pub noun: &'static str,
}

impl Showing {
    pub fn new(shown: usize, total: usize, noun: &'static str) -> Self {
        Self { shown, total, noun }
    }

    pub fn is_empty(&self) -> bool {
        self.shown == 0
    }

    pub fn empty_message(&self) -> String {
        format!("No {} found matching your filters.", self.noun)
    }
}

impl fmt::Display for Showing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Showing {} of {} {}", self.shown, self.total, self.noun)
    }
}
