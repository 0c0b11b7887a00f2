//! Teams grid with a league filter.

use indexmap::IndexMap;

use super::{accept, filter, LoadTicket, RequestTracker, Showing};
use crate::{models::Team, queries::LeagueQueries};

#[derive(Debug, Default)]
pub struct TeamsGrid {
    teams: Vec<Team>,
    league: Option<String>,
    loading: bool,
    tracker: RequestTracker,
}

impl TeamsGrid {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn load(&mut self, queries: &LeagueQueries) {
        let ticket = self.begin_load();
        let teams = queries.teams().await;
        self.finish_load(ticket, teams);
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.loading = true;
        self.tracker.begin()
    }

    /// Apply a response; stale tickets are ignored. Returns whether applied.
    pub fn finish_load(&mut self, ticket: LoadTicket, teams: Vec<Team>) -> bool {
        if !accept(&self.tracker, ticket, "teams_grid") {
            return false;
        }
        self.teams = teams;
        self.loading = false;
        true
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn set_league(&mut self, league: &str) {
        self.league = filter::choice(league);
    }

    pub fn league(&self) -> Option<&str> {
        self.league.as_deref()
    }

    /// League options with team counts, in first-appearance order.
    pub fn leagues(&self) -> IndexMap<String, usize> {
        filter::counts(&self.teams, |t| t.league.as_str())
    }

    pub fn visible(&self) -> Vec<&Team> {
        self.teams
            .iter()
            .filter(|t| filter::matches_choice(self.league(), Some(t.league.as_str())))
            .collect()
    }

    pub fn showing(&self) -> Showing {
        Showing::new(self.visible().len(), self.teams.len(), "teams")
    }
}
