//! Server-side player name search.

use super::{accept, LoadTicket, RequestTracker, Showing};
use crate::{models::Player, queries::LeagueQueries};

#[derive(Debug, Default)]
pub struct PlayerSearch {
    text: String,
    results: Vec<Player>,
    tracker: RequestTracker,
}

impl PlayerSearch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run a search; a newer search started meanwhile wins.
    pub async fn search(&mut self, queries: &LeagueQueries, text: &str) {
        let ticket = self.begin(text);
        let results = queries.search_players(text).await;
        self.finish(ticket, results);
    }

    pub fn begin(&mut self, text: &str) -> LoadTicket {
        self.text = text.to_string();
        self.tracker.begin()
    }

    pub fn finish(&mut self, ticket: LoadTicket, results: Vec<Player>) -> bool {
        if !accept(&self.tracker, ticket, "search") {
            return false;
        }
        self.results = results;
        true
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn results(&self) -> &[Player] {
        &self.results
    }

    pub fn showing(&self) -> Showing {
        Showing::new(self.results.len(), self.results.len(), "players")
    }
}
