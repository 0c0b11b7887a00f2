//! Player spotlight carousel.

use super::{accept, LoadTicket, RequestTracker};
use crate::{models::Player, queries::LeagueQueries};

/// Cards visible at once.
pub const PER_VIEW: usize = 3;

#[derive(Debug, Default)]
pub struct FeaturedCarousel {
    players: Vec<Player>,
    index: usize,
    loading: bool,
    tracker: RequestTracker,
}

impl FeaturedCarousel {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn load(&mut self, queries: &LeagueQueries) {
        let ticket = self.begin_load();
        let players = queries.featured_players().await;
        self.finish_load(ticket, players);
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.loading = true;
        self.tracker.begin()
    }

    pub fn finish_load(&mut self, ticket: LoadTicket, players: Vec<Player>) -> bool {
        if !accept(&self.tracker, ticket, "featured") {
            return false;
        }
        self.players = players;
        self.index = self.index.min(self.max_index());
        self.loading = false;
        true
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn max_index(&self) -> usize {
        self.players.len().saturating_sub(PER_VIEW)
    }

    pub fn previous(&mut self) {
        self.index = self.index.saturating_sub(1);
    }

    pub fn next(&mut self) {
        self.index = (self.index + 1).min(self.max_index());
    }

    /// Jump to `index`, clamped to the valid range.
    pub fn seek(&mut self, index: usize) {
        self.index = index.min(self.max_index());
    }

    pub fn can_go_previous(&self) -> bool {
        self.index > 0
    }

    pub fn can_go_next(&self) -> bool {
        self.index < self.max_index()
    }

    /// The cards currently in view.
    pub fn window(&self) -> &[Player] {
        let end = (self.index + PER_VIEW).min(self.players.len());
        &self.players[self.index..end]
    }
}
