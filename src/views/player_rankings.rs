//! Player rankings table with live updates.
//!
//! Filters: position, league (of the player's team), nationality, age
//! bucket and free text over player and team names. A subscription push
//! replaces the whole collection and retires any in-flight load.

use super::{accept, filter, LoadTicket, RequestTracker, Showing};
use crate::{
    cli::types::AgeBucket,
    models::PlayerRanking,
    queries::LeagueQueries,
    Position,
};

#[derive(Debug, Default)]
pub struct PlayerRankingsView {
    rankings: Vec<PlayerRanking>,
    position: Option<Position>,
    league: Option<String>,
    nationality: Option<String>,
    age: Option<AgeBucket>,
    search: String,
    loading: bool,
    tracker: RequestTracker,
}

impl PlayerRankingsView {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn load(&mut self, queries: &LeagueQueries) {
        let ticket = self.begin_load();
        let rankings = queries.player_rankings().await;
        self.finish_load(ticket, rankings);
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.loading = true;
        self.tracker.begin()
    }

    pub fn finish_load(&mut self, ticket: LoadTicket, rankings: Vec<PlayerRanking>) -> bool {
        if !accept(&self.tracker, ticket, "player_rankings") {
            return false;
        }
        self.rankings = rankings;
        self.loading = false;
        true
    }

    /// Full replacement from a subscription push.
    pub fn apply_push(&mut self, rankings: Vec<PlayerRanking>) {
        self.tracker.invalidate();
        self.rankings = rankings;
        self.loading = false;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn set_position(&mut self, position: Option<Position>) {
        self.position = position;
    }

    pub fn set_league(&mut self, league: &str) {
        self.league = filter::choice(league);
    }

    pub fn set_nationality(&mut self, nationality: &str) {
        self.nationality = filter::choice(nationality);
    }

    pub fn set_age(&mut self, age: Option<AgeBucket>) {
        self.age = age;
    }

    pub fn set_search(&mut self, text: &str) {
        self.search = text.to_string();
    }

    /// The fixed position list, independent of the data.
    pub fn positions(&self) -> &'static [Position] {
        &Position::ALL
    }

    pub fn leagues(&self) -> Vec<String> {
        filter::distinct(&self.rankings, PlayerRanking::league)
    }

    pub fn nationalities(&self) -> Vec<String> {
        filter::distinct(&self.rankings, PlayerRanking::nationality)
    }

    fn keep(&self, r: &PlayerRanking) -> bool {
        self.position.map_or(true, |p| r.position == p)
            && filter::matches_choice(self.league.as_deref(), r.league())
            && filter::matches_choice(self.nationality.as_deref(), r.nationality())
            && self.age.map_or(true, |bucket| bucket.contains(r.age_or_zero()))
            && filter::matches_search(
                &self.search,
                &[r.player.as_ref().map(|p| p.name.as_str()), r.team_name()],
            )
    }

    /// Filtered rows in overall rank order.
    pub fn visible(&self) -> Vec<&PlayerRanking> {
        self.rankings.iter().filter(|r| self.keep(r)).collect()
    }

    pub fn showing(&self) -> Showing {
        Showing::new(self.visible().len(), self.rankings.len(), "players")
    }
}
