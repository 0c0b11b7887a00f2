//! Players grid: search, position and team filters.

use super::{accept, filter, LoadTicket, RequestTracker, Showing};
use crate::{
    models::{Player, Team},
    queries::LeagueQueries,
    Position,
};

#[derive(Debug, Default)]
pub struct PlayersGrid {
    players: Vec<Player>,
    teams: Vec<Team>,
    search: String,
    position: Option<Position>,
    team: Option<String>,
    loading: bool,
    tracker: RequestTracker,
}

impl PlayersGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch players and teams concurrently.
    pub async fn load(&mut self, queries: &LeagueQueries) {
        let ticket = self.begin_load();
        let (players, teams) = tokio::join!(queries.players(), queries.teams());
        self.finish_load(ticket, players, teams);
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.loading = true;
        self.tracker.begin()
    }

    pub fn finish_load(&mut self, ticket: LoadTicket, players: Vec<Player>, teams: Vec<Team>) -> bool {
        if !accept(&self.tracker, ticket, "players_grid") {
            return false;
        }
        self.players = players;
        self.teams = teams;
        self.loading = false;
        true
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn set_search(&mut self, text: &str) {
        self.search = text.to_string();
    }

    pub fn set_position(&mut self, position: Option<Position>) {
        self.position = position;
    }

    /// Filter by team name; `"all"` clears.
    pub fn set_team(&mut self, team: &str) {
        self.team = filter::choice(team);
    }

    /// Positions present in the loaded players, first-appearance order.
    pub fn positions(&self) -> Vec<Position> {
        let mut out: Vec<Position> = Vec::new();
        for p in &self.players {
            if !out.contains(&p.position) {
                out.push(p.position);
            }
        }
        out
    }

    /// Every loaded team's name, in ranking order.
    pub fn team_options(&self) -> Vec<String> {
        filter::distinct(&self.teams, |t| Some(t.name.as_str()))
    }

    fn keep(&self, player: &Player) -> bool {
        filter::matches_search(&self.search, &[Some(player.name.as_str()), player.nationality.as_deref()])
            && self.position.map_or(true, |p| player.position == p)
            && filter::matches_choice(
                self.team.as_deref(),
                player.team.as_ref().map(|t| t.name.as_str()),
            )
    }

    pub fn visible(&self) -> Vec<&Player> {
        self.players.iter().filter(|p| self.keep(p)).collect()
    }

    pub fn showing(&self) -> Showing {
        Showing::new(self.visible().len(), self.players.len(), "players")
    }
}
