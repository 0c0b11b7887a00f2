//! A single team's page: header plus roster grouped by position.

use indexmap::IndexMap;

use super::{accept, filter, LoadTicket, RequestTracker};
use crate::{
    models::{Player, Team},
    queries::LeagueQueries,
    Position, TeamId,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterState {
    Loading,
    NotFound,
    Ready,
}

#[derive(Debug)]
pub struct TeamRoster {
    slug: String,
    team: Option<Team>,
    players: Vec<Player>,
    loading: bool,
    tracker: RequestTracker,
}

impl TeamRoster {
    /// Roster for the team addressed by `slug` (its numeric id).
    pub fn new(slug: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            team: None,
            players: Vec::new(),
            loading: false,
            tracker: RequestTracker::default(),
        }
    }

    /// Fetch the team and its players concurrently.
    pub async fn load(&mut self, queries: &LeagueQueries) {
        let ticket = self.begin_load();
        let team_id = self.slug.trim().parse::<TeamId>().ok();
        let (team, players) = tokio::join!(queries.team_by_slug(&self.slug), async {
            match team_id {
                Some(id) => queries.players_by_team(id).await,
                None => Vec::new(),
            }
        });
        self.finish_load(ticket, team, players);
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.loading = true;
        self.tracker.begin()
    }

    pub fn finish_load(&mut self, ticket: LoadTicket, team: Option<Team>, players: Vec<Player>) -> bool {
        if !accept(&self.tracker, ticket, "team_roster") {
            return false;
        }
        self.team = team;
        self.players = players;
        self.loading = false;
        true
    }

    pub fn state(&self) -> RosterState {
        if self.loading {
            RosterState::Loading
        } else if self.team.is_none() {
            RosterState::NotFound
        } else {
            RosterState::Ready
        }
    }

    pub fn team(&self) -> Option<&Team> {
        self.team.as_ref()
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Players grouped by position, groups in fixed court order.
    pub fn by_position(&self) -> IndexMap<Position, Vec<&Player>> {
        let mut groups = filter::group_by(self.players.iter(), |p| p.position);
        groups.sort_by(|a, _, b, _| a.display_rank().cmp(&b.display_rank()));
        groups
    }
}
