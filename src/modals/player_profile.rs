//! Player profile modal.

use serde::Serialize;

use crate::{
    models::{bar_percent, Player, PlayerStats, Team},
    queries::LeagueQueries,
    views::{LoadTicket, RequestTracker},
    PlayerId,
};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ModalState {
    #[default]
    Closed,
    /// Waiting on the full fetch; `fallback` is shown if it comes back empty.
    Loading { fallback: Option<Player> },
    Open(Player),
}

/// One labelled percentage bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub label: &'static str,
    pub value: f64,
    /// Display width in percent, clamped to `0..=100`.
    pub width: f64,
}

impl Bar {
    fn new(label: &'static str, value: f64) -> Self {
        Self {
            label,
            value,
            width: bar_percent(value),
        }
    }
}

/// Everything the profile renders, with fallbacks applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Profile {
    pub name: String,
    pub initials: String,
    pub position: String,
    pub team: String,
    pub nationality: String,
    pub age: String,
    pub height: String,
    pub category: String,
    pub league: String,
    pub bio: String,
    pub stats: PlayerStats,
    pub bars: Vec<Bar>,
    pub form: String,
    pub team_record: Option<String>,
}

fn or_na(value: Option<&str>) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or("N/A")
        .to_string()
}

impl Profile {
    pub fn from_player(player: &Player) -> Self {
        let stats = player.current_stats().cloned().unwrap_or_default();
        let bars = vec![
            Bar::new("Attack %", stats.attack_percentage),
            Bar::new("Attack Efficiency", stats.attack_efficiency),
            Bar::new("Serve Effectiveness", stats.serve_effectiveness),
            Bar::new("Defense Rating", stats.defense_rating),
        ];
        Self {
            name: player.display_name().to_string(),
            initials: player.initials(),
            position: player.position.to_string(),
            team: player.team_name().to_string(),
            nationality: player.nationality_or_unknown().to_string(),
            age: player.age.map_or_else(|| "N/A".to_string(), |a| a.to_string()),
            height: or_na(player.height.as_deref()),
            category: or_na(player.category.as_deref()),
            league: or_na(player.league()),
            bio: player
                .bio
                .clone()
                .filter(|b| !b.is_empty())
                .unwrap_or_else(|| "No biography available.".to_string()),
            form: format!("{}/10", stats.form_rating),
            bars,
            stats,
            team_record: player.team.as_ref().map(Team::record),
        }
    }
}

#[derive(Debug, Default)]
pub struct PlayerProfileModal {
    state: ModalState,
    tracker: RequestTracker,
}

impl PlayerProfileModal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ModalState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        !matches!(self.state, ModalState::Closed)
    }

    pub fn player(&self) -> Option<&Player> {
        match &self.state {
            ModalState::Open(player) => Some(player),
            _ => None,
        }
    }

    pub fn profile(&self) -> Option<Profile> {
        self.player().map(Profile::from_player)
    }

    /// Open with an entity the caller already holds; no fetch.
    pub fn open_with(&mut self, player: Player) {
        self.tracker.invalidate();
        self.state = ModalState::Open(player);
    }

    pub fn begin_open(&mut self, fallback: Option<Player>) -> LoadTicket {
        self.state = ModalState::Loading { fallback };
        self.tracker.begin()
    }

    /// Apply a full fetch; returns false if the modal moved on meanwhile.
    pub fn finish_open(&mut self, ticket: LoadTicket, fetched: Option<Player>) -> bool {
        if !crate::views::accept(&self.tracker, ticket, "player_profile") {
            return false;
        }
        let fallback = match std::mem::take(&mut self.state) {
            ModalState::Loading { fallback } => fallback,
            _ => None,
        };
        self.state = match fetched.or(fallback) {
            Some(player) => ModalState::Open(player),
            None => ModalState::Closed,
        };
        true
    }

    /// Fetch the full record, keeping `fallback` if the fetch comes back empty.
    pub async fn open_by_id(
        &mut self,
        queries: &LeagueQueries,
        id: PlayerId,
        fallback: Option<Player>,
    ) {
        let ticket = self.begin_open(fallback);
        let fetched = queries.full_player_data(id).await;
        self.finish_open(ticket, fetched);
    }

    /// Discard the entity; a pending fetch is ignored when it lands.
    pub fn close(&mut self) {
        self.tracker.invalidate();
        self.state = ModalState::Closed;
    }
}
