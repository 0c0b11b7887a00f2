//! League standings table.
//!
//! Teams come with their statistics rows plus the last five results, which
//! are fetched concurrently per team. The table is filtered by league,
//! sorted on the selected column, and grouped by league for display.

use indexmap::IndexMap;
use serde::Serialize;
use tokio::task::JoinSet;

use super::{accept, filter, LoadTicket, RequestTracker, Showing};
use crate::{
    cli::types::{SortDirection, SortField},
    models::{form_strip, Medal, Team, TeamPerformance, Trend},
    queries::LeagueQueries,
};

/// A team with its recent form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StandingRow {
    pub team: Team,
    pub recent_form: Vec<TeamPerformance>,
}

impl StandingRow {
    pub fn points(&self) -> u32 {
        self.team.league_points()
    }

    pub fn win_percentage(&self) -> f64 {
        self.team.win_percentage()
    }

    pub fn trend(&self) -> Trend {
        self.team.trend()
    }

    pub fn form(&self) -> String {
        form_strip(&self.recent_form)
    }

    fn sort_key(&self, field: SortField) -> f64 {
        match field {
            SortField::Ranking => f64::from(self.team.ranking),
            SortField::Wins => f64::from(self.team.wins),
            SortField::Losses => f64::from(self.team.losses),
            SortField::Points => f64::from(self.points()),
            SortField::WinPercentage => self.win_percentage(),
        }
    }
}

/// A row as placed inside its league table.
#[derive(Debug, Clone, Copy)]
pub struct Placed<'a> {
    /// 1-based position within the league group.
    pub place: usize,
    pub row: &'a StandingRow,
}

impl Placed<'_> {
    pub fn medal(&self) -> Option<Medal> {
        u32::try_from(self.place).ok().and_then(Medal::for_rank)
    }
}

#[derive(Debug)]
pub struct Standings {
    rows: Vec<StandingRow>,
    league: Option<String>,
    sort_field: SortField,
    sort_direction: SortDirection,
    loading: bool,
    tracker: RequestTracker,
}

impl Default for Standings {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            league: None,
            sort_field: SortField::Points,
            sort_direction: SortDirection::Desc,
            loading: false,
            tracker: RequestTracker::default(),
        }
    }
}

impl Standings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every team, then each team's recent form concurrently.
    pub async fn load(&mut self, queries: &LeagueQueries) {
        let ticket = self.begin_load();
        let teams = queries.team_rankings_by_league("all").await;

        let mut forms: Vec<Vec<TeamPerformance>> = vec![Vec::new(); teams.len()];
        let mut set = JoinSet::new();
        for (idx, team) in teams.iter().enumerate() {
            let queries = queries.clone();
            let team_id = team.id;
            set.spawn(async move { (idx, queries.team_performance(team_id).await) });
        }
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok((idx, form)) => forms[idx] = form,
                Err(e) => tracing::error!(error = %e, "team form task failed"),
            }
        }

        let rows = teams
            .into_iter()
            .zip(forms)
            .map(|(team, recent_form)| StandingRow { team, recent_form })
            .collect();
        self.finish_load(ticket, rows);
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.loading = true;
        self.tracker.begin()
    }

    pub fn finish_load(&mut self, ticket: LoadTicket, rows: Vec<StandingRow>) -> bool {
        if !accept(&self.tracker, ticket, "standings") {
            return false;
        }
        self.rows = rows;
        self.loading = false;
        true
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn set_league(&mut self, league: &str) {
        self.league = filter::choice(league);
    }

    /// Column header click: the active column toggles direction, a new one
    /// starts in its natural direction.
    pub fn select_sort(&mut self, field: SortField) {
        if self.sort_field == field {
            self.sort_direction = self.sort_direction.flipped();
        } else {
            self.sort_field = field;
            self.sort_direction = field.default_direction();
        }
    }

    pub fn sort(&self) -> (SortField, SortDirection) {
        (self.sort_field, self.sort_direction)
    }

    /// League options with team counts over all loaded teams.
    pub fn leagues(&self) -> IndexMap<String, usize> {
        filter::counts(self.rows.iter(), |r| r.team.league.as_str())
    }

    /// Filtered and sorted rows, ungrouped.
    pub fn visible(&self) -> Vec<&StandingRow> {
        let mut rows: Vec<&StandingRow> = self
            .rows
            .iter()
            .filter(|r| filter::matches_choice(self.league.as_deref(), Some(r.team.league.as_str())))
            .collect();
        let field = self.sort_field;
        filter::sort_by_number(&mut rows, self.sort_direction, |r| r.sort_key(field));
        rows
    }

    /// Visible rows grouped by league, each group numbered from 1.
    pub fn grouped(&self) -> IndexMap<String, Vec<Placed<'_>>> {
        filter::group_by(self.visible(), |r| r.team.league.clone())
            .into_iter()
            .map(|(league, rows)| {
                let placed = rows
                    .into_iter()
                    .enumerate()
                    .map(|(i, row)| Placed { place: i + 1, row })
                    .collect();
                (league, placed)
            })
            .collect()
    }

    pub fn showing(&self) -> Showing {
        Showing::new(self.visible().len(), self.rows.len(), "teams")
    }
}
