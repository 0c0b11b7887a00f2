//! Match detail modal with overview, statistics and set tabs.

use serde::Serialize;

use crate::{
    cli::types::MatchTab,
    models::{Match, MatchStatistics, SetScore, SetWinner},
    queries::LeagueQueries,
    views::{accept, LoadTicket, RequestTracker},
    MatchId,
};

/// Head-to-head bar for one statistic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatBar {
    pub label: &'static str,
    pub home: u32,
    pub away: u32,
    pub home_percent: f64,
    pub away_percent: f64,
}

impl StatBar {
    pub fn new(label: &'static str, home: u32, away: u32) -> Self {
        let total = f64::from(home) + f64::from(away);
        let (home_percent, away_percent) = if total > 0.0 {
            (f64::from(home) / total * 100.0, f64::from(away) / total * 100.0)
        } else {
            (50.0, 50.0)
        };
        Self {
            label,
            home,
            away,
            home_percent,
            away_percent,
        }
    }
}

/// Comparison bars in display order.
pub fn stat_bars(home: &MatchStatistics, away: &MatchStatistics) -> Vec<StatBar> {
    vec![
        StatBar::new("Total Points", home.total_points, away.total_points),
        StatBar::new("Attacks", home.attacks, away.attacks),
        StatBar::new("Blocks", home.blocks, away.blocks),
        StatBar::new("Aces", home.aces, away.aces),
        StatBar::new("Kills", home.kills, away.kills),
        StatBar::new("Digs", home.digs, away.digs),
        StatBar::new("Errors", home.errors, away.errors),
    ]
}

/// "Set 2: 25 - 21 (28min)"; the duration is omitted when unknown.
pub fn set_line(set: &SetScore) -> String {
    let marker = match set.winner() {
        SetWinner::Home => " <",
        SetWinner::Away => " >",
        SetWinner::Undecided => "",
    };
    let mut line = format!(
        "Set {}: {} - {}{}",
        set.set_number, set.home_score, set.away_score, marker
    );
    if set.duration_minutes > 0 {
        line.push_str(&format!(" ({}min)", set.duration_minutes));
    }
    line
}

/// Tabs a match can show.
pub fn available_tabs(m: &Match) -> Vec<MatchTab> {
    let mut tabs = vec![MatchTab::Overview];
    if m.has_statistics() {
        tabs.push(MatchTab::Statistics);
    }
    if m.has_set_scores() {
        tabs.push(MatchTab::Sets);
    }
    tabs
}

#[derive(Debug, Default)]
pub struct MatchDetailsModal {
    current: Option<Match>,
    loading: bool,
    tab: MatchTab,
    tracker: RequestTracker,
}

impl MatchDetailsModal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&Match> {
        self.current.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn tab(&self) -> MatchTab {
        self.tab
    }

    pub fn open(&mut self, m: Match) {
        self.tracker.invalidate();
        self.loading = false;
        self.tab = MatchTab::Overview;
        self.current = Some(m);
    }

    pub fn begin_open(&mut self) -> LoadTicket {
        self.loading = true;
        self.current = None;
        self.tab = MatchTab::Overview;
        self.tracker.begin()
    }

    pub fn finish_open(&mut self, ticket: LoadTicket, fetched: Option<Match>) -> bool {
        if !accept(&self.tracker, ticket, "match_details") {
            return false;
        }
        self.loading = false;
        self.current = fetched;
        true
    }

    pub async fn open_by_id(&mut self, queries: &LeagueQueries, id: MatchId) {
        let ticket = self.begin_open();
        let fetched = queries.match_by_id(id).await;
        self.finish_open(ticket, fetched);
    }

    pub fn close(&mut self) {
        self.tracker.invalidate();
        self.loading = false;
        self.current = None;
        self.tab = MatchTab::Overview;
    }

    pub fn available_tabs(&self) -> Vec<MatchTab> {
        self.current.as_ref().map(available_tabs).unwrap_or_default()
    }

    /// Switch tabs; returns false and stays put if `tab` has nothing to show.
    pub fn select_tab(&mut self, tab: MatchTab) -> bool {
        if !self.available_tabs().contains(&tab) {
            return false;
        }
        self.tab = tab;
        true
    }

    pub fn stat_bars(&self) -> Vec<StatBar> {
        match self.current.as_ref() {
            Some(m) => match (m.home_stats(), m.away_stats()) {
                (Some(home), Some(away)) => stat_bars(home, away),
                _ => Vec::new(),
            },
            None => Vec::new(),
        }
    }

    pub fn set_lines(&self) -> Vec<String> {
        self.current
            .as_ref()
            .map(|m| m.set_scores.iter().map(set_line).collect())
            .unwrap_or_default()
    }
}
