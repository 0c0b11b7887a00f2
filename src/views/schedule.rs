//! Match schedule grouped by calendar day.

use chrono::NaiveDate;
use indexmap::IndexMap;

use super::{accept, filter, LoadTicket, RequestTracker, Showing};
use crate::{
    cli::types::StatusFilter,
    models::{Match, MatchStatus},
    queries::LeagueQueries,
};

/// Whether a match status passes the status filter.
pub fn status_matches(filter: StatusFilter, status: MatchStatus) -> bool {
    matches!(
        (filter, status),
        (StatusFilter::Scheduled, MatchStatus::Scheduled)
            | (StatusFilter::Live, MatchStatus::Live)
            | (StatusFilter::Completed, MatchStatus::Completed)
    )
}

/// "1 match" / "N matches".
pub fn match_count_label(n: usize) -> String {
    if n == 1 {
        "1 match".to_string()
    } else {
        format!("{} matches", n)
    }
}

#[derive(Debug, Default)]
pub struct Schedule {
    matches: Vec<Match>,
    league: Option<String>,
    status: Option<StatusFilter>,
    loading: bool,
    tracker: RequestTracker,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn load(&mut self, queries: &LeagueQueries) {
        let ticket = self.begin_load();
        let matches = queries.matches().await;
        self.finish_load(ticket, matches);
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.loading = true;
        self.tracker.begin()
    }

    pub fn finish_load(&mut self, ticket: LoadTicket, matches: Vec<Match>) -> bool {
        if !accept(&self.tracker, ticket, "schedule") {
            return false;
        }
        self.matches = matches;
        self.loading = false;
        true
    }

    /// Full replacement from a subscription push.
    pub fn apply_push(&mut self, matches: Vec<Match>) {
        self.tracker.invalidate();
        self.matches = matches;
        self.loading = false;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn set_league(&mut self, league: &str) {
        self.league = filter::choice(league);
    }

    pub fn set_status(&mut self, status: Option<StatusFilter>) {
        self.status = status;
    }

    pub fn leagues(&self) -> Vec<String> {
        filter::distinct(&self.matches, |m| Some(m.league.as_str()))
    }

    pub fn visible(&self) -> Vec<&Match> {
        self.matches
            .iter()
            .filter(|m| filter::matches_choice(self.league.as_deref(), Some(m.league.as_str())))
            .filter(|m| self.status.map_or(true, |s| status_matches(s, m.status)))
            .collect()
    }

    /// Visible matches by UTC calendar day, days in kick-off order.
    pub fn by_day(&self) -> IndexMap<NaiveDate, Vec<&Match>> {
        filter::group_by(self.visible(), |m| m.match_day())
    }

    pub fn showing(&self) -> Showing {
        Showing::new(self.visible().len(), self.matches.len(), "matches")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fixture_matches() -> Vec<Match> {
        serde_json::from_value(json!([
            { "id": 1, "home_team_id": 1, "away_team_id": 2, "match_date": "2024-06-01T18:00:00Z", "status": "completed", "league": "EUROPA Cup" },
            { "id": 2, "home_team_id": 3, "away_team_id": 4, "match_date": "2024-06-01T20:00:00Z", "status": "completed", "league": "ASIA Cup" },
            { "id": 4, "home_team_id": 4, "away_team_id": 3, "match_date": "2024-06-08T12:00:00Z", "status": "live", "league": "ASIA Cup" },
            { "id": 3, "home_team_id": 2, "away_team_id": 1, "match_date": "2024-06-08T18:00:00Z", "status": "scheduled", "league": "EUROPA Cup" }
        ]))
        .unwrap()
    }

    fn fixture() -> Schedule {
        let mut schedule = Schedule::new();
        let ticket = schedule.begin_load();
        schedule.finish_load(ticket, fixture_matches());
        schedule
    }

    #[test]
    fn test_four_matches_on_two_days_make_two_groups() {
        let schedule = fixture();
        let days = schedule.by_day();
        assert_eq!(days.len(), 2);
        assert_eq!(days.values().map(Vec::len).sum::<usize>(), 4);

        let first = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert_eq!(days.keys().next(), Some(&first));
        assert_eq!(match_count_label(days[&first].len()), "2 matches");
    }

    #[test]
    fn test_status_and_league_filters() {
        let mut schedule = fixture();
        schedule.set_status(Some(StatusFilter::Completed));
        assert_eq!(schedule.visible().len(), 2);

        schedule.set_league("ASIA Cup");
        let ids: Vec<i64> = schedule.visible().iter().map(|m| m.id.as_i64()).collect();
        assert_eq!(ids, vec![2]);
        assert_eq!(match_count_label(schedule.by_day()[0].len()), "1 match");

        schedule.set_status(Some(StatusFilter::Scheduled));
        assert!(schedule.showing().is_empty());
        assert!(schedule.by_day().is_empty());
    }

    #[test]
    fn test_leagues_in_first_appearance_order() {
        assert_eq!(fixture().leagues(), vec!["EUROPA Cup", "ASIA Cup"]);
    }

    #[test]
    fn test_push_replaces_collection() {
        let mut schedule = fixture();
        let mut pushed = fixture_matches();
        pushed.truncate(1);
        schedule.apply_push(pushed);
        assert_eq!(schedule.showing().total, 1);
    }

    #[test]
    fn test_unknown_status_never_matches_a_filter() {
        for filter in [StatusFilter::Scheduled, StatusFilter::Live, StatusFilter::Completed] {
            assert!(!status_matches(filter, MatchStatus::Unknown));
        }
    }
}
