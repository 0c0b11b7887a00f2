use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use super::{
    de::{null_as_default, string_or_number, timestamp},
    Team,
};
use crate::{MatchId, TeamId};

/// Lifecycle state of a fixture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    Scheduled,
    Live,
    Completed,
    Unknown,
}

impl MatchStatus {
    /// Badge shown on schedule cards; unknown states get no badge.
    pub fn badge(&self) -> Option<&'static str> {
        match self {
            MatchStatus::Scheduled => Some("Upcoming"),
            MatchStatus::Live => Some("LIVE"),
            MatchStatus::Completed => Some("Final"),
            MatchStatus::Unknown => None,
        }
    }

    /// Whether a score is worth showing.
    pub fn has_score(&self) -> bool {
        matches!(self, MatchStatus::Live | MatchStatus::Completed)
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MatchStatus::Scheduled => "scheduled",
            MatchStatus::Live => "live",
            MatchStatus::Completed => "completed",
            MatchStatus::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}

impl<'de> Deserialize<'de> for MatchStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
        Ok(match raw.trim().to_lowercase().as_str() {
            "scheduled" | "upcoming" => MatchStatus::Scheduled,
            "live" | "in_progress" => MatchStatus::Live,
            "completed" | "final" | "finished" => MatchStatus::Completed,
            _ => MatchStatus::Unknown,
        })
    }
}

/// A fixture with optional embedded teams, per-side statistics and sets.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Match {
    pub id: MatchId,
    pub home_team_id: TeamId,
    pub away_team_id: TeamId,
    #[serde(default)]
    pub home_team_image_url: Option<String>,
    #[serde(default)]
    pub away_team_image_url: Option<String>,
    #[serde(deserialize_with = "timestamp")]
    pub match_date: DateTime<Utc>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub home_score: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub away_score: u32,
    pub status: MatchStatus,
    #[serde(default, deserialize_with = "null_as_default")]
    pub league: String,
    #[serde(default)]
    pub round: Option<String>,
    #[serde(default)]
    pub home_team: Option<Team>,
    #[serde(default)]
    pub away_team: Option<Team>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub statistics: Vec<MatchStatistics>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub set_scores: Vec<SetScore>,
}

impl Match {
    /// Calendar day the match is played on (UTC).
    pub fn match_day(&self) -> NaiveDate {
        self.match_date.date_naive()
    }

    pub fn home_name(&self) -> String {
        team_label(self.home_team.as_ref(), self.home_team_id)
    }

    pub fn away_name(&self) -> String {
        team_label(self.away_team.as_ref(), self.away_team_id)
    }

    pub fn involves(&self, team_id: TeamId) -> bool {
        self.home_team_id == team_id || self.away_team_id == team_id
    }

    pub fn stats_for(&self, team_id: TeamId) -> Option<&MatchStatistics> {
        self.statistics.iter().find(|s| s.team_id == team_id)
    }

    pub fn home_stats(&self) -> Option<&MatchStatistics> {
        self.stats_for(self.home_team_id)
    }

    pub fn away_stats(&self) -> Option<&MatchStatistics> {
        self.stats_for(self.away_team_id)
    }

    /// Both sides must have a statistics row for a head-to-head comparison.
    pub fn has_statistics(&self) -> bool {
        self.home_stats().is_some() && self.away_stats().is_some()
    }

    pub fn has_set_scores(&self) -> bool {
        !self.set_scores.is_empty()
    }

    /// "3 - 1" once the match has started, "vs" before.
    pub fn scoreline(&self) -> String {
        if self.status.has_score() {
            format!("{} - {}", self.home_score, self.away_score)
        } else {
            "vs".to_string()
        }
    }
}

fn team_label(team: Option<&Team>, id: TeamId) -> String {
    match team {
        Some(t) if !t.name.is_empty() => t.name.clone(),
        _ => format!("Team {}", id),
    }
}

/// Box-score aggregates for one side of one match.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MatchStatistics {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub match_id: MatchId,
    pub team_id: TeamId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_points: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub attacks: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub blocks: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub aces: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub errors: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub digs: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub kills: u32,
}

/// Which side took a set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetWinner {
    Home,
    Away,
    Undecided,
}

/// Score of a single set.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SetScore {
    pub id: i64,
    pub match_id: MatchId,
    pub set_number: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub home_score: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub away_score: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub duration_minutes: u32,
}

impl SetScore {
    pub fn winner(&self) -> SetWinner {
        use std::cmp::Ordering;
        match self.home_score.cmp(&self.away_score) {
            Ordering::Greater => SetWinner::Home,
            Ordering::Less => SetWinner::Away,
            Ordering::Equal => SetWinner::Undecided,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_match() -> Match {
        serde_json::from_value(json!({
            "id": 10,
            "home_team_id": 1,
            "away_team_id": 2,
            "match_date": "2024-06-01T18:00:00+00:00",
            "home_score": 3,
            "away_score": 1,
            "status": "completed",
            "league": "EUROPA Cup",
            "home_team": { "id": 1, "name": "Lions", "league": "EUROPA Cup" },
            "away_team": null,
            "statistics": [
                { "id": "a", "match_id": 10, "team_id": 1, "kills": 50 },
                { "id": 7, "match_id": 10, "team_id": 2, "kills": 41 }
            ],
            "set_scores": []
        }))
        .unwrap()
    }

    #[test]
    fn test_missing_relation_falls_back_to_id_label() {
        let m = sample_match();
        assert_eq!(m.home_name(), "Lions");
        assert_eq!(m.away_name(), "Team 2");
    }

    #[test]
    fn test_statistics_lookup_by_side() {
        let m = sample_match();
        assert_eq!(m.home_stats().unwrap().kills, 50);
        assert_eq!(m.away_stats().unwrap().id, "7");
        assert!(m.has_statistics());
        assert!(!m.has_set_scores());
    }

    #[test]
    fn test_unknown_status_is_tolerated() {
        let status: MatchStatus = serde_json::from_value(json!("postponed")).unwrap();
        assert_eq!(status, MatchStatus::Unknown);
        assert_eq!(status.badge(), None);
    }

    #[test]
    fn test_scoreline_hidden_before_start() {
        let mut m = sample_match();
        assert_eq!(m.scoreline(), "3 - 1");
        m.status = MatchStatus::Scheduled;
        assert_eq!(m.scoreline(), "vs");
    }

    #[test]
    fn test_set_winner() {
        let set = SetScore {
            id: 1,
            match_id: MatchId::new(1),
            set_number: 1,
            home_score: 23,
            away_score: 25,
            duration_minutes: 28,
        };
        assert_eq!(set.winner(), SetWinner::Away);
    }
}
