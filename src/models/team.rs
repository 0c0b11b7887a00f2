use serde::{Deserialize, Serialize};

use super::{de::null_as_default, Trend};
use crate::TeamId;

/// A club as stored in the `teams` table.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub league: String,
    #[serde(default)]
    pub primary_color: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub wins: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub losses: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub championships: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ranking: u32,
    #[serde(default)]
    pub founded: Option<i32>,
    /// Season aggregates; only present when the query embeds `statistics`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub statistics: Vec<TeamStatistics>,
}

impl Team {
    pub fn games_played(&self) -> u32 {
        self.wins + self.losses
    }

    /// "W-L" record string.
    pub fn record(&self) -> String {
        format!("{}-{}", self.wins, self.losses)
    }

    /// Table points: three for a win, one for a loss.
    pub fn league_points(&self) -> u32 {
        self.wins * 3 + self.losses
    }

    /// Win percentage in `0.0..=100.0`; zero when no games were played.
    pub fn win_percentage(&self) -> f64 {
        match self.games_played() {
            0 => 0.0,
            games => f64::from(self.wins) / f64::from(games) * 100.0,
        }
    }

    pub fn city_or_unknown(&self) -> &str {
        self.city.as_deref().unwrap_or("Unknown")
    }

    /// Trend from the current statistics row, else derived from the win
    /// rate: above 60% is up, below 40% is down.
    pub fn trend(&self) -> Trend {
        match self.statistics.first() {
            Some(stats) => stats.trend,
            None if self.games_played() == 0 => Trend::Flat,
            None if self.win_percentage() > 60.0 => Trend::Up,
            None if self.win_percentage() < 40.0 => Trend::Down,
            None => Trend::Flat,
        }
    }
}

/// Per-season aggregates from `team_statistics`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TeamStatistics {
    pub id: i64,
    pub team_id: TeamId,
    #[serde(default)]
    pub season: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub matches_played: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub wins: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub losses: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub points_for: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub points_against: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub win_streak: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub loss_streak: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub form_points: f64,
    #[serde(default)]
    pub trend: Trend,
    #[serde(default)]
    pub last_updated: Option<String>,
}
