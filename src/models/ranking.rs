use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use super::{de::null_as_default, Player};
use crate::{PlayerId, Position};

/// Direction a team or player is moving.
///
/// The backend mixes representations: `team_statistics.trend` holds
/// `"up"`/`"down"` while ranking rows carry numeric codes (`1`, `-1`, `0`,
/// or a signed rank delta). Every form collapses to this enum on
/// deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    #[default]
    Flat,
}

impl Trend {
    pub fn from_code(code: f64) -> Self {
        if code > 0.0 {
            Trend::Up
        } else if code < 0.0 {
            Trend::Down
        } else {
            Trend::Flat
        }
    }

    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "up" | "rising" => Trend::Up,
            "down" | "falling" => Trend::Down,
            other => other.parse::<f64>().map(Trend::from_code).unwrap_or(Trend::Flat),
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            Trend::Up => "▲",
            Trend::Down => "▼",
            Trend::Flat => "–",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Trend::Up => "up",
            Trend::Down => "down",
            Trend::Flat => "flat",
        };
        write!(f, "{}", s)
    }
}

impl<'de> Deserialize<'de> for Trend {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Label(String),
            Code(f64),
        }

        Ok(match Option::<Raw>::deserialize(deserializer)? {
            Some(Raw::Label(label)) => Trend::from_label(&label),
            Some(Raw::Code(code)) => Trend::from_code(code),
            None => Trend::Flat,
        })
    }
}

/// Podium placement for the top three overall ranks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Medal {
    Gold,
    Silver,
    Bronze,
}

impl Medal {
    pub fn for_rank(rank: u32) -> Option<Self> {
        match rank {
            1 => Some(Medal::Gold),
            2 => Some(Medal::Silver),
            3 => Some(Medal::Bronze),
            _ => None,
        }
    }
}

impl fmt::Display for Medal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Medal::Gold => "🥇",
            Medal::Silver => "🥈",
            Medal::Bronze => "🥉",
        };
        write!(f, "{}", s)
    }
}

/// Pre-computed ranking row from `player_rankings`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PlayerRanking {
    pub id: i64,
    pub player_id: PlayerId,
    #[serde(default)]
    pub position: Position,
    #[serde(default, deserialize_with = "null_as_default")]
    pub overall_rank: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub position_rank: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub league_rank: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_score: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub efficiency: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub form_rating: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub consistency: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub peak_performance: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rank_change: i32,
    #[serde(default)]
    pub form_trend: Trend,
    #[serde(default)]
    pub last_updated: Option<String>,
    #[serde(default)]
    pub player: Option<Player>,
}

impl PlayerRanking {
    pub fn medal(&self) -> Option<Medal> {
        Medal::for_rank(self.overall_rank)
    }

    pub fn player_name(&self) -> &str {
        self.player.as_ref().map_or("Unknown Player", |p| p.display_name())
    }

    pub fn team_name(&self) -> Option<&str> {
        self.player
            .as_ref()
            .and_then(|p| p.team.as_ref())
            .map(|t| t.name.as_str())
    }

    pub fn league(&self) -> Option<&str> {
        self.player.as_ref().and_then(|p| p.league())
    }

    pub fn nationality(&self) -> Option<&str> {
        self.player
            .as_ref()
            .and_then(|p| p.nationality.as_deref())
            .filter(|n| !n.is_empty())
    }

    pub fn age_or_zero(&self) -> u32 {
        self.player.as_ref().map_or(0, |p| p.age_or_zero())
    }
}
