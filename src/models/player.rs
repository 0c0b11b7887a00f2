use serde::{Deserialize, Serialize};

use super::{de::null_as_default, Team};
use crate::{PlayerId, Position, TeamId};

/// A player with optional embedded team and stats history.
///
/// `team` is `None` both for free agents and for queries that did not embed
/// the relation; renderers fall back to "Free Agent" in either case.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Player {
    pub id: PlayerId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub position: Position,
    #[serde(default)]
    pub team_id: Option<TeamId>,
    #[serde(default)]
    pub nationality: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub height: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub team: Option<Team>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub stats: Vec<PlayerStats>,
}

impl Player {
    /// The current season's stats: by convention the first embedded record.
    pub fn current_stats(&self) -> Option<&PlayerStats> {
        self.stats.first()
    }

    pub fn team_name(&self) -> &str {
        self.team.as_ref().map_or("Free Agent", |t| t.name.as_str())
    }

    pub fn league(&self) -> Option<&str> {
        self.team
            .as_ref()
            .map(|t| t.league.as_str())
            .filter(|l| !l.is_empty())
    }

    pub fn nationality_or_unknown(&self) -> &str {
        self.nationality
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or("Unknown")
    }

    /// Age used for bracket filtering; a missing age counts as zero.
    pub fn age_or_zero(&self) -> u32 {
        self.age.unwrap_or(0)
    }

    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            "Unknown Player"
        } else {
            &self.name
        }
    }

    /// Up to two uppercase initials, "??" for a blank name.
    pub fn initials(&self) -> String {
        let initials: String = self
            .name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .take(2)
            .flat_map(char::to_uppercase)
            .collect();
        if initials.is_empty() {
            "??".to_string()
        } else {
            initials
        }
    }
}

/// One season of counting stats and ratings from `player_stats`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct PlayerStats {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub player_id: i64,
    #[serde(default)]
    pub season: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub points: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub blocks: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub aces: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub digs: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub matches_played: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub attack_percentage: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub attack_efficiency: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub serve_effectiveness: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub reception_quality: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub block_efficiency: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub defense_rating: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub form_rating: f64,
}

/// Width of a percentage bar, clamped to `0.0..=100.0`.
pub fn bar_percent(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}
