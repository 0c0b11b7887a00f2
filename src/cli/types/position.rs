//! Volleyball position types and utilities.

use crate::error::LeagueError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Volleyball playing positions.
///
/// The backend stores positions as display strings ("Outside Hitter").
/// Anything outside the fixed set deserializes to [`Position::Unknown`] so a
/// single odd row never empties a whole roster.
///
/// # Examples
///
/// ```rust
/// use volley_league::Position;
///
/// let setter: Position = "setter".parse().unwrap();
/// assert_eq!(setter, Position::Setter);
/// assert_eq!(Position::MiddleBlocker.to_string(), "Middle Blocker");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Position {
    OutsideHitter,
    Setter,
    MiddleBlocker,
    Libero,
    OppositeHitter,
    Unknown,
}

impl Position {
    /// Known positions in roster display order.
    pub const ALL: [Position; 5] = [
        Position::OutsideHitter,
        Position::Setter,
        Position::MiddleBlocker,
        Position::Libero,
        Position::OppositeHitter,
    ];

    /// Three-letter badge used on ranking cards.
    pub fn short_code(&self) -> &'static str {
        match self {
            Position::OutsideHitter => "Out",
            Position::Setter => "Set",
            Position::MiddleBlocker => "Mid",
            Position::Libero => "Lib",
            Position::OppositeHitter => "Opp",
            Position::Unknown => "N/A",
        }
    }

    /// Index into [`Position::ALL`]; unknown positions sort last.
    pub fn display_rank(&self) -> usize {
        Self::ALL
            .iter()
            .position(|p| p == self)
            .unwrap_or(Self::ALL.len())
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::Unknown
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Position::OutsideHitter => "Outside Hitter",
            Position::Setter => "Setter",
            Position::MiddleBlocker => "Middle Blocker",
            Position::Libero => "Libero",
            Position::OppositeHitter => "Opposite Hitter",
            Position::Unknown => "Unknown",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Position {
    type Err = LeagueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();

        match normalized.as_str() {
            "outsidehitter" | "outside" | "oh" => Ok(Position::OutsideHitter),
            "setter" | "s" => Ok(Position::Setter),
            "middleblocker" | "middle" | "mb" => Ok(Position::MiddleBlocker),
            "libero" | "l" => Ok(Position::Libero),
            "oppositehitter" | "opposite" | "opp" => Ok(Position::OppositeHitter),
            _ => Err(LeagueError::InvalidPosition {
                position: s.to_string(),
            }),
        }
    }
}

impl Serialize for Position {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Position {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw
            .and_then(|s| s.parse().ok())
            .unwrap_or(Position::Unknown))
    }
}
