use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use super::de::null_as_default;
use crate::TeamId;

/// Outcome letter shown in the "last 5" strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FormResult {
    #[serde(rename = "W")]
    Win,
    #[serde(rename = "L")]
    Loss,
    #[serde(rename = "D")]
    Other,
}

impl fmt::Display for FormResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FormResult::Win => "W",
            FormResult::Loss => "L",
            FormResult::Other => "D",
        };
        write!(f, "{}", s)
    }
}

impl<'de> Deserialize<'de> for FormResult {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
        Ok(match raw.trim().to_uppercase().as_str() {
            "W" | "WIN" => FormResult::Win,
            "L" | "LOSS" => FormResult::Loss,
            _ => FormResult::Other,
        })
    }
}

/// One historical result row from `team_performance`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TeamPerformance {
    pub id: i64,
    pub team_id: TeamId,
    #[serde(default)]
    pub season: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub match_date: String,
    #[serde(default)]
    pub opponent_id: Option<TeamId>,
    pub result: FormResult,
    #[serde(default, deserialize_with = "null_as_default")]
    pub points_scored: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub points_conceded: u32,
}

impl TeamPerformance {
    /// Hover text for a form chip, e.g. "vs Team 4: 75-68".
    pub fn summary(&self) -> String {
        let opponent = self
            .opponent_id
            .map_or_else(|| "?".to_string(), |id| id.to_string());
        format!(
            "vs Team {}: {}-{}",
            opponent, self.points_scored, self.points_conceded
        )
    }
}

/// Number of chips in the form strip.
pub const FORM_STRIP_LEN: usize = 5;

/// Render the most recent results as a fixed-width strip, padded with "-".
pub fn form_strip(recent: &[TeamPerformance]) -> String {
    let mut chips: Vec<String> = recent
        .iter()
        .take(FORM_STRIP_LEN)
        .map(|p| p.result.to_string())
        .collect();
    chips.resize(FORM_STRIP_LEN, "-".to_string());
    chips.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn perf(result: &str) -> TeamPerformance {
        serde_json::from_value(json!({
            "id": 1,
            "team_id": 1,
            "match_date": "2024-06-01",
            "opponent_id": 4,
            "result": result,
            "points_scored": 75,
            "points_conceded": 68
        }))
        .unwrap()
    }

    #[test]
    fn test_form_strip_pads_to_five() {
        let recent = vec![perf("W"), perf("L")];
        assert_eq!(form_strip(&recent), "W L - - -");
        assert_eq!(form_strip(&[]), "- - - - -");
    }

    #[test]
    fn test_form_strip_truncates_long_history() {
        let recent: Vec<_> = (0..7).map(|_| perf("w")).collect();
        assert_eq!(form_strip(&recent), "W W W W W");
    }

    #[test]
    fn test_unrecognised_result_is_other() {
        assert_eq!(perf("T").result, FormResult::Other);
    }

    #[test]
    fn test_summary() {
        assert_eq!(perf("W").summary(), "vs Team 4: 75-68");
    }
}
