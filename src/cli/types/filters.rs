//! Filter and sort selections shared by the CLI and the view models.

use std::fmt;

/// Age bracket filter on the player rankings page.
///
/// Boundaries are inclusive on the prime bracket: 25 and 30 are both prime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum AgeBucket {
    /// Under 25
    Young,
    /// 25 through 30
    Prime,
    /// Over 30
    Veteran,
}

impl AgeBucket {
    pub fn contains(&self, age: u32) -> bool {
        match self {
            AgeBucket::Young => age < 25,
            AgeBucket::Prime => (25..=30).contains(&age),
            AgeBucket::Veteran => age > 30,
        }
    }
}

impl fmt::Display for AgeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AgeBucket::Young => "Young (<25)",
            AgeBucket::Prime => "Prime (25-30)",
            AgeBucket::Veteran => "Veteran (>30)",
        };
        write!(f, "{}", s)
    }
}

/// Column the standings table is sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SortField {
    Ranking,
    Wins,
    Losses,
    Points,
    WinPercentage,
}

impl SortField {
    /// Direction a column starts in when first selected.
    ///
    /// Rank reads best-first ascending; every performance metric reads
    /// best-first descending.
    pub fn default_direction(&self) -> SortDirection {
        match self {
            SortField::Ranking => SortDirection::Asc,
            _ => SortDirection::Desc,
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SortField::Ranking => "Ranking",
            SortField::Wins => "Wins",
            SortField::Losses => "Losses",
            SortField::Points => "Points",
            SortField::WinPercentage => "Win %",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(&self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SortDirection::Asc => "Lowest first",
            SortDirection::Desc => "Highest first",
        };
        write!(f, "{}", s)
    }
}

/// Status filter on the schedule page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum StatusFilter {
    /// Upcoming matches
    Scheduled,
    Live,
    Completed,
}

/// Detail tab of the match modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum MatchTab {
    #[default]
    Overview,
    Statistics,
    Sets,
}

impl fmt::Display for MatchTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MatchTab::Overview => "Overview",
            MatchTab::Statistics => "Statistics",
            MatchTab::Sets => "Set Scores",
        };
        write!(f, "{}", s)
    }
}
