//! Entity field contracts for rows served by the backend.
//!
//! Every entity is a read-only copy: the client never writes back. Embedded
//! relations (`team`, `stats`, `statistics`, `set_scores`, ...) are explicit
//! `Option`/`Vec` fields that stay empty when a query did not ask for them.

pub mod de;
mod matches;
mod performance;
mod player;
mod ranking;
mod team;

pub use matches::{Match, MatchStatistics, MatchStatus, SetScore, SetWinner};
pub use performance::{form_strip, FormResult, TeamPerformance, FORM_STRIP_LEN};
pub use player::{bar_percent, Player, PlayerStats};
pub use ranking::{Medal, PlayerRanking, Trend};
pub use team::{Team, TeamStatistics};
