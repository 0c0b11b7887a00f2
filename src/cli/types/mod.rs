//! Type-safe wrappers and enums for league data.

pub mod filters;
pub mod ids;
pub mod position;

pub use filters::{AgeBucket, MatchTab, SortDirection, SortField, StatusFilter};
pub use ids::{MatchId, PlayerId, TeamId};
pub use position::Position;
