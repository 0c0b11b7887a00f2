//! Detail overlays for a single player or match.
//!
//! A modal either reuses an entity the caller already holds or fetches the
//! full record while showing a loading state. Closing drops the entity; a
//! fetch that lands after close, or after a newer open, is ignored.

pub mod match_details;
pub mod player_profile;

pub use match_details::{MatchDetailsModal, StatBar};
pub use player_profile::{ModalState, PlayerProfileModal, Profile};
