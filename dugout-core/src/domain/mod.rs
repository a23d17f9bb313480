//! Domain types for Dugout

pub mod player;
pub mod stat;
pub mod team;

pub use player::Player;
pub use stat::{StatCategory, StatDomain};
pub use team::Team;

/// Season year as providers key it (e.g. 2024).
pub type Season = u16;
