//! Team identity and display fields.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A club, keyed by the league stats API team id.
///
/// Constructed by copying fields out of a provider team record so the
/// domain type never borrows from a response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub team_id: u32,
    pub name: String,
    pub abbreviation: String,
}

impl Team {
    pub fn new(team_id: u32, name: impl Into<String>, abbreviation: impl Into<String>) -> Self {
        Self {
            team_id,
            name: name.into(),
            abbreviation: abbreviation.into(),
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.abbreviation)
    }
}
