//! Stat domain and category keys used to address configured views.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which side of the game a stat line covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatDomain {
    Batting,
    Pitching,
}

impl StatDomain {
    pub fn as_str(self) -> &'static str {
        match self {
            StatDomain::Batting => "batting",
            StatDomain::Pitching => "pitching",
        }
    }

    /// Stat group name the league stats API expects in query strings.
    pub fn api_group(self) -> &'static str {
        match self {
            StatDomain::Batting => "hitting",
            StatDomain::Pitching => "pitching",
        }
    }
}

impl fmt::Display for StatDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which view of a domain a single table shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatCategory {
    Standard,
    Advanced,
    Splits,
}

impl StatCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            StatCategory::Standard => "standard",
            StatCategory::Advanced => "advanced",
            StatCategory::Splits => "splits",
        }
    }
}

impl fmt::Display for StatCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
