//! Stat column configuration.
//!
//! Which columns each rendered table shows is configuration, not code: a
//! [`StatColumns`] value maps every (domain, category) pair to an ordered
//! list of provider column identifiers. Values are passed down explicitly
//! to the reconciliation layer; nothing reads process-global state.
//!
//! The defaults cover the common sheets out of the box. A TOML file with
//! the same shape overrides them:
//!
//! ```toml
//! [batting]
//! standard = ["season", "gamesPlayed", "avg", "obp", "slg", "ops"]
//! advanced = ["wOBA", "wRC+", "WAR"]
//! splits   = ["Split", "PA", "BA", "OPS"]
//!
//! [pitching]
//! standard = ["W", "L", "ERA", "IP", "SO"]
//! advanced = ["K%", "BB%", "FIP"]
//! splits   = ["Split", "PA", "BA", "OPS"]
//! ```

use crate::domain::{StatCategory, StatDomain};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read stat column file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse stat column config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Ordered column lists for one stat domain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainColumns {
    #[serde(default)]
    pub standard: Vec<String>,
    #[serde(default)]
    pub advanced: Vec<String>,
    #[serde(default)]
    pub splits: Vec<String>,
}

/// Column lists for every (domain, category) pair a sheet can show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatColumns {
    #[serde(default)]
    pub batting: DomainColumns,
    #[serde(default)]
    pub pitching: DomainColumns,
}

impl StatColumns {
    /// Parse a TOML document. Missing tables fall back to empty lists, not
    /// the defaults, so a file that names only `[pitching]` renders batting
    /// tables as absent rather than silently using built-in columns.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&text)
    }

    /// The configured column list for one view. May be empty.
    pub fn columns(&self, domain: StatDomain, category: StatCategory) -> &[String] {
        let side = match domain {
            StatDomain::Batting => &self.batting,
            StatDomain::Pitching => &self.pitching,
        };
        match category {
            StatCategory::Standard => &side.standard,
            StatCategory::Advanced => &side.advanced,
            StatCategory::Splits => &side.splits,
        }
    }
}

fn owned(cols: &[&str]) -> Vec<String> {
    cols.iter().map(|c| (*c).to_string()).collect()
}

impl Default for StatColumns {
    fn default() -> Self {
        Self {
            batting: DomainColumns {
                // Season-entry keys from the league stats API, plus the
                // fields the flattener injects (season, gameType).
                standard: owned(&[
                    "season",
                    "gamesPlayed",
                    "plateAppearances",
                    "atBats",
                    "runs",
                    "hits",
                    "doubles",
                    "triples",
                    "homeRuns",
                    "rbi",
                    "stolenBases",
                    "baseOnBalls",
                    "strikeOuts",
                    "avg",
                    "obp",
                    "slg",
                    "ops",
                ]),
                // Leaderboard column identifiers.
                advanced: owned(&[
                    "PA", "BB%", "K%", "ISO", "BABIP", "wOBA", "wRC+", "EV", "Barrel%",
                    "HardHit%", "WAR",
                ]),
                splits: owned(&[
                    "Split", "G", "PA", "AB", "R", "H", "2B", "HR", "RBI", "BB", "SO", "BA",
                    "OBP", "SLG", "OPS",
                ]),
            },
            pitching: DomainColumns {
                standard: owned(&[
                    "W", "L", "ERA", "G", "GS", "IP", "SO", "WHIP", "BABIP", "LOB%",
                ]),
                advanced: owned(&[
                    "K%", "BB%", "K-BB%", "HR/9", "FIP", "xFIP", "SIERA", "CSW%", "WAR",
                ]),
                splits: owned(&[
                    "Split", "G", "PA", "AB", "H", "HR", "BB", "SO", "BA", "OBP", "SLG", "OPS",
                ]),
            },
        }
    }
}
