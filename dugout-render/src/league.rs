//! League-wide per-pitch-type reference averages.
//!
//! The breakdown table and the velocity panel compare a pitcher's numbers
//! against precomputed league figures. Those ship as a bundled CSV so a
//! sheet renders without an extra fetch; a season-specific file can be
//! loaded from disk instead.

use polars::prelude::*;
use std::io::Cursor;
use std::path::Path;

const BUNDLED: &str = include_str!("../data/league_pitch_averages.csv");

/// League reference figures for one pitch type.
#[derive(Debug, Clone, PartialEq)]
pub struct LeaguePitchLine {
    pub pitch_name: String,
    pub velocity: f64,
    pub whiff_pct: f64,
    pub zone_pct: f64,
    pub chase_pct: f64,
}

/// One row per pitch-type code: name, average velocity, and whiff, zone,
/// and chase rates in percent.
pub struct LeagueAverages {
    frame: DataFrame,
}

impl LeagueAverages {
    /// The averages shipped with the crate.
    pub fn load_bundled() -> PolarsResult<Self> {
        Self::read(BUNDLED.as_bytes())
    }

    /// Averages from a CSV with the bundled file's columns.
    pub fn from_path(path: &Path) -> PolarsResult<Self> {
        let bytes = std::fs::read(path)?;
        Self::read(&bytes)
    }

    fn read(bytes: &[u8]) -> PolarsResult<Self> {
        let frame = CsvReadOptions::default()
            .with_has_header(true)
            .into_reader_with_file_handle(Cursor::new(bytes))
            .finish()?;
        Ok(Self { frame })
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    /// The reference line for one pitch-type code, `None` for codes the
    /// table does not carry.
    pub fn for_pitch(&self, pitch_type: &str) -> Option<LeaguePitchLine> {
        let codes = self.frame.column("pitch_type").ok()?.str().ok()?;
        let row = codes
            .into_iter()
            .position(|code| code == Some(pitch_type))?;
        Some(LeaguePitchLine {
            pitch_name: self.str_at("pitch_name", row)?,
            velocity: self.f64_at("avg_velocity", row)?,
            whiff_pct: self.f64_at("whiff_pct", row)?,
            zone_pct: self.f64_at("zone_pct", row)?,
            chase_pct: self.f64_at("chase_pct", row)?,
        })
    }

    /// Human-readable name for a pitch-type code, falling back to the code
    /// itself.
    pub fn display_name(&self, pitch_type: &str) -> String {
        self.for_pitch(pitch_type)
            .map(|line| line.pitch_name)
            .unwrap_or_else(|| pitch_type.to_string())
    }

    fn f64_at(&self, column: &str, row: usize) -> Option<f64> {
        self.frame.column(column).ok()?.f64().ok()?.get(row)
    }

    fn str_at(&self, column: &str, row: usize) -> Option<String> {
        Some(self.frame.column(column).ok()?.str().ok()?.get(row)?.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_table_loads_and_covers_the_fastball() {
        let league = LeagueAverages::load_bundled().unwrap();
        let ff = league.for_pitch("FF").unwrap();
        assert_eq!(ff.pitch_name, "4-Seam Fastball");
        assert!(ff.velocity > 90.0 && ff.velocity < 100.0);
        assert!(ff.zone_pct > ff.chase_pct);
    }

    #[test]
    fn unknown_code_has_no_line() {
        let league = LeagueAverages::load_bundled().unwrap();
        assert!(league.for_pitch("XX").is_none());
        assert_eq!(league.display_name("XX"), "XX");
    }

    #[test]
    fn display_name_prefers_the_table() {
        let league = LeagueAverages::load_bundled().unwrap();
        assert_eq!(league.display_name("SL"), "Slider");
    }
}
