//! Dugout Render — summary-sheet PNG assembly.
//!
//! Turns one player's reconciled season bundle into a fixed-layout sheet:
//! - Grid layout and pixel regions ([`layout`])
//! - Shared palette, fonts, and text fallback ([`style`])
//! - Configured stat tables ([`table`])
//! - Chart and chrome panels ([`panels`])
//! - League reference figures for the comparisons ([`league`])
//! - Sheet data fetch and composition ([`sheet`])
//!
//! Rendering is side-effect free until [`sheet::PitcherSummarySheet::render_to`]
//! or [`sheet::BatterSummarySheet::render_to`] writes the PNG; every panel
//! also renders into an in-memory backend, which is how the tests run.

pub mod layout;
pub mod league;
pub mod panels;
pub mod sheet;
pub mod style;
pub mod table;

pub use layout::{PixelRect, SheetGrid};
pub use league::{LeagueAverages, LeaguePitchLine};
pub use sheet::{
    sheet_filename, BatterSummarySheet, PitcherSummarySheet, SheetData, SheetKind, BATTER_HEIGHT,
    PITCHER_HEIGHT, SHEET_WIDTH,
};
pub use table::StatTable;
