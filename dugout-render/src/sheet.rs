//! Sheet assembly: fetch one player's season bundle, then paint the PNG.
//!
//! A sheet is a fixed grid of regions. Identity chrome sits on top, the
//! three configured stat tables fill the middle, and pitcher sheets add a
//! chart row (velocity, usage, movement) plus the per-pitch breakdown
//! table. Regions whose data is absent stay blank; the sheet itself only
//! fails on backend draw or filesystem errors.

use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use image::DynamicImage;
use plotters::coord::Shift;
use plotters::prelude::*;
use polars::prelude::DataFrame;
use tracing::{debug, info, warn};

use dugout_core::client::UnifiedDataClient;
use dugout_core::config::StatColumns;
use dugout_core::domain::{Player, Season, StatCategory, StatDomain, Team};
use dugout_core::pitch_metrics;
use dugout_core::providers::PersonRecord;
use dugout_core::reconcile::{select_configured, Reconciler, SliceOutcome, StatViews};

use crate::layout::SheetGrid;
use crate::league::LeagueAverages;
use crate::panels::chrome;
use crate::panels::{BreakdownPanel, MovementPanel, UsagePanel, VelocityPanel};
use crate::style::{centered_font, try_text, RULE};
use crate::table::StatTable;

/// Canvas width shared by both sheet kinds.
pub const SHEET_WIDTH: u32 = 1700;
/// Pitcher canvas height; tall enough for the chart and breakdown rows.
pub const PITCHER_HEIGHT: u32 = 2200;
/// Batter canvas height; identity, tables, and footer only.
pub const BATTER_HEIGHT: u32 = 1080;

/// Trailing games in the rolling usage window.
const USAGE_WINDOW: usize = 5;
/// Height of the caption band above each chart region.
const CAPTION_BAND: i32 = 22;

/// Narrow gutters, six equal content columns.
const COL_RATIOS: [f64; 8] = [1.0, 18.0, 18.0, 18.0, 18.0, 18.0, 18.0, 1.0];
/// Header, identity, three tables, divider, charts, breakdown, spacer,
/// footer.
const PITCHER_ROW_RATIOS: [f64; 10] =
    [2.0, 20.0, 9.0, 9.0, 18.0, 0.25, 36.0, 36.0, 2.0, 10.0];
/// Header, identity, three tables, spacer, footer.
const BATTER_ROW_RATIOS: [f64; 7] = [2.0, 20.0, 9.0, 9.0, 18.0, 2.0, 10.0];

/// Which side of the game a sheet covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetKind {
    Pitcher,
    Batter,
}

impl SheetKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SheetKind::Pitcher => "pitcher",
            SheetKind::Batter => "batter",
        }
    }

    pub fn domain(self) -> StatDomain {
        match self {
            SheetKind::Pitcher => StatDomain::Pitching,
            SheetKind::Batter => StatDomain::Batting,
        }
    }

    fn subtitle(self, season: Season) -> String {
        match self {
            SheetKind::Pitcher => format!("{season} Pitching Summary"),
            SheetKind::Batter => format!("{season} Batting Summary"),
        }
    }
}

/// `<slug>_<season>_<kind>.png`
pub fn sheet_filename(player: &Player, season: Season, kind: SheetKind) -> String {
    format!("{}_{}_{}.png", player.slug(), season, kind.as_str())
}

/// Everything one sheet needs, fetched up front so rendering never
/// touches a provider.
pub struct SheetData {
    pub player: Player,
    pub season: Season,
    pub kind: SheetKind,
    pub views: StatViews,
    pub bio: Option<PersonRecord>,
    pub team: Option<Team>,
    pub events: Option<DataFrame>,
    pub headshot: Option<DynamicImage>,
    pub logo: Option<DynamicImage>,
    /// Set by callers running against the offline sample sources; the
    /// footer then says so instead of citing real providers.
    pub synthetic: bool,
}

impl SheetData {
    /// Fetch the bundle for one player season. The stat views are
    /// required; bio, team, events, and images degrade to `None`.
    pub fn fetch(
        client: &UnifiedDataClient,
        mut player: Player,
        season: Season,
        kind: SheetKind,
        columns: &StatColumns,
    ) -> Result<Self> {
        let views = Reconciler::new(client, columns)
            .player_views(&mut player, season, kind.domain())
            .with_context(|| format!("stat views for {} season {season}", player.full_name))?;

        let bio = match client.person(player.mlbam_id) {
            Ok(person) => Some(person),
            Err(err) => {
                warn!(player = %player, %err, "bio unavailable");
                None
            }
        };
        let team = bio
            .as_ref()
            .and_then(|person| person.current_team_id)
            .and_then(|team_id| match client.team(team_id) {
                Ok(team) => Some(team),
                Err(err) => {
                    warn!(team_id, %err, "team record unavailable");
                    None
                }
            });
        let events = match kind {
            SheetKind::Pitcher => {
                match client.pitcher_events_for_season(player.mlbam_id, season) {
                    Ok(df) if df.height() > 0 => Some(df),
                    Ok(_) => {
                        debug!(player = %player, "no pitch events this season");
                        None
                    }
                    Err(err) => {
                        warn!(player = %player, %err, "pitch events unavailable");
                        None
                    }
                }
            }
            SheetKind::Batter => None,
        };
        let headshot = match client.headshot(player.mlbam_id) {
            Ok(image) => Some(image),
            Err(err) => {
                debug!(player = %player, %err, "headshot unavailable");
                None
            }
        };
        let logo = team.as_ref().and_then(|team| match client.team_logo(team.team_id) {
            Ok(image) => Some(image),
            Err(err) => {
                debug!(team = %team, %err, "logo unavailable");
                None
            }
        });

        Ok(Self {
            player,
            season,
            kind,
            views,
            bio,
            team,
            events,
            headshot,
            logo,
            synthetic: false,
        })
    }
}

pub struct PitcherSummarySheet<'a> {
    data: &'a SheetData,
    league: &'a LeagueAverages,
    columns: &'a StatColumns,
}

impl<'a> PitcherSummarySheet<'a> {
    pub fn new(data: &'a SheetData, league: &'a LeagueAverages, columns: &'a StatColumns) -> Self {
        Self {
            data,
            league,
            columns,
        }
    }

    /// Render the sheet into `out_dir` and return the PNG path.
    pub fn render_to(&self, out_dir: &Path) -> Result<PathBuf> {
        let path = prepare_output(out_dir, &self.data.player, self.data.season, SheetKind::Pitcher)?;
        {
            let root =
                BitMapBackend::new(&path, (SHEET_WIDTH, PITCHER_HEIGHT)).into_drawing_area();
            self.render_on(&root)?;
            root.present()
                .with_context(|| format!("write {}", path.display()))?;
        }
        info!(player = %self.data.player, path = %path.display(), "pitcher sheet rendered");
        Ok(path)
    }

    /// Paint the full sheet onto an existing drawing area.
    pub fn render_on<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<()> {
        root.fill(&WHITE).map_err(|e| anyhow!("sheet background: {e}"))?;
        let (width, height) = root.dim_in_pixel();
        let grid = SheetGrid::new(width, height, &COL_RATIOS, &PITCHER_ROW_RATIOS);
        let at = |rows: Range<usize>, cols: Range<usize>| {
            let r = grid.region(rows, cols);
            root.clone().shrink((r.x0, r.y0), (r.width(), r.height()))
        };

        draw_identity(&at, self.data)?;
        stat_table(&at(2..3, 1..7), &self.data.views.standard, "Standard Pitching")?;
        stat_table(&at(3..4, 1..7), &self.data.views.advanced, "Advanced Pitching")?;
        splits_table(&at(4..5, 1..7), self.data, self.columns)?;

        at(5..6, 0..8)
            .fill(&RULE)
            .map_err(|e| anyhow!("divider: {e}"))?;

        if let Some(events) = &self.data.events {
            let body = captioned(at(6..7, 1..3), "Velocity Distribution");
            VelocityPanel::new(events, self.league).render(&body)?;
            let body = captioned(at(6..7, 3..5), "Pitch Usage");
            UsagePanel::new(events, USAGE_WINDOW).render(&body)?;
            match pitch_metrics::annotate(events.clone()) {
                Ok(annotated) => {
                    let body = captioned(at(6..7, 5..7), "Pitch Movement");
                    MovementPanel::new(&annotated).render(&body)?;
                    BreakdownPanel::new(&annotated, self.league).render(&at(7..8, 1..7))?;
                }
                Err(err) => debug!(%err, "movement and breakdown skipped"),
            }
        } else {
            debug!("no pitch events, chart rows left empty");
        }

        chrome::draw_footer(&at(9..10, 0..8), self.data.synthetic)?;
        Ok(())
    }
}

pub struct BatterSummarySheet<'a> {
    data: &'a SheetData,
    columns: &'a StatColumns,
}

impl<'a> BatterSummarySheet<'a> {
    pub fn new(data: &'a SheetData, columns: &'a StatColumns) -> Self {
        Self { data, columns }
    }

    /// Render the sheet into `out_dir` and return the PNG path.
    pub fn render_to(&self, out_dir: &Path) -> Result<PathBuf> {
        let path = prepare_output(out_dir, &self.data.player, self.data.season, SheetKind::Batter)?;
        {
            let root = BitMapBackend::new(&path, (SHEET_WIDTH, BATTER_HEIGHT)).into_drawing_area();
            self.render_on(&root)?;
            root.present()
                .with_context(|| format!("write {}", path.display()))?;
        }
        info!(player = %self.data.player, path = %path.display(), "batter sheet rendered");
        Ok(path)
    }

    /// Paint the full sheet onto an existing drawing area.
    pub fn render_on<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<()> {
        root.fill(&WHITE).map_err(|e| anyhow!("sheet background: {e}"))?;
        let (width, height) = root.dim_in_pixel();
        let grid = SheetGrid::new(width, height, &COL_RATIOS, &BATTER_ROW_RATIOS);
        let at = |rows: Range<usize>, cols: Range<usize>| {
            let r = grid.region(rows, cols);
            root.clone().shrink((r.x0, r.y0), (r.width(), r.height()))
        };

        draw_identity(&at, self.data)?;
        stat_table(&at(2..3, 1..7), &self.data.views.standard, "Standard Batting")?;
        stat_table(&at(3..4, 1..7), &self.data.views.advanced, "Advanced Batting")?;
        splits_table(&at(4..5, 1..7), self.data, self.columns)?;

        chrome::draw_footer(&at(6..7, 0..8), self.data.synthetic)?;
        Ok(())
    }
}

fn prepare_output(
    out_dir: &Path,
    player: &Player,
    season: Season,
    kind: SheetKind,
) -> Result<PathBuf> {
    fs::create_dir_all(out_dir).with_context(|| format!("create {}", out_dir.display()))?;
    Ok(out_dir.join(sheet_filename(player, season, kind)))
}

/// Header band plus the headshot, bio, and logo blocks.
fn draw_identity<DB, F>(at: &F, data: &SheetData) -> Result<()>
where
    DB: DrawingBackend,
    F: Fn(Range<usize>, Range<usize>) -> DrawingArea<DB, Shift>,
{
    chrome::draw_header(
        &at(0..1, 0..8),
        &data.player,
        &data.kind.subtitle(data.season),
    );
    chrome::draw_image(&at(1..2, 1..3), data.headshot.as_ref())?;
    chrome::draw_bio(
        &at(1..2, 3..5),
        &chrome::bio_lines(&data.player, data.bio.as_ref(), data.team.as_ref()),
    );
    chrome::draw_image(&at(1..2, 5..7), data.logo.as_ref())?;
    Ok(())
}

/// Render a reconciled view, or leave its region blank when absent.
fn stat_table<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    outcome: &SliceOutcome,
    title: &str,
) -> Result<()> {
    match outcome {
        SliceOutcome::Table(df) => StatTable::new(df, title).render(area),
        SliceOutcome::Absent(reason) => {
            debug!(title, ?reason, "table absent");
            Ok(())
        }
    }
}

/// Splits come back from the provider unprojected; apply the configured
/// column list here so rendering decides what the table shows.
fn splits_table<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    data: &SheetData,
    columns: &StatColumns,
) -> Result<()> {
    let configured = columns.columns(data.kind.domain(), StatCategory::Splits);
    let SliceOutcome::Table(full) = &data.views.splits else {
        debug!("splits table absent");
        return Ok(());
    };
    match select_configured(full, configured)? {
        SliceOutcome::Table(projected) => StatTable::new(&projected, "Splits").render(area),
        SliceOutcome::Absent(reason) => {
            debug!(?reason, "splits table absent");
            Ok(())
        }
    }
}

/// Split a caption band off the top of a chart region and label it.
fn captioned<DB: DrawingBackend>(
    area: DrawingArea<DB, Shift>,
    caption: &str,
) -> DrawingArea<DB, Shift> {
    let (band, body) = area.split_vertically(CAPTION_BAND);
    let (w, _) = band.dim_in_pixel();
    try_text(
        &band,
        caption,
        (w as i32 / 2, CAPTION_BAND / 2),
        &centered_font(14),
    );
    body
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_is_slug_season_kind() {
        let player = Player::new(694973, "Paul Skenes");
        assert_eq!(
            sheet_filename(&player, 2024, SheetKind::Pitcher),
            "paul_skenes_2024_pitcher.png"
        );
        assert_eq!(
            sheet_filename(&player, 2023, SheetKind::Batter),
            "paul_skenes_2023_batter.png"
        );
    }

    #[test]
    fn kind_maps_to_its_stat_domain() {
        assert_eq!(SheetKind::Pitcher.domain(), StatDomain::Pitching);
        assert_eq!(SheetKind::Batter.domain(), StatDomain::Batting);
        assert_eq!(SheetKind::Pitcher.as_str(), "pitcher");
    }

    #[test]
    fn grids_built_from_the_ratios_cover_the_canvas() {
        let grid = SheetGrid::new(SHEET_WIDTH, PITCHER_HEIGHT, &COL_RATIOS, &PITCHER_ROW_RATIOS);
        let all = grid.region(0..grid.rows(), 0..grid.cols());
        assert_eq!((all.width(), all.height()), (SHEET_WIDTH, PITCHER_HEIGHT));

        let grid = SheetGrid::new(SHEET_WIDTH, BATTER_HEIGHT, &COL_RATIOS, &BATTER_ROW_RATIOS);
        let footer = grid.region(6..7, 0..8);
        assert_eq!(footer.width(), SHEET_WIDTH);
        assert!(footer.height() > 0);
    }

    #[test]
    fn divider_row_is_thin_but_present() {
        let grid = SheetGrid::new(SHEET_WIDTH, PITCHER_HEIGHT, &COL_RATIOS, &PITCHER_ROW_RATIOS);
        let divider = grid.region(5..6, 0..8);
        assert!(divider.height() >= 1);
        assert!(divider.height() <= 8);
    }
}
