//! Stat reconciliation: provider payloads in, per-player views out.
//!
//! Three shaping rules live here and nowhere else:
//!
//! 1. Season stat entries flatten into one row per entry, with the entry
//!    context (`season`, `player`, `gameType`) injected as columns.
//! 2. Configured columns project by intersection. Columns the provider
//!    did not send are logged and dropped; the table degrades instead of
//!    failing.
//! 3. A player's row comes out of a leaderboard by filtering on the
//!    board's league-id column.
//!
//! Splits are the exception to rule 2: the provider pre-filters the rows,
//! and projection to configured columns happens at render time, so the
//! splits slice carries the full frame.

use crate::client::UnifiedDataClient;
use crate::config::StatColumns;
use crate::domain::{Player, Season, StatCategory, StatDomain};
use crate::providers::{ProviderError, SeasonStatEntry};
use polars::prelude::*;
use serde_json::Value;
use std::collections::HashSet;
use thiserror::Error;
use tracing::{debug, warn};

/// Column that keys leaderboard rows to the league player id.
pub const LEADERBOARD_ID_COL: &str = "xMLBAMID";

#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),
    #[error("could not assemble stat frame: {0}")]
    Frame(#[from] PolarsError),
    #[error("leaderboard frame has no '{LEADERBOARD_ID_COL}' column")]
    MissingIdColumn,
}

/// Why a slice has no table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbsentReason {
    /// The provider had no rows for this player and season.
    NoProviderData,
    /// The configuration lists no columns for this view.
    NoConfiguredColumns,
    /// Columns were configured but none of them exist in the provider frame.
    NoMatchingColumns,
}

/// One slice of a player's stats: either a renderable table or a recorded
/// reason for its absence. Absent slices skip their sheet section.
#[derive(Debug, Clone)]
pub enum SliceOutcome {
    Table(DataFrame),
    Absent(AbsentReason),
}

impl SliceOutcome {
    pub fn table(&self) -> Option<&DataFrame> {
        match self {
            SliceOutcome::Table(df) => Some(df),
            SliceOutcome::Absent(_) => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, SliceOutcome::Absent(_))
    }
}

/// The three views a sheet shows for one player, season, and domain.
///
/// `standard` and `advanced` are already projected to configured columns.
/// `splits` keeps every provider column; the renderer projects it.
#[derive(Debug)]
pub struct StatViews {
    pub standard: SliceOutcome,
    pub advanced: SliceOutcome,
    pub splits: SliceOutcome,
}

// ── flattening ──────────────────────────────────────────────────────────────

/// Injected context columns. A stat key with the same name loses to the
/// injected value.
const INJECTED: [&str; 3] = ["season", "player", "gameType"];

/// Turn season stat entries into a frame: one row per entry, one column
/// per stat key (typed from the values), plus the injected context.
pub fn flatten_season_entries(
    entries: &[SeasonStatEntry],
) -> Result<DataFrame, ReconcileError> {
    if entries.is_empty() {
        return Ok(DataFrame::empty());
    }

    let mut keys: Vec<&str> = Vec::new();
    let mut seen = HashSet::new();
    for entry in entries {
        for key in entry.stat.keys() {
            if !INJECTED.contains(&key.as_str()) && seen.insert(key.as_str()) {
                keys.push(key.as_str());
            }
        }
    }

    let mut columns = Vec::with_capacity(keys.len() + INJECTED.len());
    for key in keys {
        let values: Vec<Option<&Value>> = entries.iter().map(|e| e.stat.get(key)).collect();
        columns.push(stat_column(key, &values));
    }
    columns.push(Column::new(
        "season".into(),
        entries.iter().map(|e| e.season.as_str()).collect::<Vec<_>>(),
    ));
    columns.push(Column::new(
        "player".into(),
        entries
            .iter()
            .map(|e| e.player.as_ref().map(|p| p.full_name.as_str()))
            .collect::<Vec<_>>(),
    ));
    columns.push(Column::new(
        "gameType".into(),
        entries
            .iter()
            .map(|e| e.game_type.as_deref())
            .collect::<Vec<_>>(),
    ));
    Ok(DataFrame::new(columns)?)
}

/// Type a stat column from its first non-null value. Providers mix whole
/// numbers, floats, and preformatted strings (".268", "-.--") freely, so
/// later values coerce toward the chosen type and fall back to null.
fn stat_column(name: &str, values: &[Option<&Value>]) -> Column {
    match values.iter().flatten().next() {
        Some(Value::Number(_)) => {
            if values.iter().flatten().all(|v| v.as_i64().is_some()) {
                let ints: Vec<Option<i64>> =
                    values.iter().map(|v| v.and_then(|v| v.as_i64())).collect();
                Column::new(name.into(), ints)
            } else {
                let floats: Vec<Option<f64>> =
                    values.iter().map(|v| v.and_then(value_as_f64)).collect();
                Column::new(name.into(), floats)
            }
        }
        Some(Value::Bool(_)) => {
            let bools: Vec<Option<bool>> =
                values.iter().map(|v| v.and_then(|v| v.as_bool())).collect();
            Column::new(name.into(), bools)
        }
        _ => {
            let texts: Vec<Option<String>> =
                values.iter().map(|v| v.map(value_as_text)).collect();
            Column::new(name.into(), texts)
        }
    }
}

fn value_as_f64(v: &Value) -> Option<f64> {
    v.as_f64()
        .or_else(|| v.as_str().and_then(|s| s.parse().ok()))
}

fn value_as_text(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// ── projection ──────────────────────────────────────────────────────────────

/// Project a frame onto the configured columns, in configured order.
/// Missing columns degrade the table with a warning rather than failing.
pub fn select_configured(
    df: &DataFrame,
    configured: &[String],
) -> Result<SliceOutcome, ReconcileError> {
    if configured.is_empty() {
        return Ok(SliceOutcome::Absent(AbsentReason::NoConfiguredColumns));
    }
    if df.height() == 0 {
        return Ok(SliceOutcome::Absent(AbsentReason::NoProviderData));
    }

    let present: HashSet<&str> = df.get_column_names().iter().map(|n| n.as_str()).collect();
    let (available, missing): (Vec<&String>, Vec<&String>) =
        configured.iter().partition(|c| present.contains(c.as_str()));

    if !missing.is_empty() {
        warn!(
            missing = ?missing,
            "configured columns not in provider frame, rendering without them"
        );
    }
    if available.is_empty() {
        return Ok(SliceOutcome::Absent(AbsentReason::NoMatchingColumns));
    }

    let exprs: Vec<Expr> = available.iter().map(|c| col(c.as_str())).collect();
    let selected = df.clone().lazy().select(exprs).collect()?;
    Ok(SliceOutcome::Table(selected))
}

/// Pull one player's row out of a leaderboard frame.
pub fn player_leaderboard_row(
    board: &DataFrame,
    player_id: u32,
) -> Result<DataFrame, ReconcileError> {
    if board.column(LEADERBOARD_ID_COL).is_err() {
        return Err(ReconcileError::MissingIdColumn);
    }
    let row = board
        .clone()
        .lazy()
        .filter(col(LEADERBOARD_ID_COL).eq(lit(player_id as i64)))
        .collect()?;
    Ok(row)
}

// ── view assembly ───────────────────────────────────────────────────────────

/// Assembles the three configured views for a player by pulling from the
/// unified client and applying the shaping rules above.
pub struct Reconciler<'a> {
    client: &'a UnifiedDataClient,
    columns: &'a StatColumns,
}

impl<'a> Reconciler<'a> {
    pub fn new(client: &'a UnifiedDataClient, columns: &'a StatColumns) -> Self {
        Self { client, columns }
    }

    /// Build all three views for one player season.
    ///
    /// The player is mutable so the splits-site id can be filled in by
    /// reverse lookup the first time splits are requested.
    pub fn player_views(
        &self,
        player: &mut Player,
        season: Season,
        domain: StatDomain,
    ) -> Result<StatViews, ReconcileError> {
        let board = self.client.season_leaderboard(season, domain)?;
        let board_row = player_leaderboard_row(&board, player.mlbam_id)?;
        debug!(
            player = %player.full_name,
            board_rows = board.height(),
            matched = board_row.height(),
            "leaderboard filtered"
        );

        let standard = match domain {
            // Standard batting comes from the season-entry API; standard
            // pitching lives on the leaderboard alongside the advanced
            // metrics.
            StatDomain::Batting => {
                let entries = self.client.season_entries(player.mlbam_id, season, domain)?;
                let flat = flatten_season_entries(&entries)?;
                select_configured(&flat, self.columns.columns(domain, StatCategory::Standard))?
            }
            StatDomain::Pitching => select_configured(
                &board_row,
                self.columns.columns(domain, StatCategory::Standard),
            )?,
        };

        let advanced = select_configured(
            &board_row,
            self.columns.columns(domain, StatCategory::Advanced),
        )?;

        let splits = self.splits_slice(player, season, domain)?;

        Ok(StatViews {
            standard,
            advanced,
            splits,
        })
    }

    fn splits_slice(
        &self,
        player: &mut Player,
        season: Season,
        domain: StatDomain,
    ) -> Result<SliceOutcome, ReconcileError> {
        if self
            .columns
            .columns(domain, StatCategory::Splits)
            .is_empty()
        {
            return Ok(SliceOutcome::Absent(AbsentReason::NoConfiguredColumns));
        }
        if !self.client.ensure_bbref_id(player)? {
            warn!(player = %player.full_name, "no splits-site id for player, skipping splits");
            return Ok(SliceOutcome::Absent(AbsentReason::NoProviderData));
        }
        let bbref_id = player.bbref_id.clone().unwrap_or_default();
        match self.client.player_splits(&bbref_id, season, domain)? {
            Some(df) => Ok(SliceOutcome::Table(df)),
            None => Ok(SliceOutcome::Absent(AbsentReason::NoProviderData)),
        }
    }
}

/// Pick one team's row out of a team stats frame by abbreviation or name.
/// The first matching team-ish column wins.
pub fn team_row(frame: &DataFrame, team: &str) -> Result<DataFrame, ReconcileError> {
    const TEAM_COLS: [&str; 3] = ["TeamName", "Team", "TeamNameAbb"];
    let Some(col_name) = TEAM_COLS.iter().find(|c| frame.column(c).is_ok()) else {
        return Ok(frame.clear());
    };
    let names = frame.column(col_name)?.str()?;
    let mask: BooleanChunked = names
        .into_iter()
        .map(|v| Some(v.is_some_and(|n| n.eq_ignore_ascii_case(team))))
        .collect();
    Ok(frame.filter(&mask)?)
}
