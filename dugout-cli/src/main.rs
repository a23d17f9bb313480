//! Dugout CLI — summary sheets, roster listings, and team aggregates.
//!
//! Commands:
//! - `sheet` — render one player's season summary sheet PNG
//! - `roster` — list a team's active roster names
//! - `team` — show a team's identity and season aggregate rows
//!
//! `--offline` swaps every provider for the deterministic sample pool;
//! sheets produced that way carry a synthetic-data footer.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use dugout_core::client::UnifiedDataClient;
use dugout_core::config::StatColumns;
use dugout_core::domain::{Season, StatDomain};
use dugout_core::reconcile;
use dugout_core::roster::{FreeTextRoster, RosterSource, StructuredRoster};
use dugout_render::league::LeagueAverages;
use dugout_render::sheet::{BatterSummarySheet, PitcherSummarySheet, SheetData, SheetKind};

#[derive(Parser)]
#[command(
    name = "dugout",
    about = "Dugout CLI — player summary sheets from league stat providers"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render one player's season summary sheet PNG.
    Sheet {
        /// Player display name to look up.
        #[arg(long)]
        player: Option<String>,

        /// MLBAM player id (skips the name lookup).
        #[arg(long)]
        id: Option<u32>,

        /// Season year. Defaults to the season in progress.
        #[arg(long)]
        season: Option<Season>,

        /// Sheet kind: pitcher or batter.
        #[arg(long, default_value = "pitcher")]
        kind: String,

        /// Stat column configuration TOML. Defaults to the built-in lists.
        #[arg(long)]
        columns: Option<PathBuf>,

        /// League per-pitch averages CSV. Defaults to the bundled table.
        #[arg(long)]
        league: Option<PathBuf>,

        /// Output directory for the PNG.
        #[arg(long, default_value = "sheets")]
        out_dir: PathBuf,

        /// Offline mode: deterministic sample data, watermarked output.
        #[arg(long, default_value_t = false)]
        offline: bool,
    },
    /// List a team's active roster names.
    Roster {
        /// Team id, abbreviation, or name.
        team: String,

        /// Season year. Defaults to the season in progress.
        #[arg(long)]
        season: Option<Season>,

        /// Pattern-match the free-text listing instead of the structured
        /// roster records.
        #[arg(long, default_value_t = false)]
        free_text: bool,

        /// Offline mode: deterministic sample data.
        #[arg(long, default_value_t = false)]
        offline: bool,
    },
    /// Show a team's identity and season aggregate rows.
    Team {
        /// Team id, abbreviation, or name.
        team: String,

        /// Season year. Defaults to the season in progress.
        #[arg(long)]
        season: Option<Season>,

        /// Offline mode: deterministic sample data.
        #[arg(long, default_value_t = false)]
        offline: bool,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Sheet {
            player,
            id,
            season,
            kind,
            columns,
            league,
            out_dir,
            offline,
        } => run_sheet(player, id, season, &kind, columns, league, out_dir, offline),
        Commands::Roster {
            team,
            season,
            free_text,
            offline,
        } => run_roster(&team, season, free_text, offline),
        Commands::Team {
            team,
            season,
            offline,
        } => run_team(&team, season, offline),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn client_for(offline: bool) -> UnifiedDataClient {
    if offline {
        UnifiedDataClient::sample()
    } else {
        UnifiedDataClient::live()
    }
}

/// The season in progress, or the one just finished during the offseason.
fn current_season() -> Season {
    use chrono::Datelike;
    let today = chrono::Local::now().date_naive();
    let year = today.year() as Season;
    if today.month() < 3 {
        year - 1
    } else {
        year
    }
}

#[allow(clippy::too_many_arguments)]
fn run_sheet(
    player: Option<String>,
    id: Option<u32>,
    season: Option<Season>,
    kind: &str,
    columns_path: Option<PathBuf>,
    league_path: Option<PathBuf>,
    out_dir: PathBuf,
    offline: bool,
) -> Result<()> {
    if player.is_some() && id.is_some() {
        bail!("--player and --id are mutually exclusive");
    }
    if player.is_none() && id.is_none() {
        bail!("one of --player or --id is required");
    }
    let kind = match kind {
        "pitcher" => SheetKind::Pitcher,
        "batter" => SheetKind::Batter,
        other => bail!("unknown kind '{other}'. Valid: pitcher, batter"),
    };
    let season = season.unwrap_or_else(current_season);

    let client = client_for(offline);
    let subject = match (player, id) {
        (Some(name), None) => client.lookup_player(&name)?,
        (None, Some(id)) => client.player_by_id(id)?,
        _ => unreachable!(),
    };

    let columns = match &columns_path {
        Some(path) => StatColumns::from_file(path)
            .with_context(|| format!("column config {}", path.display()))?,
        None => StatColumns::default(),
    };
    let league = match &league_path {
        Some(path) => LeagueAverages::from_path(path)
            .with_context(|| format!("league averages {}", path.display()))?,
        None => LeagueAverages::load_bundled().context("bundled league averages")?,
    };

    let mut data = SheetData::fetch(&client, subject, season, kind, &columns)?;
    data.synthetic = offline;

    let path = match kind {
        SheetKind::Pitcher => {
            PitcherSummarySheet::new(&data, &league, &columns).render_to(&out_dir)?
        }
        SheetKind::Batter => BatterSummarySheet::new(&data, &columns).render_to(&out_dir)?,
    };
    println!("Sheet saved to: {}", path.display());
    Ok(())
}

fn run_roster(team_query: &str, season: Option<Season>, free_text: bool, offline: bool) -> Result<()> {
    let season = season.unwrap_or_else(current_season);
    let client = client_for(offline);
    let team = client.lookup_team(team_query, season)?;

    let names = if free_text {
        FreeTextRoster::new(&client).roster_names(team.team_id, season)?
    } else {
        match StructuredRoster::new(&client).roster_names(team.team_id, season) {
            Ok(names) if !names.is_empty() => names,
            Ok(_) => {
                warn!(team = %team, "structured roster empty, trying the text listing");
                FreeTextRoster::new(&client).roster_names(team.team_id, season)?
            }
            Err(err) => {
                warn!(team = %team, %err, "structured roster unavailable, trying the text listing");
                FreeTextRoster::new(&client).roster_names(team.team_id, season)?
            }
        }
    };

    println!("{team} active roster, {season} ({} players)", names.len());
    for name in &names {
        println!("  {name}");
    }
    Ok(())
}

fn run_team(team_query: &str, season: Option<Season>, offline: bool) -> Result<()> {
    let season = season.unwrap_or_else(current_season);
    let client = client_for(offline);
    let team = client.lookup_team(team_query, season)?;
    let record = client.team_record(team.team_id)?;

    println!("=== {team} ===");
    if let Some(location) = &record.location_name {
        println!("Location: {location}");
    }
    if let Some(venue) = &record.venue_name {
        println!("Venue:    {venue}");
    }
    if let Some(league) = &record.league_name {
        println!("League:   {league}");
    }
    if let Some(division) = &record.division_name {
        println!("Division: {division}");
    }

    for domain in [StatDomain::Pitching, StatDomain::Batting] {
        let board = client.team_season_stats(season, season, domain)?;
        let row = reconcile::team_row(&board, &team.abbreviation)?;
        println!();
        if row.height() == 0 {
            println!("No team {domain} aggregates for {season}.");
            continue;
        }
        println!("--- {season} team {domain} ---");
        println!("{row}");
    }
    Ok(())
}
