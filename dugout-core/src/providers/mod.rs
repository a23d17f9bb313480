//! Provider capability traits and their blocking HTTP clients.
//!
//! Each external source is modeled as a small trait covering exactly what it
//! serves, with one concrete client per trait:
//!
//! - [`StatsApi`] / [`StatsApiClient`]: the league stats JSON API (season
//!   stat entries, people, teams, rosters)
//! - [`LeaderboardSource`] / [`FangraphsClient`]: season and team
//!   leaderboards with advanced metrics
//! - [`StatcastSource`] / [`SavantClient`]: pitch-level event CSV exports
//! - [`SplitsSource`] / [`BrefClient`]: scraped situational splits tables
//!   and the id register used for reverse lookups
//! - [`MediaSource`] / [`StaticMediaClient`]: headshot and logo images
//!
//! Clients fetch and deserialize. They never filter, reorder, or reshape
//! stats; that belongs to the reconciliation layer.

pub mod bref;
pub mod fangraphs;
pub mod media;
pub mod savant;
pub mod statsapi;

pub use bref::BrefClient;
pub use fangraphs::FangraphsClient;
pub use media::StaticMediaClient;
pub use savant::SavantClient;
pub use statsapi::StatsApiClient;

use crate::domain::{Season, StatDomain};
use image::DynamicImage;
use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("provider returned HTTP {status} for {url}")]
    Status { status: u16, url: String },
    #[error("response format changed: {0}")]
    ResponseFormat(String),
    #[error("could not read tabular payload: {0}")]
    Frame(#[from] polars::error::PolarsError),
    #[error("could not decode image: {0}")]
    Image(#[from] image::ImageError),
    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },
}

/// One season stat entry from the league stats API: a flat bag of stat
/// fields plus the context the API attaches to it. `stat` keys vary by
/// domain and API version, so they stay dynamic until the reconciliation
/// layer flattens them against configured columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonStatEntry {
    pub season: String,
    #[serde(default)]
    pub game_type: Option<String>,
    #[serde(default)]
    pub player: Option<PlayerRef>,
    #[serde(default)]
    pub team: Option<TeamRef>,
    pub stat: serde_json::Map<String, serde_json::Value>,
}

/// Player context attached to a season stat entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRef {
    pub id: u32,
    #[serde(rename = "fullName")]
    pub full_name: String,
}

/// Team context attached to a season stat entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamRef {
    pub id: u32,
    #[serde(default)]
    pub name: Option<String>,
}

/// A team as the league stats API describes one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamRecord {
    pub id: u32,
    pub name: String,
    pub abbreviation: String,
    #[serde(default)]
    pub location_name: Option<String>,
    #[serde(default)]
    pub venue_name: Option<String>,
    #[serde(default)]
    pub league_name: Option<String>,
    #[serde(default)]
    pub division_name: Option<String>,
}

/// Bio fields for one person from the league stats API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonRecord {
    pub id: u32,
    pub full_name: String,
    #[serde(default)]
    pub primary_number: Option<String>,
    #[serde(default)]
    pub birth_date: Option<String>,
    #[serde(default)]
    pub current_age: Option<u32>,
    #[serde(default)]
    pub height: Option<String>,
    #[serde(default)]
    pub weight: Option<u32>,
    #[serde(default)]
    pub primary_position: Option<String>,
    #[serde(default)]
    pub bat_side: Option<String>,
    #[serde(default)]
    pub pitch_hand: Option<String>,
    #[serde(default)]
    pub current_team_id: Option<u32>,
}

/// One active roster slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub player_id: u32,
    pub full_name: String,
    #[serde(default)]
    pub jersey_number: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
}

/// A name-search hit from the league stats API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSearchHit {
    pub id: u32,
    pub full_name: String,
    #[serde(default)]
    pub primary_position: Option<String>,
    #[serde(default)]
    pub current_team_id: Option<u32>,
}

/// The league stats JSON API: people, season stat entries, teams, rosters.
pub trait StatsApi {
    /// Season stat entries for one player, one domain, one season.
    /// An empty vec means the API had no line for that combination.
    fn season_entries(
        &self,
        player_id: u32,
        season: Season,
        domain: StatDomain,
    ) -> Result<Vec<SeasonStatEntry>, ProviderError>;

    /// Bio record for one person.
    fn person(&self, player_id: u32) -> Result<PersonRecord, ProviderError>;

    /// Search people by display name. Empty on no hits.
    fn search_people(&self, name: &str) -> Result<Vec<PlayerSearchHit>, ProviderError>;

    fn team(&self, team_id: u32) -> Result<TeamRecord, ProviderError>;

    /// Every team in the league for a season.
    fn teams(&self, season: Season) -> Result<Vec<TeamRecord>, ProviderError>;

    /// Structured active roster. Preferred over the free-text listing.
    fn active_roster(&self, team_id: u32, season: Season)
        -> Result<Vec<RosterEntry>, ProviderError>;

    /// Active roster as the provider's formatted text listing, one player
    /// per line. Kept for sources that only serve the text form; callers
    /// should reach for [`StatsApi::active_roster`] first.
    fn active_roster_text(&self, team_id: u32, season: Season) -> Result<String, ProviderError>;
}

/// Season and team leaderboards carrying advanced metrics. Frames come back
/// exactly as the source serves them, one row per qualifying player (or
/// team), keyed by the `xMLBAMID` column.
pub trait LeaderboardSource {
    /// League-wide player leaderboard for one season and domain.
    fn season_leaderboard(
        &self,
        season: Season,
        domain: StatDomain,
    ) -> Result<DataFrame, ProviderError>;

    /// One row per team over an inclusive season range.
    fn team_season_stats(
        &self,
        start_season: Season,
        end_season: Season,
        domain: StatDomain,
    ) -> Result<DataFrame, ProviderError>;
}

/// Pitch-level event exports. One row per pitch; columns follow the
/// source's CSV vocabulary (`pitch_type`, `game_date`, `release_speed`,
/// `description`, `zone`, `pfx_x`, `pfx_z`, ...).
pub trait StatcastSource {
    /// Every pitch thrown by one pitcher across a date range.
    fn pitcher_events(
        &self,
        player_id: u32,
        start_date: &str,
        end_date: &str,
    ) -> Result<DataFrame, ProviderError>;

    /// Every pitch seen by one batter across a date range.
    fn batter_events(
        &self,
        player_id: u32,
        start_date: &str,
        end_date: &str,
    ) -> Result<DataFrame, ProviderError>;
}

/// Situational splits scraped from the reference site, plus the id
/// register that maps the primary player id to the site's own key.
pub trait SplitsSource {
    /// Splits table for one player season, keyed by the site's player id.
    /// `None` when the site has no splits page for that season.
    fn splits(
        &self,
        bbref_id: &str,
        season: Season,
        domain: StatDomain,
    ) -> Result<Option<DataFrame>, ProviderError>;

    /// Reverse lookup from the primary id to the site's id. `None` when the
    /// register has no row for the player.
    fn reverse_lookup(&self, player_id: u32) -> Result<Option<String>, ProviderError>;

    /// Game-by-game schedule and results for one team season.
    fn schedule_and_record(
        &self,
        team_abbreviation: &str,
        season: Season,
    ) -> Result<DataFrame, ProviderError>;
}

/// Headshot and logo image host.
pub trait MediaSource {
    fn headshot(&self, player_id: u32) -> Result<DynamicImage, ProviderError>;
    fn team_logo(&self, team_id: u32) -> Result<DynamicImage, ProviderError>;
}
