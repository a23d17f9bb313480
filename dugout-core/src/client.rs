//! Unified data client.
//!
//! One handle that composes a concrete source for each capability trait
//! and forwards to it. The facade adds identifier plumbing (name lookup,
//! reverse id enrichment, season date bounds) but never filters or
//! reshapes stat tables; that belongs to [`crate::reconcile`].

use crate::domain::{Player, Season, StatDomain, Team};
use crate::providers::{
    BrefClient, FangraphsClient, LeaderboardSource, MediaSource, PersonRecord, PlayerSearchHit,
    ProviderError, RosterEntry, SavantClient, SeasonStatEntry, SplitsSource, StatcastSource,
    StaticMediaClient, StatsApi, StatsApiClient, TeamRecord,
};
use image::DynamicImage;
use polars::prelude::DataFrame;
use tracing::debug;

pub struct UnifiedDataClient {
    stats_api: Box<dyn StatsApi>,
    leaderboards: Box<dyn LeaderboardSource>,
    statcast: Box<dyn StatcastSource>,
    splits: Box<dyn SplitsSource>,
    media: Box<dyn MediaSource>,
}

impl UnifiedDataClient {
    /// Client wired to the live providers.
    pub fn live() -> Self {
        Self::with_sources(
            Box::new(StatsApiClient::new()),
            Box::new(FangraphsClient::new()),
            Box::new(SavantClient::new()),
            Box::new(BrefClient::new()),
            Box::new(StaticMediaClient::new()),
        )
    }

    /// Client over the deterministic offline sources. Anything rendered
    /// from it is synthetic and must say so.
    pub fn sample() -> Self {
        Self::with_sources(
            Box::new(crate::sample::SampleSources),
            Box::new(crate::sample::SampleSources),
            Box::new(crate::sample::SampleSources),
            Box::new(crate::sample::SampleSources),
            Box::new(crate::sample::SampleSources),
        )
    }

    /// Client over caller-supplied sources. Tests and offline runs inject
    /// deterministic ones here.
    pub fn with_sources(
        stats_api: Box<dyn StatsApi>,
        leaderboards: Box<dyn LeaderboardSource>,
        statcast: Box<dyn StatcastSource>,
        splits: Box<dyn SplitsSource>,
        media: Box<dyn MediaSource>,
    ) -> Self {
        Self {
            stats_api,
            leaderboards,
            statcast,
            splits,
            media,
        }
    }

    // ── players and teams ───────────────────────────────────────────────

    /// Resolve a display name to a player via the stats API search. The
    /// first hit wins; ambiguity is logged, not guessed around.
    pub fn lookup_player(&self, name: &str) -> Result<Player, ProviderError> {
        let hits = self.stats_api.search_people(name)?;
        if hits.len() > 1 {
            debug!(name, hits = hits.len(), "name search is ambiguous, taking first hit");
        }
        let hit = hits.into_iter().next().ok_or(ProviderError::NotFound {
            entity: "player",
            key: name.to_string(),
        })?;
        Ok(Player::new(hit.id, hit.full_name))
    }

    pub fn player_by_id(&self, player_id: u32) -> Result<Player, ProviderError> {
        let person = self.stats_api.person(player_id)?;
        Ok(Player::new(person.id, person.full_name))
    }

    pub fn search_people(&self, name: &str) -> Result<Vec<PlayerSearchHit>, ProviderError> {
        self.stats_api.search_people(name)
    }

    pub fn person(&self, player_id: u32) -> Result<PersonRecord, ProviderError> {
        self.stats_api.person(player_id)
    }

    /// Fill in the splits-site id if the player does not carry one yet.
    /// Returns whether the id is known afterwards.
    pub fn ensure_bbref_id(&self, player: &mut Player) -> Result<bool, ProviderError> {
        if player.bbref_id.is_some() {
            return Ok(true);
        }
        match self.splits.reverse_lookup(player.mlbam_id)? {
            Some(id) => {
                debug!(player = %player.full_name, bbref_id = %id, "reverse lookup resolved");
                player.bbref_id = Some(id);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn team(&self, team_id: u32) -> Result<Team, ProviderError> {
        let record = self.stats_api.team(team_id)?;
        Ok(Team::new(record.id, record.name, record.abbreviation))
    }

    pub fn team_record(&self, team_id: u32) -> Result<TeamRecord, ProviderError> {
        self.stats_api.team(team_id)
    }

    pub fn teams(&self, season: Season) -> Result<Vec<TeamRecord>, ProviderError> {
        self.stats_api.teams(season)
    }

    /// Resolve a team by id digits, abbreviation, or full name.
    pub fn lookup_team(&self, query: &str, season: Season) -> Result<Team, ProviderError> {
        if let Ok(id) = query.parse::<u32>() {
            return self.team(id);
        }
        let teams = self.stats_api.teams(season)?;
        teams
            .into_iter()
            .find(|t| {
                t.abbreviation.eq_ignore_ascii_case(query) || t.name.eq_ignore_ascii_case(query)
            })
            .map(|t| Team::new(t.id, t.name, t.abbreviation))
            .ok_or(ProviderError::NotFound {
                entity: "team",
                key: query.to_string(),
            })
    }

    // ── rosters ─────────────────────────────────────────────────────────

    pub fn active_roster(
        &self,
        team_id: u32,
        season: Season,
    ) -> Result<Vec<RosterEntry>, ProviderError> {
        self.stats_api.active_roster(team_id, season)
    }

    pub fn active_roster_text(
        &self,
        team_id: u32,
        season: Season,
    ) -> Result<String, ProviderError> {
        self.stats_api.active_roster_text(team_id, season)
    }

    // ── stat tables ─────────────────────────────────────────────────────

    pub fn season_entries(
        &self,
        player_id: u32,
        season: Season,
        domain: StatDomain,
    ) -> Result<Vec<SeasonStatEntry>, ProviderError> {
        self.stats_api.season_entries(player_id, season, domain)
    }

    pub fn season_leaderboard(
        &self,
        season: Season,
        domain: StatDomain,
    ) -> Result<DataFrame, ProviderError> {
        self.leaderboards.season_leaderboard(season, domain)
    }

    pub fn team_season_stats(
        &self,
        start_season: Season,
        end_season: Season,
        domain: StatDomain,
    ) -> Result<DataFrame, ProviderError> {
        self.leaderboards
            .team_season_stats(start_season, end_season, domain)
    }

    pub fn player_splits(
        &self,
        bbref_id: &str,
        season: Season,
        domain: StatDomain,
    ) -> Result<Option<DataFrame>, ProviderError> {
        self.splits.splits(bbref_id, season, domain)
    }

    pub fn schedule_and_record(
        &self,
        team_abbreviation: &str,
        season: Season,
    ) -> Result<DataFrame, ProviderError> {
        self.splits.schedule_and_record(team_abbreviation, season)
    }

    // ── pitch-level events ──────────────────────────────────────────────

    /// Every pitch a pitcher threw during one season's calendar window.
    pub fn pitcher_events_for_season(
        &self,
        player_id: u32,
        season: Season,
    ) -> Result<DataFrame, ProviderError> {
        let (start, end) = season_bounds(season);
        self.statcast.pitcher_events(player_id, &start, &end)
    }

    /// Every pitch a batter saw during one season's calendar window.
    pub fn batter_events_for_season(
        &self,
        player_id: u32,
        season: Season,
    ) -> Result<DataFrame, ProviderError> {
        let (start, end) = season_bounds(season);
        self.statcast.batter_events(player_id, &start, &end)
    }

    // ── media ───────────────────────────────────────────────────────────

    pub fn headshot(&self, player_id: u32) -> Result<DynamicImage, ProviderError> {
        self.media.headshot(player_id)
    }

    pub fn team_logo(&self, team_id: u32) -> Result<DynamicImage, ProviderError> {
        self.media.team_logo(team_id)
    }
}

/// Calendar window that brackets one season, spring openers through the
/// end of the postseason.
fn season_bounds(season: Season) -> (String, String) {
    (format!("{season}-03-01"), format!("{season}-11-30"))
}
