//! Leaderboard client for the advanced-metrics site.
//!
//! The leaders endpoint returns a JSON object whose `data` array holds one
//! object per qualifying player (or team). Row keys are the site's column
//! identifiers (`WAR`, `wOBA`, `K%`, ...), with `xMLBAMID` carrying the
//! league player id. Rows pass through as a DataFrame untouched; filtering
//! a single player out of the board belongs to the reconciliation layer.

use super::{LeaderboardSource, ProviderError};
use crate::domain::{Season, StatDomain};
use polars::prelude::*;
use std::io::Cursor;
use std::time::Duration;

const BASE_URL: &str = "https://www.fangraphs.com/api/leaders/major-league/data";

/// Blocking client for the leaders endpoint.
pub struct FangraphsClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl FangraphsClient {
    pub fn new() -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()
            .expect("failed to build HTTP client");

        Self {
            client,
            base_url: BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn stats_param(domain: StatDomain) -> &'static str {
        match domain {
            StatDomain::Batting => "bat",
            StatDomain::Pitching => "pit",
        }
    }

    fn fetch_rows(&self, url: &str) -> Result<DataFrame, ProviderError> {
        let resp = self.client.get(url).send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body: serde_json::Value = resp.json()?;
        let rows = body
            .get("data")
            .and_then(|v| v.as_array())
            .ok_or_else(|| {
                ProviderError::ResponseFormat("leaders payload has no data array".into())
            })?;

        // Route the row objects through the JSON reader so column types are
        // inferred the same way for live and recorded payloads.
        let bytes = serde_json::to_vec(rows)
            .map_err(|e| ProviderError::ResponseFormat(format!("could not re-encode rows: {e}")))?;
        let df = JsonReader::new(Cursor::new(bytes)).finish()?;
        Ok(df)
    }
}

impl Default for FangraphsClient {
    fn default() -> Self {
        Self::new()
    }
}

impl LeaderboardSource for FangraphsClient {
    fn season_leaderboard(
        &self,
        season: Season,
        domain: StatDomain,
    ) -> Result<DataFrame, ProviderError> {
        let url = format!(
            "{}?pos=all&stats={}&lg=all&qual=0&season={season}&season1={season}\
             &ind=0&month=0&pageitems=5000&pagenum=1&type=8",
            self.base_url,
            Self::stats_param(domain)
        );
        self.fetch_rows(&url)
    }

    fn team_season_stats(
        &self,
        start_season: Season,
        end_season: Season,
        domain: StatDomain,
    ) -> Result<DataFrame, ProviderError> {
        // team=0,ts collapses the board to one row per club.
        let url = format!(
            "{}?pos=all&stats={}&lg=all&qual=0&season={end_season}&season1={start_season}\
             &ind=0&month=0&team=0%2Cts&pageitems=5000&pagenum=1&type=8",
            self.base_url,
            Self::stats_param(domain)
        );
        self.fetch_rows(&url)
    }
}
