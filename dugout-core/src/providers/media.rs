//! Headshot and logo host client.
//!
//! The image CDN serves player headshots (with a generic silhouette
//! fallback baked into the URL) and square team spot logos as PNG.

use super::{MediaSource, ProviderError};
use image::DynamicImage;
use std::time::Duration;

const HEADSHOT_URL: &str = "https://img.mlbstatic.com/mlb-photos/image/upload/d_people:generic:headshot:67:current.png/w_213,q_auto:best/v1/people";
const LOGO_URL: &str = "https://midfield.mlbstatic.com/v1/team";

/// Blocking client for the image CDN.
pub struct StaticMediaClient {
    client: reqwest::blocking::Client,
}

impl StaticMediaClient {
    pub fn new() -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("dugout/0.1")
            .build()
            .expect("failed to build HTTP client");

        Self { client }
    }

    fn fetch_image(&self, url: &str) -> Result<DynamicImage, ProviderError> {
        let resp = self.client.get(url).send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        let bytes = resp.bytes()?;
        Ok(image::load_from_memory(&bytes)?)
    }
}

impl Default for StaticMediaClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaSource for StaticMediaClient {
    fn headshot(&self, player_id: u32) -> Result<DynamicImage, ProviderError> {
        let url = format!("{HEADSHOT_URL}/{player_id}/headshot/67/current");
        self.fetch_image(&url)
    }

    fn team_logo(&self, team_id: u32) -> Result<DynamicImage, ProviderError> {
        let url = format!("{LOGO_URL}/{team_id}/spots/96");
        self.fetch_image(&url)
    }
}
