//! League stats JSON API client.
//!
//! Covers people, season stat entries, teams, and rosters. The API nests
//! everything under wrapper arrays (`people`, `teams`, `stats[].splits`),
//! so the wire models here stay private and flatten into the shared record
//! types on the way out.

use super::{
    PersonRecord, PlayerSearchHit, ProviderError, RosterEntry, SeasonStatEntry, StatsApi,
    TeamRecord,
};
use crate::domain::{Season, StatDomain};
use std::time::Duration;

const BASE_URL: &str = "https://statsapi.mlb.com/api/v1";

// ── wire models ─────────────────────────────────────────────────────────────

#[derive(Debug, serde::Deserialize)]
struct StatsResponse {
    #[serde(default)]
    stats: Vec<StatGroup>,
}

#[derive(Debug, serde::Deserialize)]
struct StatGroup {
    #[serde(default)]
    splits: Vec<SeasonStatEntry>,
}

#[derive(Debug, serde::Deserialize)]
struct PeopleResponse {
    #[serde(default)]
    people: Vec<WirePerson>,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct WirePerson {
    id: u32,
    full_name: String,
    #[serde(default)]
    primary_number: Option<String>,
    #[serde(default)]
    birth_date: Option<String>,
    #[serde(default)]
    current_age: Option<u32>,
    #[serde(default)]
    height: Option<String>,
    #[serde(default)]
    weight: Option<u32>,
    #[serde(default)]
    primary_position: Option<WirePosition>,
    #[serde(default)]
    bat_side: Option<WireCoded>,
    #[serde(default)]
    pitch_hand: Option<WireCoded>,
    #[serde(default)]
    current_team: Option<WireIdent>,
}

#[derive(Debug, serde::Deserialize)]
struct WirePosition {
    #[serde(default)]
    abbreviation: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
struct WireCoded {
    #[serde(default)]
    code: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
struct WireIdent {
    id: u32,
}

#[derive(Debug, serde::Deserialize)]
struct TeamsResponse {
    #[serde(default)]
    teams: Vec<WireTeam>,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireTeam {
    id: u32,
    name: String,
    abbreviation: String,
    #[serde(default)]
    location_name: Option<String>,
    #[serde(default)]
    venue: Option<WireNamed>,
    #[serde(default)]
    league: Option<WireNamed>,
    #[serde(default)]
    division: Option<WireNamed>,
}

#[derive(Debug, serde::Deserialize)]
struct WireNamed {
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
struct RosterResponse {
    #[serde(default)]
    roster: Vec<WireRosterSlot>,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireRosterSlot {
    person: WireRosterPerson,
    #[serde(default)]
    jersey_number: Option<String>,
    #[serde(default)]
    position: Option<WirePosition>,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireRosterPerson {
    id: u32,
    full_name: String,
}

impl From<WirePerson> for PersonRecord {
    fn from(p: WirePerson) -> Self {
        PersonRecord {
            id: p.id,
            full_name: p.full_name,
            primary_number: p.primary_number,
            birth_date: p.birth_date,
            current_age: p.current_age,
            height: p.height,
            weight: p.weight,
            primary_position: p.primary_position.and_then(|pos| pos.abbreviation),
            bat_side: p.bat_side.and_then(|s| s.code),
            pitch_hand: p.pitch_hand.and_then(|s| s.code),
            current_team_id: p.current_team.map(|t| t.id),
        }
    }
}

impl From<WireTeam> for TeamRecord {
    fn from(t: WireTeam) -> Self {
        TeamRecord {
            id: t.id,
            name: t.name,
            abbreviation: t.abbreviation,
            location_name: t.location_name,
            venue_name: t.venue.and_then(|v| v.name),
            league_name: t.league.and_then(|v| v.name),
            division_name: t.division.and_then(|v| v.name),
        }
    }
}

// ── client ──────────────────────────────────────────────────────────────────

/// Blocking client for the league stats JSON API.
pub struct StatsApiClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl StatsApiClient {
    pub fn new() -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("dugout/0.1")
            .build()
            .expect("failed to build HTTP client");

        Self {
            client,
            base_url: BASE_URL.to_string(),
        }
    }

    /// Point the client at a different host. Used by tests and mirrors.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn get_checked(&self, url: &str) -> Result<reqwest::blocking::Response, ProviderError> {
        let resp = self.client.get(url).send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(resp)
    }
}

impl Default for StatsApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl StatsApi for StatsApiClient {
    fn season_entries(
        &self,
        player_id: u32,
        season: Season,
        domain: StatDomain,
    ) -> Result<Vec<SeasonStatEntry>, ProviderError> {
        let url = format!(
            "{}/people/{player_id}/stats?stats=season&group={}&season={season}",
            self.base_url,
            domain.api_group()
        );
        let resp: StatsResponse = self.get_checked(&url)?.json()?;
        Ok(resp.stats.into_iter().flat_map(|g| g.splits).collect())
    }

    fn person(&self, player_id: u32) -> Result<PersonRecord, ProviderError> {
        let url = format!("{}/people/{player_id}?hydrate=currentTeam", self.base_url);
        let resp: PeopleResponse = self.get_checked(&url)?.json()?;
        resp.people
            .into_iter()
            .next()
            .map(PersonRecord::from)
            .ok_or(ProviderError::NotFound {
                entity: "person",
                key: player_id.to_string(),
            })
    }

    fn search_people(&self, name: &str) -> Result<Vec<PlayerSearchHit>, ProviderError> {
        let url = format!("{}/people/search?names={}", self.base_url, encode(name));
        let resp: PeopleResponse = self.get_checked(&url)?.json()?;
        Ok(resp
            .people
            .into_iter()
            .map(|p| {
                let current_team_id = p.current_team.as_ref().map(|t| t.id);
                PlayerSearchHit {
                    id: p.id,
                    full_name: p.full_name,
                    primary_position: p.primary_position.and_then(|pos| pos.abbreviation),
                    current_team_id,
                }
            })
            .collect())
    }

    fn team(&self, team_id: u32) -> Result<TeamRecord, ProviderError> {
        let url = format!("{}/teams/{team_id}", self.base_url);
        let resp: TeamsResponse = self.get_checked(&url)?.json()?;
        resp.teams
            .into_iter()
            .next()
            .map(TeamRecord::from)
            .ok_or(ProviderError::NotFound {
                entity: "team",
                key: team_id.to_string(),
            })
    }

    fn teams(&self, season: Season) -> Result<Vec<TeamRecord>, ProviderError> {
        let url = format!("{}/teams?sportId=1&season={season}", self.base_url);
        let resp: TeamsResponse = self.get_checked(&url)?.json()?;
        Ok(resp.teams.into_iter().map(TeamRecord::from).collect())
    }

    fn active_roster(
        &self,
        team_id: u32,
        season: Season,
    ) -> Result<Vec<RosterEntry>, ProviderError> {
        let url = format!(
            "{}/teams/{team_id}/roster?rosterType=active&season={season}",
            self.base_url
        );
        let resp: RosterResponse = self.get_checked(&url)?.json()?;
        Ok(resp
            .roster
            .into_iter()
            .map(|slot| RosterEntry {
                player_id: slot.person.id,
                full_name: slot.person.full_name,
                jersey_number: slot.jersey_number,
                position: slot.position.and_then(|p| p.abbreviation),
            })
            .collect())
    }

    fn active_roster_text(&self, team_id: u32, season: Season) -> Result<String, ProviderError> {
        let entries = self.active_roster(team_id, season)?;
        Ok(format_roster_text(&entries))
    }
}

/// The classic formatted roster listing older tooling passes around:
/// "#NN POS Full Name", one player per line.
pub fn format_roster_text(entries: &[RosterEntry]) -> String {
    entries
        .iter()
        .map(|e| {
            format!(
                "#{:<3} {:<3} {}",
                e.jersey_number.as_deref().unwrap_or(""),
                e.position.as_deref().unwrap_or(""),
                e.full_name
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Minimal query-string escaping for the handful of characters player
/// names can contain.
fn encode(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        match c {
            ' ' => out.push_str("%20"),
            '&' => out.push_str("%26"),
            '+' => out.push_str("%2B"),
            '#' => out.push_str("%23"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn season_entry_parses_wire_shape() {
        let body = r#"{
            "stats": [{
                "splits": [{
                    "season": "2024",
                    "gameType": "R",
                    "player": {"id": 694973, "fullName": "Paul Skenes"},
                    "stat": {"wins": 11, "era": "1.96", "inningsPitched": "133.0"}
                }]
            }]
        }"#;
        let resp: StatsResponse = serde_json::from_str(body).unwrap();
        let entries: Vec<_> = resp.stats.into_iter().flat_map(|g| g.splits).collect();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].season, "2024");
        assert_eq!(entries[0].game_type.as_deref(), Some("R"));
        assert_eq!(
            entries[0].player.as_ref().map(|p| p.full_name.as_str()),
            Some("Paul Skenes")
        );
        assert_eq!(entries[0].stat["wins"], serde_json::json!(11));
    }

    #[test]
    fn roster_text_lines_carry_number_position_name() {
        let entries = [RosterEntry {
            player_id: 694973,
            full_name: "Paul Skenes".into(),
            jersey_number: Some("30".into()),
            position: Some("P".into()),
        }];
        assert_eq!(format_roster_text(&entries), "#30  P   Paul Skenes");
    }

    #[test]
    fn person_wire_flattens_nested_fields() {
        let body = r#"{
            "people": [{
                "id": 694973,
                "fullName": "Paul Skenes",
                "primaryNumber": "30",
                "currentAge": 23,
                "primaryPosition": {"abbreviation": "P"},
                "pitchHand": {"code": "R"},
                "currentTeam": {"id": 134}
            }]
        }"#;
        let resp: PeopleResponse = serde_json::from_str(body).unwrap();
        let person: PersonRecord = resp.people.into_iter().next().unwrap().into();
        assert_eq!(person.primary_position.as_deref(), Some("P"));
        assert_eq!(person.pitch_hand.as_deref(), Some("R"));
        assert_eq!(person.current_team_id, Some(134));
    }
}
