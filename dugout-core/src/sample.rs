//! Deterministic sample data.
//!
//! A full set of offline sources so sheets can be rendered and tested
//! without touching any provider. Every value derives from a BLAKE3 hash
//! of the identifiers involved, so the same player and season always yield
//! byte-identical frames regardless of call order.
//!
//! The sample universe is a pool of thirty invented players across three
//! invented clubs. Name lookups map into the pool, so any queried name
//! resolves to a pool id and every pool id appears on the sample
//! leaderboards. Sheets built from these sources must carry the synthetic
//! watermark; the renderer takes care of that.

use crate::domain::{Season, StatDomain};
use crate::providers::{
    statsapi::format_roster_text, LeaderboardSource, MediaSource, PersonRecord, PlayerRef,
    PlayerSearchHit, ProviderError, RosterEntry, SeasonStatEntry, SplitsSource, StatcastSource,
    StatsApi, TeamRecord, TeamRef,
};
use chrono::{Duration, NaiveDate};
use image::{DynamicImage, Rgb, RgbImage};
use polars::prelude::*;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde_json::json;

/// How many players the sample universe holds.
pub const POOL_SIZE: u32 = 30;

const ID_BASE: u32 = 900_000;

const FIRST_NAMES: [&str; 10] = [
    "Avery", "Jordan", "Casey", "Drew", "Reese", "Quinn", "Hayden", "Rowan", "Sage", "Tatum",
];
const LAST_NAMES: [&str; 10] = [
    "Calloway", "Marsh", "Whitaker", "Donovan", "Pryor", "Vance", "Mercer", "Holloway",
    "Langston", "Beckett",
];

const TEAMS: [(u32, &str, &str); 3] = [
    (9101, "River City Otters", "RCO"),
    (9102, "Harborview Kestrels", "HVK"),
    (9103, "Summit Ridge Miners", "SRM"),
];

// ── seeding ─────────────────────────────────────────────────────────────────

fn seed(label: &str, a: u64, b: u64) -> u64 {
    let mut hasher = blake3::Hasher::new();
    hasher.update(label.as_bytes());
    hasher.update(&a.to_le_bytes());
    hasher.update(&b.to_le_bytes());
    let hash = hasher.finalize();
    u64::from_le_bytes(hash.as_bytes()[..8].try_into().unwrap())
}

fn rng_for(label: &str, a: u64, b: u64) -> StdRng {
    StdRng::seed_from_u64(seed(label, a, b))
}

// ── the player pool ─────────────────────────────────────────────────────────

pub fn pool_ids() -> Vec<u32> {
    (1..=POOL_SIZE).map(|n| ID_BASE + n).collect()
}

/// Map any queried name onto a pool id. Stable across runs.
pub fn id_for_name(name: &str) -> u32 {
    ID_BASE + 1 + (seed(name, 0, 0) % POOL_SIZE as u64) as u32
}

fn pool_index(player_id: u32) -> u32 {
    // Out-of-pool ids still land somewhere so the generators never panic.
    if (ID_BASE + 1..=ID_BASE + POOL_SIZE).contains(&player_id) {
        player_id - ID_BASE
    } else {
        1 + player_id % POOL_SIZE
    }
}

pub fn display_name(player_id: u32) -> String {
    let n = pool_index(player_id) as usize;
    format!("{} {}", FIRST_NAMES[n % 10], LAST_NAMES[(n / 3) % 10])
}

fn team_for(player_id: u32) -> (u32, &'static str, &'static str) {
    TEAMS[(pool_index(player_id) % 3) as usize]
}

fn position_for(player_id: u32) -> &'static str {
    let n = pool_index(player_id);
    if n % 2 == 1 {
        "P"
    } else {
        ["C", "SS", "CF", "1B", "RF"][(n / 2 % 5) as usize]
    }
}

/// Reference-site style key derived from the display name: five letters of
/// the surname, two of the given name, a serial.
pub fn bbref_style_id(player_id: u32) -> String {
    let name = display_name(player_id);
    let mut parts = name.split_whitespace();
    let first = parts.next().unwrap_or("xx").to_lowercase();
    let last = parts.next().unwrap_or("xxxxx").to_lowercase();
    let last5: String = last.chars().take(5).collect();
    let first2: String = first.chars().take(2).collect();
    format!("{last5}{first2}01")
}

// ── pitch arsenal profiles ──────────────────────────────────────────────────

struct PitchProfile {
    code: &'static str,
    velo: f64,
    pfx_x: f64,
    pfx_z: f64,
}

/// Movement in feet, matching what the event export serves before the
/// derived-column pass rescales it.
const PROFILES: [PitchProfile; 8] = [
    PitchProfile { code: "FF", velo: 95.2, pfx_x: -0.55, pfx_z: 1.30 },
    PitchProfile { code: "SL", velo: 85.8, pfx_x: 0.25, pfx_z: 0.20 },
    PitchProfile { code: "CH", velo: 87.1, pfx_x: -1.10, pfx_z: 0.55 },
    PitchProfile { code: "SI", velo: 93.9, pfx_x: -1.05, pfx_z: 0.75 },
    PitchProfile { code: "CU", velo: 79.4, pfx_x: 0.55, pfx_z: -0.70 },
    PitchProfile { code: "FC", velo: 89.6, pfx_x: 0.10, pfx_z: 0.95 },
    PitchProfile { code: "ST", velo: 82.3, pfx_x: 0.95, pfx_z: 0.30 },
    PitchProfile { code: "FS", velo: 85.2, pfx_x: -0.75, pfx_z: 0.25 },
];

const DESCRIPTION_WEIGHTS: [(&str, f64); 8] = [
    ("ball", 0.35),
    ("called_strike", 0.16),
    ("foul", 0.16),
    ("hit_into_play", 0.16),
    ("swinging_strike", 0.10),
    ("blocked_ball", 0.04),
    ("foul_tip", 0.02),
    ("swinging_strike_blocked", 0.01),
];

fn weighted_description(rng: &mut StdRng) -> &'static str {
    let roll: f64 = rng.gen();
    let mut acc = 0.0;
    for (code, weight) in DESCRIPTION_WEIGHTS {
        acc += weight;
        if roll < acc {
            return code;
        }
    }
    DESCRIPTION_WEIGHTS[0].0
}

/// Pick an arsenal: the four-seamer plus two to four secondaries, with a
/// dominant-primary usage split.
fn build_arsenal(rng: &mut StdRng) -> Vec<(&'static PitchProfile, f64)> {
    let mut secondary: Vec<usize> = (1..PROFILES.len()).collect();
    secondary.shuffle(rng);
    let picks = rng.gen_range(2..=4);

    let mut arsenal = vec![&PROFILES[0]];
    arsenal.extend(secondary[..picks].iter().map(|&i| &PROFILES[i]));

    let primary_share = 0.40;
    let rest_share = (1.0 - primary_share) / picks as f64;
    let mut cumulative = 0.0;
    arsenal
        .into_iter()
        .enumerate()
        .map(|(i, profile)| {
            cumulative += if i == 0 { primary_share } else { rest_share };
            (profile, cumulative)
        })
        .collect()
}

// ── frame generators ────────────────────────────────────────────────────────

/// One season of pitch-level events for a pitcher, pre-annotation: raw
/// result codes, zones, and movement in feet.
pub fn pitch_events(player_id: u32, season: Season) -> PolarsResult<DataFrame> {
    let mut rng = rng_for("events", player_id as u64, season as u64);
    let arsenal = build_arsenal(&mut rng);
    let games = rng.gen_range(18..24);
    let opener = NaiveDate::from_ymd_opt(season as i32, 4, 1).unwrap();

    let mut pitch_type: Vec<&str> = Vec::new();
    let mut game_date: Vec<String> = Vec::new();
    let mut release_speed: Vec<f64> = Vec::new();
    let mut description: Vec<&str> = Vec::new();
    let mut zone: Vec<i64> = Vec::new();
    let mut pfx_x: Vec<f64> = Vec::new();
    let mut pfx_z: Vec<f64> = Vec::new();

    for g in 0..games {
        let date = opener + Duration::days(5 * g + rng.gen_range(0..2));
        let date = date.format("%Y-%m-%d").to_string();
        let pitches = rng.gen_range(78..102);
        for _ in 0..pitches {
            let roll: f64 = rng.gen();
            let profile = arsenal
                .iter()
                .find(|(_, cum)| roll < *cum)
                .map(|(p, _)| *p)
                .unwrap_or(arsenal[arsenal.len() - 1].0);

            pitch_type.push(profile.code);
            game_date.push(date.clone());
            release_speed
                .push(((profile.velo + rng.gen_range(-1.8..1.8)) * 10.0).round() / 10.0);
            description.push(weighted_description(&mut rng));
            zone.push(if rng.gen_bool(0.47) {
                rng.gen_range(1..=9)
            } else {
                rng.gen_range(11..=14)
            });
            pfx_x.push(profile.pfx_x + rng.gen_range(-0.15..0.15));
            pfx_z.push(profile.pfx_z + rng.gen_range(-0.15..0.15));
        }
    }

    DataFrame::new(vec![
        Column::new("pitch_type".into(), pitch_type),
        Column::new("game_date".into(), game_date),
        Column::new("release_speed".into(), release_speed),
        Column::new("description".into(), description),
        Column::new("zone".into(), zone),
        Column::new("pfx_x".into(), pfx_x),
        Column::new("pfx_z".into(), pfx_z),
    ])
}

/// Season stat entries shaped like the league stats API serves them,
/// rate stats preformatted as strings and all.
pub fn season_entries(
    player_id: u32,
    season: Season,
    domain: StatDomain,
) -> Vec<SeasonStatEntry> {
    let mut rng = rng_for("entries", player_id as u64, season as u64);
    let stat = match domain {
        StatDomain::Batting => {
            let ab = rng.gen_range(420i64..580);
            let hits = (ab as f64 * rng.gen_range(0.225..0.305)) as i64;
            let doubles = rng.gen_range(18i64..40);
            let triples = rng.gen_range(0i64..6);
            let hr = rng.gen_range(8i64..42);
            let bb = rng.gen_range(28i64..90);
            let so = rng.gen_range(70i64..180);
            let pa = ab + bb + rng.gen_range(4i64..12);
            let avg = hits as f64 / ab as f64;
            let obp = (hits + bb) as f64 / pa as f64;
            let singles = hits - doubles - triples - hr;
            let slg = (singles + 2 * doubles + 3 * triples + 4 * hr) as f64 / ab as f64;
            json!({
                "gamesPlayed": rng.gen_range(110i64..160),
                "plateAppearances": pa,
                "atBats": ab,
                "runs": rng.gen_range(45i64..110),
                "hits": hits,
                "doubles": doubles,
                "triples": triples,
                "homeRuns": hr,
                "rbi": rng.gen_range(40i64..115),
                "stolenBases": rng.gen_range(0i64..35),
                "baseOnBalls": bb,
                "strikeOuts": so,
                "avg": rate_string(avg),
                "obp": rate_string(obp),
                "slg": rate_string(slg),
                "ops": rate_string(obp + slg),
            })
        }
        StatDomain::Pitching => {
            let starts = rng.gen_range(22i64..33);
            let innings = starts as f64 * rng.gen_range(5.0..6.3);
            json!({
                "wins": rng.gen_range(6i64..18),
                "losses": rng.gen_range(3i64..13),
                "era": format!("{:.2}", rng.gen_range(2.40..4.80)),
                "gamesPlayed": starts,
                "gamesStarted": starts,
                "inningsPitched": format!("{:.1}", innings),
                "strikeOuts": (innings * rng.gen_range(0.8..1.3)) as i64,
                "baseOnBalls": (innings * rng.gen_range(0.2..0.4)) as i64,
                "whip": format!("{:.2}", rng.gen_range(0.95..1.45)),
            })
        }
    };

    let serde_json::Value::Object(stat) = stat else {
        unreachable!("stat literal is an object");
    };
    let (team_id, team_name, _) = team_for(player_id);
    vec![SeasonStatEntry {
        season: season.to_string(),
        game_type: Some("R".to_string()),
        player: Some(PlayerRef {
            id: player_id,
            full_name: display_name(player_id),
        }),
        team: Some(TeamRef {
            id: team_id,
            name: Some(team_name.to_string()),
        }),
        stat,
    }]
}

/// Rate stat in the API's preformatted style: ".268", "1.012".
fn rate_string(rate: f64) -> String {
    let formatted = format!("{rate:.3}");
    formatted
        .strip_prefix('0')
        .map(str::to_string)
        .unwrap_or(formatted)
}

/// League leaderboard covering the whole pool, sorted by WAR.
pub fn leaderboard(season: Season, domain: StatDomain) -> PolarsResult<DataFrame> {
    let ids = pool_ids();
    let mut rngs: Vec<StdRng> = ids
        .iter()
        .map(|id| rng_for(domain.as_str(), *id as u64, season as u64))
        .collect();

    let mut columns = vec![
        Column::new(
            "xMLBAMID".into(),
            ids.iter().map(|id| *id as i64).collect::<Vec<_>>(),
        ),
        Column::new(
            "PlayerName".into(),
            ids.iter().map(|id| display_name(*id)).collect::<Vec<_>>(),
        ),
        Column::new(
            "Team".into(),
            ids.iter().map(|id| team_for(*id).2).collect::<Vec<_>>(),
        ),
    ];

    match domain {
        StatDomain::Pitching => {
            let k_pct = float_draw(&mut rngs, 0.17, 0.34);
            let bb_pct = float_draw(&mut rngs, 0.04, 0.11);
            let k_bb: Vec<f64> = k_pct
                .iter()
                .zip(&bb_pct)
                .map(|(k, b)| ((k - b) * 1000.0).round() / 1000.0)
                .collect();
            columns.push(Column::new("W".into(), int_draw(&mut rngs, 4, 19)));
            columns.push(Column::new("L".into(), int_draw(&mut rngs, 2, 14)));
            columns.push(Column::new("ERA".into(), float_draw(&mut rngs, 2.2, 5.2)));
            columns.push(Column::new("G".into(), int_draw(&mut rngs, 20, 34)));
            columns.push(Column::new("GS".into(), int_draw(&mut rngs, 18, 33)));
            columns.push(Column::new("IP".into(), float_draw(&mut rngs, 95.0, 205.0)));
            columns.push(Column::new("SO".into(), int_draw(&mut rngs, 110, 250)));
            columns.push(Column::new("WHIP".into(), float_draw(&mut rngs, 0.95, 1.45)));
            columns.push(Column::new("BABIP".into(), float_draw(&mut rngs, 0.260, 0.320)));
            columns.push(Column::new("LOB%".into(), float_draw(&mut rngs, 0.66, 0.82)));
            columns.push(Column::new("K%".into(), k_pct));
            columns.push(Column::new("BB%".into(), bb_pct));
            columns.push(Column::new("K-BB%".into(), k_bb));
            columns.push(Column::new("HR/9".into(), float_draw(&mut rngs, 0.6, 1.6)));
            columns.push(Column::new("FIP".into(), float_draw(&mut rngs, 2.5, 4.9)));
            columns.push(Column::new("xFIP".into(), float_draw(&mut rngs, 2.8, 4.7)));
            columns.push(Column::new("SIERA".into(), float_draw(&mut rngs, 2.9, 4.6)));
            columns.push(Column::new("CSW%".into(), float_draw(&mut rngs, 0.24, 0.34)));
            columns.push(Column::new("WAR".into(), float_draw(&mut rngs, 0.2, 6.8)));
        }
        StatDomain::Batting => {
            columns.push(Column::new("PA".into(), int_draw(&mut rngs, 380, 700)));
            columns.push(Column::new("BB%".into(), float_draw(&mut rngs, 0.04, 0.16)));
            columns.push(Column::new("K%".into(), float_draw(&mut rngs, 0.12, 0.31)));
            columns.push(Column::new("ISO".into(), float_draw(&mut rngs, 0.090, 0.310)));
            columns.push(Column::new("BABIP".into(), float_draw(&mut rngs, 0.255, 0.350)));
            columns.push(Column::new("wOBA".into(), float_draw(&mut rngs, 0.290, 0.405)));
            columns.push(Column::new("wRC+".into(), int_draw(&mut rngs, 78, 172)));
            columns.push(Column::new("EV".into(), float_draw(&mut rngs, 86.0, 94.5)));
            columns.push(Column::new("Barrel%".into(), float_draw(&mut rngs, 0.04, 0.18)));
            columns.push(Column::new("HardHit%".into(), float_draw(&mut rngs, 0.30, 0.55)));
            columns.push(Column::new("WAR".into(), float_draw(&mut rngs, 0.0, 7.5)));
        }
    }

    DataFrame::new(columns)?.sort(
        ["WAR"],
        SortMultipleOptions::default().with_order_descending(true),
    )
}

fn int_draw(rngs: &mut [StdRng], lo: i64, hi: i64) -> Vec<i64> {
    rngs.iter_mut().map(|r| r.gen_range(lo..hi)).collect()
}

fn float_draw(rngs: &mut [StdRng], lo: f64, hi: f64) -> Vec<f64> {
    rngs.iter_mut()
        .map(|r| (r.gen_range(lo..hi) * 1000.0).round() / 1000.0)
        .collect()
}

/// Situational splits the way the scrape client would deliver them.
pub fn splits_table(bbref_id: &str, season: Season, domain: StatDomain) -> PolarsResult<DataFrame> {
    let mut rng = StdRng::seed_from_u64(seed(bbref_id, season as u64, 0));
    let labels = ["vs RHP", "vs LHP", "Home", "Away", "1st Half", "2nd Half"];
    let n = labels.len();

    let games = int_cells(&mut rng, n, 28, 85);
    let pa = int_cells(&mut rng, n, 90, 330);
    let ab = int_cells(&mut rng, n, 80, 300);
    let hits = int_cells(&mut rng, n, 20, 90);
    let hr = int_cells(&mut rng, n, 2, 18);
    let bb = int_cells(&mut rng, n, 8, 40);
    let so = int_cells(&mut rng, n, 18, 80);
    let ba = rate_cells(&mut rng, n, 0.210, 0.330);
    let obp = rate_cells(&mut rng, n, 0.280, 0.400);
    let slg = rate_cells(&mut rng, n, 0.330, 0.560);
    let ops: Vec<f64> = obp
        .iter()
        .zip(&slg)
        .map(|(o, s)| ((o + s) * 1000.0).round() / 1000.0)
        .collect();
    let runs = int_cells(&mut rng, n, 10, 55);
    let doubles = int_cells(&mut rng, n, 4, 22);
    let rbi = int_cells(&mut rng, n, 10, 60);

    let mut columns = vec![
        Column::new("Split".into(), labels.to_vec()),
        Column::new("G".into(), games),
        Column::new("PA".into(), pa),
        Column::new("AB".into(), ab),
    ];
    if domain == StatDomain::Batting {
        columns.push(Column::new("R".into(), runs));
    }
    columns.push(Column::new("H".into(), hits));
    if domain == StatDomain::Batting {
        columns.push(Column::new("2B".into(), doubles));
    }
    columns.push(Column::new("HR".into(), hr));
    if domain == StatDomain::Batting {
        columns.push(Column::new("RBI".into(), rbi));
    }
    columns.push(Column::new("BB".into(), bb));
    columns.push(Column::new("SO".into(), so));
    columns.push(Column::new("BA".into(), ba));
    columns.push(Column::new("OBP".into(), obp));
    columns.push(Column::new("SLG".into(), slg));
    columns.push(Column::new("OPS".into(), ops));
    DataFrame::new(columns)
}

fn int_cells(rng: &mut StdRng, n: usize, lo: i64, hi: i64) -> Vec<i64> {
    (0..n).map(|_| rng.gen_range(lo..hi)).collect()
}

fn rate_cells(rng: &mut StdRng, n: usize, lo: f64, hi: f64) -> Vec<f64> {
    (0..n)
        .map(|_| (rng.gen_range(lo..hi) * 1000.0).round() / 1000.0)
        .collect()
}

/// Game results for a club season.
pub fn schedule(team_abbreviation: &str, season: Season) -> PolarsResult<DataFrame> {
    let mut rng = StdRng::seed_from_u64(seed(team_abbreviation, season as u64, 1));
    let opener = NaiveDate::from_ymd_opt(season as i32, 3, 28).unwrap();
    let opponents: Vec<&str> = TEAMS
        .iter()
        .map(|(_, _, abbr)| *abbr)
        .filter(|abbr| !abbr.eq_ignore_ascii_case(team_abbreviation))
        .collect();

    let games = 30usize;
    let mut dates = Vec::with_capacity(games);
    let mut opps = Vec::with_capacity(games);
    let mut results = Vec::with_capacity(games);
    let mut runs = Vec::with_capacity(games);
    let mut runs_allowed = Vec::with_capacity(games);
    let mut record = Vec::with_capacity(games);
    let (mut wins, mut losses) = (0u32, 0u32);

    for g in 0..games {
        let date = opener + Duration::days(g as i64 * 2);
        dates.push(date.format("%Y-%m-%d").to_string());
        opps.push(opponents[g % opponents.len()]);
        let mut r = rng.gen_range(0i64..11);
        let ra = rng.gen_range(0i64..11);
        if r == ra {
            r += 1;
        }
        let won = r > ra;
        if won {
            wins += 1;
        } else {
            losses += 1;
        }
        results.push(if won { "W" } else { "L" });
        runs.push(r);
        runs_allowed.push(ra);
        record.push(format!("{wins}-{losses}"));
    }

    DataFrame::new(vec![
        Column::new("Date".into(), dates),
        Column::new("Opp".into(), opps),
        Column::new("W/L".into(), results),
        Column::new("R".into(), runs),
        Column::new("RA".into(), runs_allowed),
        Column::new("W-L".into(), record),
    ])
}

/// Striped placeholder image standing in for a headshot or logo.
pub fn placeholder_image(label: &str, key: u32, width: u32, height: u32) -> DynamicImage {
    let mut rng = rng_for(label, key as u64, 2);
    let base = Rgb([
        rng.gen_range(50u8..190),
        rng.gen_range(50u8..190),
        rng.gen_range(50u8..190),
    ]);
    let dim = Rgb([base.0[0] / 2, base.0[1] / 2, base.0[2] / 2]);
    let img = RgbImage::from_fn(width, height, |x, y| {
        if (x + y) % 24 < 12 {
            base
        } else {
            dim
        }
    });
    DynamicImage::ImageRgb8(img)
}

// ── trait impls ─────────────────────────────────────────────────────────────

/// Offline implementation of every provider trait.
pub struct SampleSources;

impl StatsApi for SampleSources {
    fn season_entries(
        &self,
        player_id: u32,
        season: Season,
        domain: StatDomain,
    ) -> Result<Vec<SeasonStatEntry>, ProviderError> {
        Ok(season_entries(player_id, season, domain))
    }

    fn person(&self, player_id: u32) -> Result<PersonRecord, ProviderError> {
        let mut rng = rng_for("person", player_id as u64, 3);
        let n = pool_index(player_id);
        Ok(PersonRecord {
            id: player_id,
            full_name: display_name(player_id),
            primary_number: Some(format!("{}", 10 + n)),
            birth_date: None,
            current_age: Some(rng.gen_range(22u32..35)),
            height: Some(format!("6' {}\"", rng.gen_range(0u32..6))),
            weight: Some(rng.gen_range(175u32..245)),
            primary_position: Some(position_for(player_id).to_string()),
            bat_side: Some(if n % 4 == 0 { "L" } else { "R" }.to_string()),
            pitch_hand: Some(if n % 3 == 0 { "L" } else { "R" }.to_string()),
            current_team_id: Some(team_for(player_id).0),
        })
    }

    fn search_people(&self, name: &str) -> Result<Vec<PlayerSearchHit>, ProviderError> {
        let id = id_for_name(name);
        Ok(vec![PlayerSearchHit {
            id,
            full_name: name.to_string(),
            primary_position: Some(position_for(id).to_string()),
            current_team_id: Some(team_for(id).0),
        }])
    }

    fn team(&self, team_id: u32) -> Result<TeamRecord, ProviderError> {
        TEAMS
            .iter()
            .find(|(id, _, _)| *id == team_id)
            .map(|(id, name, abbr)| team_record(*id, name, abbr))
            .ok_or(ProviderError::NotFound {
                entity: "team",
                key: team_id.to_string(),
            })
    }

    fn teams(&self, _season: Season) -> Result<Vec<TeamRecord>, ProviderError> {
        Ok(TEAMS
            .iter()
            .map(|(id, name, abbr)| team_record(*id, name, abbr))
            .collect())
    }

    fn active_roster(
        &self,
        team_id: u32,
        _season: Season,
    ) -> Result<Vec<RosterEntry>, ProviderError> {
        let entries = pool_ids()
            .into_iter()
            .filter(|id| team_for(*id).0 == team_id)
            .map(|id| RosterEntry {
                player_id: id,
                full_name: display_name(id),
                jersey_number: Some(format!("{}", 10 + pool_index(id))),
                position: Some(position_for(id).to_string()),
            })
            .collect();
        Ok(entries)
    }

    fn active_roster_text(&self, team_id: u32, season: Season) -> Result<String, ProviderError> {
        Ok(format_roster_text(&self.active_roster(team_id, season)?))
    }
}

fn team_record(id: u32, name: &str, abbr: &str) -> TeamRecord {
    TeamRecord {
        id,
        name: name.to_string(),
        abbreviation: abbr.to_string(),
        location_name: None,
        venue_name: None,
        league_name: Some("Sample League".to_string()),
        division_name: None,
    }
}

impl LeaderboardSource for SampleSources {
    fn season_leaderboard(
        &self,
        season: Season,
        domain: StatDomain,
    ) -> Result<DataFrame, ProviderError> {
        Ok(leaderboard(season, domain)?)
    }

    fn team_season_stats(
        &self,
        start_season: Season,
        _end_season: Season,
        domain: StatDomain,
    ) -> Result<DataFrame, ProviderError> {
        let mut rngs: Vec<StdRng> = TEAMS
            .iter()
            .map(|(id, _, _)| rng_for(domain.as_str(), *id as u64, start_season as u64))
            .collect();
        let wins = int_draw(&mut rngs, 62, 102);
        let war: Vec<f64> = rngs
            .iter_mut()
            .map(|r| (r.gen_range(8.0f64..45.0) * 10.0).round() / 10.0)
            .collect();
        let df = DataFrame::new(vec![
            Column::new(
                "Team".into(),
                TEAMS.iter().map(|(_, _, abbr)| *abbr).collect::<Vec<_>>(),
            ),
            Column::new(
                "TeamName".into(),
                TEAMS.iter().map(|(_, name, _)| *name).collect::<Vec<_>>(),
            ),
            Column::new("W".into(), wins.clone()),
            Column::new(
                "L".into(),
                wins.iter().map(|w| 162 - w).collect::<Vec<_>>(),
            ),
            Column::new("WAR".into(), war),
        ])?;
        Ok(df)
    }
}

impl StatcastSource for SampleSources {
    fn pitcher_events(
        &self,
        player_id: u32,
        start_date: &str,
        _end_date: &str,
    ) -> Result<DataFrame, ProviderError> {
        Ok(pitch_events(player_id, season_of(start_date))?)
    }

    fn batter_events(
        &self,
        player_id: u32,
        start_date: &str,
        _end_date: &str,
    ) -> Result<DataFrame, ProviderError> {
        // Batters see another pitcher's stuff; reuse the generator with a
        // shifted key so the frames differ from the player's own pitching.
        Ok(pitch_events(player_id.wrapping_add(7), season_of(start_date))?)
    }
}

fn season_of(date: &str) -> Season {
    date.get(..4).and_then(|y| y.parse().ok()).unwrap_or(2024)
}

impl SplitsSource for SampleSources {
    fn splits(
        &self,
        bbref_id: &str,
        season: Season,
        domain: StatDomain,
    ) -> Result<Option<DataFrame>, ProviderError> {
        Ok(Some(splits_table(bbref_id, season, domain)?))
    }

    fn reverse_lookup(&self, player_id: u32) -> Result<Option<String>, ProviderError> {
        Ok(Some(bbref_style_id(player_id)))
    }

    fn schedule_and_record(
        &self,
        team_abbreviation: &str,
        season: Season,
    ) -> Result<DataFrame, ProviderError> {
        Ok(schedule(team_abbreviation, season)?)
    }
}

impl MediaSource for SampleSources {
    fn headshot(&self, player_id: u32) -> Result<DynamicImage, ProviderError> {
        Ok(placeholder_image("headshot", player_id, 213, 240))
    }

    fn team_logo(&self, team_id: u32) -> Result<DynamicImage, ProviderError> {
        Ok(placeholder_image("logo", team_id, 96, 96))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pitch_metrics;

    #[test]
    fn events_are_deterministic() {
        let a = pitch_events(900_001, 2024).unwrap();
        let b = pitch_events(900_001, 2024).unwrap();
        assert!(a.equals(&b));
        let c = pitch_events(900_002, 2024).unwrap();
        assert!(!a.equals(&c));
    }

    #[test]
    fn events_annotate_cleanly() {
        let df = pitch_events(900_003, 2024).unwrap();
        let annotated = pitch_metrics::annotate(df).unwrap();
        assert!(annotated.column("chase").is_ok());
        assert!(annotated.height() > 1000);
    }

    #[test]
    fn name_lookup_lands_in_the_pool() {
        let id = id_for_name("Paul Skenes");
        assert!(pool_ids().contains(&id));
        assert_eq!(id, id_for_name("Paul Skenes"));
    }

    #[test]
    fn leaderboard_covers_every_pool_player() {
        let board = leaderboard(2024, StatDomain::Pitching).unwrap();
        assert_eq!(board.height() as u32, POOL_SIZE);
        let ids = board.column("xMLBAMID").unwrap().i64().unwrap();
        for id in pool_ids() {
            assert!(ids.into_iter().flatten().any(|v| v == id as i64));
        }
    }

    #[test]
    fn entries_flatten_against_default_columns() {
        let entries = season_entries(900_004, 2024, StatDomain::Batting);
        let flat = crate::reconcile::flatten_season_entries(&entries).unwrap();
        for col in crate::config::StatColumns::default().batting.standard.iter() {
            assert!(flat.column(col).is_ok(), "missing {col}");
        }
    }

    #[test]
    fn rate_strings_drop_the_leading_zero() {
        assert_eq!(rate_string(0.268), ".268");
        assert_eq!(rate_string(1.012), "1.012");
    }

    #[test]
    fn every_pool_player_has_a_distinct_name() {
        let mut names: Vec<String> = pool_ids().into_iter().map(display_name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len() as u32, POOL_SIZE);
    }
}
