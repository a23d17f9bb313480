//! Integration tests: full sheets rendered from the offline sample pool.
//!
//! 1. A pitcher sheet fetches, renders, and writes exactly one PNG
//! 2. A batter sheet does the same on the shorter canvas
//! 3. An empty column configuration still produces a sheet
//! 4. Sheet data from the sample pool carries the pieces the panels need

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

use dugout_core::client::UnifiedDataClient;
use dugout_core::config::StatColumns;
use dugout_core::domain::Player;
use dugout_core::sample;
use dugout_render::league::LeagueAverages;
use dugout_render::sheet::{BatterSummarySheet, PitcherSummarySheet, SheetData, SheetKind};

static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

fn out_dir(tag: &str) -> PathBuf {
    let id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
    std::env::temp_dir().join(format!(
        "dugout_sheet_test_{tag}_{}_{id}",
        std::process::id()
    ))
}

fn sample_player() -> Player {
    let id = sample::id_for_name("Sample Starter");
    Player::new(id, sample::display_name(id))
}

/// Helper: fetch a complete bundle from the sample sources.
fn fetch(kind: SheetKind, columns: &StatColumns) -> SheetData {
    let client = UnifiedDataClient::sample();
    let mut data = SheetData::fetch(&client, sample_player(), 2024, kind, columns).unwrap();
    data.synthetic = true;
    data
}

fn png_magic(path: &PathBuf) -> [u8; 4] {
    let bytes = std::fs::read(path).unwrap();
    [bytes[0], bytes[1], bytes[2], bytes[3]]
}

#[test]
fn pitcher_sheet_renders_one_png() {
    let columns = StatColumns::default();
    let data = fetch(SheetKind::Pitcher, &columns);
    let league = LeagueAverages::load_bundled().unwrap();

    let dir = out_dir("pitcher");
    let _ = std::fs::remove_dir_all(&dir);

    let path = PitcherSummarySheet::new(&data, &league, &columns)
        .render_to(&dir)
        .unwrap();

    let name = path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.ends_with("_2024_pitcher.png"), "unexpected name {name}");
    assert_eq!(png_magic(&path), [0x89, b'P', b'N', b'G']);
    assert_eq!(std::fs::read_dir(&dir).unwrap().count(), 1);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn batter_sheet_renders_one_png() {
    let columns = StatColumns::default();
    let data = fetch(SheetKind::Batter, &columns);
    assert!(data.events.is_none(), "batter sheets fetch no pitch events");

    let dir = out_dir("batter");
    let _ = std::fs::remove_dir_all(&dir);

    let path = BatterSummarySheet::new(&data, &columns)
        .render_to(&dir)
        .unwrap();

    let name = path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.ends_with("_2024_batter.png"), "unexpected name {name}");
    assert_eq!(png_magic(&path), [0x89, b'P', b'N', b'G']);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn unconfigured_columns_still_produce_a_sheet() {
    // Every table view is absent, but chrome and charts stand alone.
    let columns = StatColumns::from_toml("").unwrap();
    let data = fetch(SheetKind::Pitcher, &columns);
    assert!(data.views.standard.is_absent());
    assert!(data.views.advanced.is_absent());

    let league = LeagueAverages::load_bundled().unwrap();
    let dir = out_dir("empty_columns");
    let _ = std::fs::remove_dir_all(&dir);

    let path = PitcherSummarySheet::new(&data, &league, &columns)
        .render_to(&dir)
        .unwrap();
    assert_eq!(png_magic(&path), [0x89, b'P', b'N', b'G']);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn sample_bundle_carries_what_the_panels_need() {
    let columns = StatColumns::default();
    let data = fetch(SheetKind::Pitcher, &columns);

    assert!(data.views.standard.table().is_some());
    assert!(data.views.advanced.table().is_some());
    assert!(data.views.splits.table().is_some());

    let events = data.events.as_ref().expect("sample pitch events");
    assert!(events.height() > 100);
    for col in ["pitch_type", "game_date", "release_speed", "description"] {
        assert!(events.column(col).is_ok(), "events missing {col}");
    }

    assert!(data.bio.is_some());
    assert!(data.team.is_some());
    assert!(data.headshot.is_some());
    assert!(data.logo.is_some());
}
