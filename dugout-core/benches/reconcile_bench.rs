//! Criterion benchmarks for the stat-shaping hot paths.
//!
//! Benchmarks:
//! 1. Season entry flattening (dynamic stat bags into typed frames)
//! 2. Configured-column projection
//! 3. Leaderboard row filtering
//! 4. Pitch event annotation (derived swing/whiff/zone/chase columns)

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use polars::prelude::*;
use serde_json::json;

use dugout_core::pitch_metrics::annotate;
use dugout_core::providers::SeasonStatEntry;
use dugout_core::reconcile::{
    flatten_season_entries, player_leaderboard_row, select_configured, LEADERBOARD_ID_COL,
};

// ── Helpers ──────────────────────────────────────────────────────────

/// One season entry per year, with the stat-key mix the league API sends:
/// whole counts, floats, and preformatted rate strings.
fn make_entries(n: usize) -> Vec<SeasonStatEntry> {
    (0..n)
        .map(|i| {
            serde_json::from_value(json!({
                "season": format!("{}", 2000 + i),
                "gameType": "R",
                "player": {"id": 545361, "fullName": "Bench Batter"},
                "stat": {
                    "gamesPlayed": 140 + (i % 20),
                    "homeRuns": 20 + (i % 30),
                    "rbi": 70 + (i % 60),
                    "stolenBases": i % 40,
                    "avg": format!(".{:03}", 250 + (i * 7) % 80),
                    "obp": format!(".{:03}", 330 + (i * 5) % 80),
                    "slg": format!(".{:03}", 420 + (i * 11) % 180),
                    "ops": format!("{:.3}", 0.750 + (i as f64 % 10.0) / 40.0),
                    "strikeOuts": 90 + (i % 80),
                    "baseOnBalls": 40 + (i % 60),
                }
            }))
            .unwrap()
        })
        .collect()
}

/// Leaderboard frame with `n` qualifying players.
fn make_board(n: usize) -> DataFrame {
    let ids: Vec<i64> = (0..n as i64).map(|i| 600_000 + i).collect();
    let war: Vec<f64> = (0..n).map(|i| (i as f64 * 0.37).sin() * 4.0 + 2.0).collect();
    let xwoba: Vec<f64> = (0..n).map(|i| 0.300 + (i as f64 * 0.13).cos() * 0.05).collect();
    let k_pct: Vec<f64> = (0..n).map(|i| 0.18 + (i as f64 * 0.29).sin() * 0.08).collect();
    df!(
        LEADERBOARD_ID_COL => ids,
        "WAR" => war,
        "xwOBA" => xwoba,
        "K%" => k_pct,
    )
    .unwrap()
}

/// Pitch event frame with `n` rows in the export vocabulary.
fn make_events(n: usize) -> DataFrame {
    const DESCRIPTIONS: [&str; 6] = [
        "called_strike",
        "ball",
        "foul",
        "hit_into_play",
        "swinging_strike",
        "blocked_ball",
    ];
    const TYPES: [&str; 4] = ["FF", "SL", "CH", "CU"];
    let description: Vec<&str> = (0..n).map(|i| DESCRIPTIONS[i % 6]).collect();
    let pitch_type: Vec<&str> = (0..n).map(|i| TYPES[i % 4]).collect();
    let zone: Vec<Option<i64>> = (0..n)
        .map(|i| if i % 17 == 0 { None } else { Some((i as i64 % 14) + 1) })
        .collect();
    let pfx_x: Vec<f64> = (0..n).map(|i| (i as f64 * 0.41).sin() * 1.2).collect();
    let pfx_z: Vec<f64> = (0..n).map(|i| (i as f64 * 0.23).cos() * 1.5).collect();
    df!(
        "pitch_type" => pitch_type,
        "description" => description,
        "zone" => zone,
        "pfx_x" => pfx_x,
        "pfx_z" => pfx_z,
    )
    .unwrap()
}

// ── 1. Season entry flattening ───────────────────────────────────────

fn bench_flatten(c: &mut Criterion) {
    let mut group = c.benchmark_group("flatten_season_entries");

    for &n in &[1usize, 5, 25] {
        let entries = make_entries(n);
        group.bench_with_input(BenchmarkId::new("seasons", n), &n, |b, _| {
            b.iter(|| flatten_season_entries(black_box(&entries)).unwrap());
        });
    }

    group.finish();
}

// ── 2. Configured-column projection ──────────────────────────────────

fn bench_select(c: &mut Criterion) {
    let mut group = c.benchmark_group("select_configured");

    let flat = flatten_season_entries(&make_entries(25)).unwrap();
    let configured: Vec<String> = [
        "season",
        "gamesPlayed",
        "homeRuns",
        "rbi",
        "avg",
        "obp",
        "slg",
        "notServed",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    group.bench_function("eight_of_wide_frame", |b| {
        b.iter(|| select_configured(black_box(&flat), black_box(&configured)).unwrap());
    });

    group.finish();
}

// ── 3. Leaderboard row filtering ─────────────────────────────────────

fn bench_board_row(c: &mut Criterion) {
    let mut group = c.benchmark_group("player_leaderboard_row");

    for &n in &[150usize, 600] {
        let board = make_board(n);
        // A player near the bottom of the board.
        let target = 600_000 + n as u32 - 3;
        group.bench_with_input(BenchmarkId::new("board_rows", n), &n, |b, _| {
            b.iter(|| player_leaderboard_row(black_box(&board), black_box(target)).unwrap());
        });
    }

    group.finish();
}

// ── 4. Pitch event annotation ────────────────────────────────────────

fn bench_annotate(c: &mut Criterion) {
    let mut group = c.benchmark_group("annotate_events");

    // ~A month of starts, and a full starter season.
    for &n in &[500usize, 3000] {
        let events = make_events(n);
        group.bench_with_input(BenchmarkId::new("pitches", n), &n, |b, _| {
            b.iter_batched(
                || events.clone(),
                |df| annotate(black_box(df)).unwrap(),
                criterion::BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_flatten,
    bench_select,
    bench_board_row,
    bench_annotate,
);
criterion_main!(benches);
