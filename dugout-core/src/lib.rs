//! Dugout Core — entities, provider clients, stat reconciliation.
//!
//! Everything upstream of rendering lives here:
//! - Domain types (players, teams, stat domains and categories)
//! - Stat column configuration (which columns each table shows)
//! - Provider capability traits and their blocking HTTP clients
//! - The unified data client facade
//! - Reconciliation of provider payloads into per-player stat views
//! - Roster name extraction (structured preferred, free-text fallback)
//! - Derived pitch-level metrics (swing/whiff/zone/chase, movement rescale)
//! - Deterministic sample data for offline runs and tests

pub mod client;
pub mod config;
pub mod domain;
pub mod pitch_metrics;
pub mod providers;
pub mod reconcile;
pub mod roster;
pub mod sample;
