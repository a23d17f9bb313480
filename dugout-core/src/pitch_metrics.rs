//! Derived columns over pitch-level event frames.
//!
//! Event exports describe outcomes with result codes and locations with a
//! zone number (1-9 inside the strike zone, 11-14 outside) and movement in
//! feet. Charts and breakdown tables want booleans and inches, so
//! [`annotate`] adds:
//!
//! - `swing`, `whiff`: the description is in the matching code set
//! - `in_zone` (zone < 10), `out_zone` (zone > 10); null zones are neither
//! - `chase`: a swing at a pitch that was not in the zone
//! - `pfx_x`, `pfx_z` rescaled from feet to inches
//!
//! The rescale must happen exactly once, so an annotated frame refuses a
//! second pass.

use polars::prelude::*;
use thiserror::Error;

/// Result codes that count as a swing.
pub const SWING_CODES: [&str; 8] = [
    "foul_bunt",
    "foul",
    "hit_into_play",
    "swinging_strike",
    "foul_tip",
    "swinging_strike_blocked",
    "missed_bunt",
    "bunt_foul_tip",
];

/// Result codes that count as a swing-and-miss.
pub const WHIFF_CODES: [&str; 3] = ["swinging_strike", "foul_tip", "swinging_strike_blocked"];

/// Columns [`annotate`] needs in the incoming frame.
const REQUIRED_COLS: [&str; 4] = ["description", "zone", "pfx_x", "pfx_z"];

/// Sentinel column whose presence marks a frame as already annotated.
const SENTINEL_COL: &str = "swing";

#[derive(Debug, Error)]
pub enum PitchMetricsError {
    #[error("frame already carries derived pitch columns")]
    AlreadyAnnotated,
    #[error("event frame is missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error(transparent)]
    Frame(#[from] PolarsError),
}

/// Add the derived columns to an event frame. Row order is preserved and
/// every original column is kept; `pfx_x`/`pfx_z` are replaced in place
/// with their inch values.
pub fn annotate(df: DataFrame) -> Result<DataFrame, PitchMetricsError> {
    if df.column(SENTINEL_COL).is_ok() {
        return Err(PitchMetricsError::AlreadyAnnotated);
    }
    for required in REQUIRED_COLS {
        if df.column(required).is_err() {
            return Err(PitchMetricsError::MissingColumn(required));
        }
    }

    let swing = col("description")
        .is_in(lit(Series::new("swing_codes".into(), SWING_CODES.to_vec())))
        .fill_null(lit(false));
    let whiff = col("description")
        .is_in(lit(Series::new("whiff_codes".into(), WHIFF_CODES.to_vec())))
        .fill_null(lit(false));
    let in_zone = col("zone").lt(lit(10)).fill_null(lit(false));
    let out_zone = col("zone").gt(lit(10)).fill_null(lit(false));

    let out = df
        .lazy()
        .with_columns([
            swing.clone().alias("swing"),
            whiff.alias("whiff"),
            in_zone.clone().alias("in_zone"),
            out_zone.alias("out_zone"),
            swing.and(in_zone.not()).alias("chase"),
            (col("pfx_x") * lit(12.0)).alias("pfx_x"),
            (col("pfx_z") * lit(12.0)).alias("pfx_z"),
        ])
        .collect()?;
    Ok(out)
}

/// Distinct pitch types with their counts, heaviest usage first. Ties
/// break alphabetically so orderings are stable across runs.
pub fn pitch_types_by_usage(df: &DataFrame) -> Result<Vec<(String, usize)>, PitchMetricsError> {
    let types = df
        .column("pitch_type")
        .map_err(|_| PitchMetricsError::MissingColumn("pitch_type"))?
        .str()?;

    let mut counts = std::collections::BTreeMap::new();
    for value in types.into_iter().flatten() {
        *counts.entry(value.to_string()).or_insert(0usize) += 1;
    }
    let mut ordered: Vec<(String, usize)> = counts.into_iter().collect();
    ordered.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    Ok(ordered)
}


#[cfg(test)]
mod prop_tests {
    use super::*;
    use proptest::prelude::*;

    const DESCRIPTIONS: [&str; 12] = [
        "foul_bunt",
        "foul",
        "hit_into_play",
        "swinging_strike",
        "foul_tip",
        "swinging_strike_blocked",
        "missed_bunt",
        "bunt_foul_tip",
        "ball",
        "called_strike",
        "blocked_ball",
        "hit_by_pitch",
    ];

    proptest! {
        #[test]
        fn derived_flags_are_consistent(
            rows in proptest::collection::vec(
                (0usize..DESCRIPTIONS.len(), proptest::option::of(1i64..15)),
                1..40,
            )
        ) {
            let descriptions: Vec<&str> = rows.iter().map(|(d, _)| DESCRIPTIONS[*d]).collect();
            let zones: Vec<Option<i64>> = rows.iter().map(|(_, z)| *z).collect();
            let df = DataFrame::new(vec![
                Column::new("description".into(), descriptions.clone()),
                Column::new("zone".into(), zones.clone()),
                Column::new("pfx_x".into(), vec![0.5f64; rows.len()]),
                Column::new("pfx_z".into(), vec![-0.25f64; rows.len()]),
            ])
            .unwrap();

            let out = annotate(df).unwrap();
            for i in 0..rows.len() {
                let flag = |name: &str| {
                    out.column(name).unwrap().bool().unwrap().get(i).unwrap()
                };
                let swing = flag("swing");
                let whiff = flag("whiff");
                let in_zone = flag("in_zone");
                let out_zone = flag("out_zone");
                let chase = flag("chase");

                prop_assert_eq!(swing, SWING_CODES.contains(&descriptions[i]));
                prop_assert_eq!(whiff, WHIFF_CODES.contains(&descriptions[i]));
                prop_assert!(!whiff || swing);
                prop_assert_eq!(in_zone, zones[i].is_some_and(|z| z < 10));
                prop_assert_eq!(out_zone, zones[i].is_some_and(|z| z > 10));
                prop_assert!(!(in_zone && out_zone));
                prop_assert_eq!(chase, swing && !in_zone);
            }

            // A second pass must refuse rather than rescale again.
            prop_assert!(matches!(
                annotate(out),
                Err(PitchMetricsError::AlreadyAnnotated)
            ));
        }
    }
}
