//! Chart and chrome panels for the summary sheets.
//!
//! Analytic panels:
//! - Velocity: per-pitch-type release-speed density ridges
//! - Usage: rolling per-game usage share per pitch type
//! - Movement: horizontal vs vertical break scatter
//! - Breakdown: per-pitch aggregate table against league averages
//!
//! Chrome: header and footer bands, bio text, headshot and logo blits.
//!
//! Every panel follows the same contract: prepare its data from the frame
//! it was handed, and silently skip (with a debug log) when the columns it
//! needs are missing or empty. A panel never fails a sheet over absent
//! data; only backend draw errors propagate.

pub mod breakdown;
pub mod chrome;
pub mod movement;
pub mod usage;
pub mod velocity;

pub use breakdown::BreakdownPanel;
pub use movement::MovementPanel;
pub use usage::UsagePanel;
pub use velocity::VelocityPanel;

use polars::prelude::*;

/// Rows of `df` where `pitch_type` equals `code`.
pub(crate) fn rows_for_pitch(df: &DataFrame, code: &str) -> Option<DataFrame> {
    df.clone()
        .lazy()
        .filter(col("pitch_type").eq(lit(code)))
        .collect()
        .ok()
}

/// Non-null values of a float column, `None` when the column is missing
/// or not numeric.
pub(crate) fn float_values(df: &DataFrame, name: &str) -> Option<Vec<f64>> {
    let column = df.column(name).ok()?.cast(&DataType::Float64).ok()?;
    Some(column.f64().ok()?.into_iter().flatten().collect())
}

/// String values of a column with nulls preserved as `None` entries.
pub(crate) fn str_values(df: &DataFrame, name: &str) -> Option<Vec<Option<String>>> {
    Some(
        df.column(name)
            .ok()?
            .str()
            .ok()?
            .into_iter()
            .map(|v| v.map(str::to_string))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_values_skip_nulls_and_cast_ints() {
        let df = df!(
            "speed" => &[Some(95.0), None, Some(88.5)],
            "zone" => &[Some(5i64), Some(11), None],
        )
        .unwrap();
        assert_eq!(float_values(&df, "speed"), Some(vec![95.0, 88.5]));
        assert_eq!(float_values(&df, "zone"), Some(vec![5.0, 11.0]));
        assert_eq!(float_values(&df, "missing"), None);
    }

    #[test]
    fn rows_for_pitch_filters_exactly() {
        let df = df!(
            "pitch_type" => &["FF", "SL", "FF"],
            "release_speed" => &[97.0, 85.2, 96.1],
        )
        .unwrap();
        let ff = rows_for_pitch(&df, "FF").unwrap();
        assert_eq!(ff.height(), 2);
    }
}
