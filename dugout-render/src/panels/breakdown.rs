//! Per-pitch aggregate table, colored against the league reference.
//!
//! One row per pitch type in usage order: count, usage share, average
//! velocity, horizontal and induced vertical break, and whiff, zone, and
//! chase rates. Rate and velocity cells are tinted red above the league
//! figure and blue below it; cells with no defined value or no league
//! line stay ink. Expects the annotated event frame.

use anyhow::{anyhow, Result};
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use polars::prelude::*;
use tracing::debug;

use dugout_core::pitch_metrics;

use crate::league::LeagueAverages;
use crate::panels::{float_values, rows_for_pitch};
use crate::style::{centered_font, pitch_color, try_text, ABOVE_AVG, BELOW_AVG, HEADER_FILL, INK, RULE};
use crate::table::cell_font_size;

const TITLE_BAND: i32 = 24;
const MIN_ROW_H: i32 = 16;
const MAX_ROW_H: i32 = 30;
const HEADERS: [&str; 9] = [
    "Pitch", "#", "Use%", "Velo", "HB", "iVB", "Whiff%", "Zone%", "Chase%",
];
/// The name column gets three shares of the width; the rest get one each.
const NAME_COL_WEIGHT: i32 = 3;

pub struct BreakdownPanel<'a> {
    annotated: &'a DataFrame,
    league: &'a LeagueAverages,
}

/// Aggregates for one pitch type.
struct PitchLine {
    pitch_type: String,
    count: usize,
    usage_pct: f64,
    velocity: f64,
    h_break: f64,
    v_break: f64,
    /// NaN when the type drew no swings.
    whiff_pct: f64,
    zone_pct: f64,
    /// NaN when nothing was thrown out of the zone.
    chase_pct: f64,
}

enum Delta {
    Above,
    Below,
    Par,
}

impl<'a> BreakdownPanel<'a> {
    pub fn new(annotated: &'a DataFrame, league: &'a LeagueAverages) -> Self {
        Self { annotated, league }
    }

    pub fn render<DB: DrawingBackend>(&self, area: &DrawingArea<DB, Shift>) -> Result<()> {
        let Some(lines) = self.pitch_lines() else {
            debug!("breakdown panel skipped: no annotated pitches");
            return Ok(());
        };
        self.draw(area, &lines)
            .map_err(|e| anyhow!("breakdown table: {e}"))
    }

    /// One aggregate line per pitch type, usage order. `None` when the
    /// frame has no typed pitches or lacks the derived columns.
    fn pitch_lines(&self) -> Option<Vec<PitchLine>> {
        let usage = pitch_metrics::pitch_types_by_usage(self.annotated).ok()?;
        let total: usize = usage.iter().map(|(_, n)| n).sum();
        if total == 0 {
            return None;
        }
        let mut lines = Vec::new();
        for (code, count) in usage {
            let rows = rows_for_pitch(self.annotated, &code)?;
            let swings = true_count(&rows, "swing")?;
            let whiffs = true_count(&rows, "whiff")?;
            let in_zone = true_count(&rows, "in_zone")?;
            let out_zone = true_count(&rows, "out_zone")?;
            let chases = true_count(&rows, "chase")?;
            lines.push(PitchLine {
                count,
                usage_pct: count as f64 / total as f64 * 100.0,
                velocity: mean(&float_values(&rows, "release_speed")?),
                h_break: mean(&float_values(&rows, "pfx_x")?),
                v_break: mean(&float_values(&rows, "pfx_z")?),
                whiff_pct: ratio_pct(whiffs, swings),
                zone_pct: ratio_pct(in_zone, count),
                chase_pct: ratio_pct(chases, out_zone),
                pitch_type: code,
            });
        }
        Some(lines)
    }

    fn draw<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        lines: &[PitchLine],
    ) -> std::result::Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
        let (w, h) = area.dim_in_pixel();
        let (w, h) = (w as i32, h as i32);
        if w < 180 || h < TITLE_BAND + 2 * MIN_ROW_H {
            return Ok(());
        }

        try_text(area, "Pitch Breakdown", (w / 2, TITLE_BAND / 2), &centered_font(16));

        let edges = column_edges(w);
        let body_top = TITLE_BAND;
        let body_h = h - body_top;
        let max_rows = ((body_h / MIN_ROW_H) - 1).max(0) as usize;
        let nrows = lines.len().min(max_rows);
        if nrows == 0 {
            return Ok(());
        }
        let row_h = (body_h / (nrows as i32 + 1)).clamp(MIN_ROW_H, MAX_ROW_H);
        let narrow_w = edges[2] - edges[1];
        let font = centered_font(cell_font_size(narrow_w, row_h));

        area.draw(&Rectangle::new(
            [(0, body_top), (w, body_top + row_h)],
            HEADER_FILL.filled(),
        ))?;
        for (ci, header) in HEADERS.iter().enumerate() {
            let cx = (edges[ci] + edges[ci + 1]) / 2;
            try_text(area, header, (cx, body_top + row_h / 2), &font);
        }

        for (ri, line) in lines.iter().take(nrows).enumerate() {
            let y = body_top + (ri as i32 + 1) * row_h;
            area.draw(&PathElement::new(vec![(0, y), (w, y)], RULE.stroke_width(1)))?;
            for (ci, (text, color)) in self.cells(line).iter().enumerate() {
                let cx = (edges[ci] + edges[ci + 1]) / 2;
                let style = font.color(color);
                try_text(area, text, (cx, y + row_h / 2), &style);
            }
        }
        let bottom = body_top + (nrows as i32 + 1) * row_h;
        area.draw(&PathElement::new(
            vec![(0, bottom), (w, bottom)],
            RULE.stroke_width(1),
        ))?;
        Ok(())
    }

    /// Text and ink color for each cell of one row.
    fn cells(&self, line: &PitchLine) -> [(String, RGBColor); 9] {
        let reference = self.league.for_pitch(&line.pitch_type);
        let name = match &reference {
            Some(league) => format!("{} {}", line.pitch_type, league.pitch_name),
            None => line.pitch_type.clone(),
        };
        [
            (name, pitch_color(&line.pitch_type)),
            (format!("{}", line.count), INK),
            (fmt1(line.usage_pct), INK),
            (
                fmt1(line.velocity),
                delta_color(compare(line.velocity, reference.as_ref().map(|l| l.velocity))),
            ),
            (fmt1(line.h_break), INK),
            (fmt1(line.v_break), INK),
            (
                fmt1(line.whiff_pct),
                delta_color(compare(line.whiff_pct, reference.as_ref().map(|l| l.whiff_pct))),
            ),
            (
                fmt1(line.zone_pct),
                delta_color(compare(line.zone_pct, reference.as_ref().map(|l| l.zone_pct))),
            ),
            (
                fmt1(line.chase_pct),
                delta_color(compare(line.chase_pct, reference.as_ref().map(|l| l.chase_pct))),
            ),
        ]
    }
}

/// Pixel x at each column boundary; the name column is weighted wider.
fn column_edges(width: i32) -> [i32; 10] {
    let total = NAME_COL_WEIGHT + (HEADERS.len() as i32 - 1);
    let mut edges = [0i32; 10];
    let mut acc = 0;
    for i in 0..HEADERS.len() {
        acc += if i == 0 { NAME_COL_WEIGHT } else { 1 };
        edges[i + 1] = width * acc / total;
    }
    edges
}

fn true_count(df: &DataFrame, name: &str) -> Option<usize> {
    let mask = df.column(name).ok()?.bool().ok()?;
    Some(mask.into_iter().flatten().filter(|v| *v).count())
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        f64::NAN
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Percent ratio, NaN on an empty denominator so the cell prints `-`.
fn ratio_pct(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        f64::NAN
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

fn fmt1(value: f64) -> String {
    if value.is_finite() {
        format!("{value:.1}")
    } else {
        "-".to_string()
    }
}

fn compare(value: f64, reference: Option<f64>) -> Delta {
    match reference {
        Some(r) if value.is_finite() && value > r => Delta::Above,
        Some(r) if value.is_finite() && value < r => Delta::Below,
        _ => Delta::Par,
    }
}

fn delta_color(delta: Delta) -> RGBColor {
    match delta {
        Delta::Above => ABOVE_AVG,
        Delta::Below => BELOW_AVG,
        Delta::Par => INK,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper: a hand-annotated frame, two types.
    fn annotated() -> DataFrame {
        df!(
            "pitch_type" => &["FF", "FF", "FF", "FF", "SL", "SL"],
            "release_speed" => &[95.0, 96.0, 94.0, 95.0, 86.0, 84.0],
            "pfx_x" => &[-6.0, -7.0, -6.5, -6.5, 3.0, 2.0],
            "pfx_z" => &[15.0, 16.0, 15.5, 15.5, 1.0, 2.0],
            "swing" => &[true, true, false, false, true, false],
            "whiff" => &[true, false, false, false, true, false],
            "in_zone" => &[true, true, false, false, false, false],
            "out_zone" => &[false, false, true, true, true, true],
            "chase" => &[false, false, false, false, true, false],
        )
        .unwrap()
    }

    #[test]
    fn lines_aggregate_counts_and_rates() {
        let league = LeagueAverages::load_bundled().unwrap();
        let frame = annotated();
        let lines = BreakdownPanel::new(&frame, &league).pitch_lines().unwrap();
        assert_eq!(lines.len(), 2);

        let ff = &lines[0];
        assert_eq!(ff.pitch_type, "FF");
        assert_eq!(ff.count, 4);
        assert!((ff.usage_pct - 4.0 / 6.0 * 100.0).abs() < 1e-9);
        assert!((ff.velocity - 95.0).abs() < 1e-9);
        assert!((ff.whiff_pct - 50.0).abs() < 1e-9);
        assert!((ff.zone_pct - 50.0).abs() < 1e-9);
        assert!((ff.chase_pct - 0.0).abs() < 1e-9);

        let sl = &lines[1];
        assert!((sl.whiff_pct - 100.0).abs() < 1e-9);
        assert!((sl.chase_pct - 50.0).abs() < 1e-9);
    }

    #[test]
    fn empty_denominators_become_dashes() {
        assert!(ratio_pct(0, 0).is_nan());
        assert_eq!(fmt1(f64::NAN), "-");
        assert_eq!(fmt1(33.333), "33.3");
    }

    #[test]
    fn comparison_tints_only_defined_values() {
        assert!(matches!(compare(95.0, Some(94.3)), Delta::Above));
        assert!(matches!(compare(90.0, Some(94.3)), Delta::Below));
        assert!(matches!(compare(94.3, Some(94.3)), Delta::Par));
        assert!(matches!(compare(f64::NAN, Some(94.3)), Delta::Par));
        assert!(matches!(compare(95.0, None), Delta::Par));
    }

    #[test]
    fn name_column_takes_three_shares() {
        let edges = column_edges(110);
        assert_eq!(edges[0], 0);
        assert_eq!(edges[1], 30);
        assert_eq!(edges[9], 110);
        assert_eq!(edges[2] - edges[1], 10);
    }

    #[test]
    fn renders_annotate_output_without_panic() {
        let league = LeagueAverages::load_bundled().unwrap();
        let raw = df!(
            "pitch_type" => &["FF", "FF", "SL", "SL"],
            "release_speed" => &[95.0, 96.0, 85.0, 86.0],
            "description" => &["swinging_strike", "ball", "hit_into_play", "called_strike"],
            "zone" => &[Some(5i64), Some(11), Some(13), None],
            "pfx_x" => &[-0.5, -0.55, 0.2, 0.25],
            "pfx_z" => &[1.3, 1.25, 0.1, 0.15],
        )
        .unwrap();
        let frame = pitch_metrics::annotate(raw).unwrap();
        let mut buf = vec![0u8; 560 * 200 * 3];
        {
            let root = BitMapBackend::with_buffer(&mut buf, (560, 200)).into_drawing_area();
            root.fill(&WHITE).unwrap();
            BreakdownPanel::new(&frame, &league).render(&root).unwrap();
            root.present().unwrap();
        }
        assert!(buf.iter().any(|b| *b != 0));
    }
}
