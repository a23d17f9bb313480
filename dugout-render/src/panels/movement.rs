//! Pitch movement scatter: horizontal versus induced vertical break.
//!
//! Expects the annotated event frame, where `pfx_x` and `pfx_z` are
//! already in inches. One dot per pitch, colored by type, axes fixed at
//! plus or minus two feet so sheets compare across pitchers.

use anyhow::{anyhow, Result};
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use polars::prelude::*;
use tracing::debug;

use dugout_core::pitch_metrics;

use crate::panels::rows_for_pitch;
use crate::style::{fonts_available, label_font, pitch_color, INK, RULE};

/// Most pitch types a panel will plot.
const MAX_TYPES: usize = 5;
/// Fixed axis half-range, in inches of break.
const AXIS_RANGE_IN: f64 = 25.0;

pub struct MovementPanel<'a> {
    annotated: &'a DataFrame,
}

impl<'a> MovementPanel<'a> {
    pub fn new(annotated: &'a DataFrame) -> Self {
        Self { annotated }
    }

    pub fn render<DB: DrawingBackend>(&self, area: &DrawingArea<DB, Shift>) -> Result<()> {
        let Some(groups) = self.groups() else {
            debug!("movement panel skipped: no break measurements");
            return Ok(());
        };
        self.draw(area, &groups)
            .map_err(|e| anyhow!("movement panel: {e}"))
    }

    /// Break points grouped by pitch type in usage order. Points beyond
    /// the fixed axis range are dropped rather than drawn over neighbors.
    fn groups(&self) -> Option<Vec<(String, Vec<(f64, f64)>)>> {
        let usage = pitch_metrics::pitch_types_by_usage(self.annotated).ok()?;
        let mut groups = Vec::new();
        for (code, _) in usage.into_iter().take(MAX_TYPES) {
            let Some(rows) = rows_for_pitch(self.annotated, &code) else {
                continue;
            };
            let Some(points) = paired_breaks(&rows) else {
                continue;
            };
            if !points.is_empty() {
                groups.push((code, points));
            }
        }
        if groups.is_empty() {
            None
        } else {
            Some(groups)
        }
    }

    fn draw<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        groups: &[(String, Vec<(f64, f64)>)],
    ) -> std::result::Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
        let (width, height) = area.dim_in_pixel();
        if width < 100 || height < 80 {
            return Ok(());
        }
        let fonts = fonts_available();
        let (x_label, y_label) = if fonts { (18, 30) } else { (0, 0) };

        let mut chart = ChartBuilder::on(area)
            .margin(6)
            .x_label_area_size(x_label)
            .y_label_area_size(y_label)
            .build_cartesian_2d(-AXIS_RANGE_IN..AXIS_RANGE_IN, -AXIS_RANGE_IN..AXIS_RANGE_IN)?;

        if fonts {
            chart
                .configure_mesh()
                .disable_mesh()
                .x_labels(5)
                .y_labels(5)
                .x_label_formatter(&|v| format!("{v:.0}"))
                .y_label_formatter(&|v| format!("{v:.0}"))
                .axis_style(INK.mix(0.4).stroke_width(1))
                .label_style(label_font(10))
                .draw()?;
        }

        // Zero-break crosshair.
        chart.draw_series(std::iter::once(PathElement::new(
            vec![(-AXIS_RANGE_IN, 0.0), (AXIS_RANGE_IN, 0.0)],
            INK.mix(0.25).stroke_width(1),
        )))?;
        chart.draw_series(std::iter::once(PathElement::new(
            vec![(0.0, -AXIS_RANGE_IN), (0.0, AXIS_RANGE_IN)],
            INK.mix(0.25).stroke_width(1),
        )))?;

        for (code, points) in groups {
            let color = pitch_color(code);
            let series = chart.draw_series(
                points
                    .iter()
                    .map(|&(x, y)| Circle::new((x, y), 3, color.mix(0.6).filled())),
            )?;
            if fonts {
                series.label(code.clone()).legend(move |(x, y)| {
                    Circle::new((x + 7, y), 3, color.mix(0.8).filled())
                });
            }
        }

        if fonts {
            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::LowerRight)
                .background_style(WHITE.mix(0.8).filled())
                .border_style(RULE.stroke_width(1))
                .label_font(label_font(10))
                .draw()?;
        }
        Ok(())
    }
}

/// `(pfx_x, pfx_z)` pairs where both sides are present and on-axis.
fn paired_breaks(df: &DataFrame) -> Option<Vec<(f64, f64)>> {
    let xs = df.column("pfx_x").ok()?.cast(&DataType::Float64).ok()?;
    let zs = df.column("pfx_z").ok()?.cast(&DataType::Float64).ok()?;
    Some(
        xs.f64()
            .ok()?
            .into_iter()
            .zip(zs.f64().ok()?)
            .filter_map(|(x, z)| Some((x?, z?)))
            .filter(|(x, z)| x.abs() <= AXIS_RANGE_IN && z.abs() <= AXIS_RANGE_IN)
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairs_require_both_sides_and_stay_on_axis() {
        let df = df!(
            "pfx_x" => &[Some(6.0), None, Some(-8.5), Some(40.0)],
            "pfx_z" => &[Some(14.0), Some(9.0), Some(2.5), Some(10.0)],
        )
        .unwrap();
        let points = paired_breaks(&df).unwrap();
        assert_eq!(points, vec![(6.0, 14.0), (-8.5, 2.5)]);
    }

    #[test]
    fn groups_follow_usage_order() {
        let df = df!(
            "pitch_type" => &["SL", "FF", "FF", "FF", "SL", "FF"],
            "pfx_x" => &[2.0, -6.0, -7.0, -5.5, 3.0, -6.2],
            "pfx_z" => &[1.0, 15.0, 16.0, 14.5, 0.5, 15.5],
        )
        .unwrap();
        let groups = MovementPanel::new(&df).groups().unwrap();
        let codes: Vec<&str> = groups.iter().map(|(c, _)| c.as_str()).collect();
        assert_eq!(codes, vec!["FF", "SL"]);
        assert_eq!(groups[0].1.len(), 4);
    }

    #[test]
    fn renders_into_a_buffer_without_panic() {
        let df = df!(
            "pitch_type" => &["FF", "FF", "SL"],
            "pfx_x" => &[-6.0, -7.0, 3.0],
            "pfx_z" => &[15.0, 16.0, 1.0],
        )
        .unwrap();
        let mut buf = vec![0u8; 260 * 220 * 3];
        {
            let root = BitMapBackend::with_buffer(&mut buf, (260, 220)).into_drawing_area();
            root.fill(&WHITE).unwrap();
            MovementPanel::new(&df).render(&root).unwrap();
            root.present().unwrap();
        }
        assert!(buf.iter().any(|b| *b != 0));
    }

    #[test]
    fn frame_without_breaks_is_a_silent_skip() {
        let df = df!("pitch_type" => &["FF", "SL"]).unwrap();
        let mut buf = vec![0u8; 120 * 120 * 3];
        let root = BitMapBackend::with_buffer(&mut buf, (120, 120)).into_drawing_area();
        MovementPanel::new(&df).render(&root).unwrap();
    }
}
