//! Release-speed density ridges, one band per pitch type.
//!
//! Each band is a Gaussian kernel density of the pitcher's release speeds
//! for that pitch, with a vertical rule at the league-average velocity
//! when the reference table carries the type. Bands share one speed axis
//! so the arsenal reads top to bottom.

use anyhow::{anyhow, Result};
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use polars::prelude::*;
use tracing::debug;

use dugout_core::pitch_metrics;

use crate::league::LeagueAverages;
use crate::panels::{float_values, rows_for_pitch};
use crate::style::{fonts_available, label_font, pitch_color, try_text, INK};

/// Most bands a panel will draw.
const MAX_TYPES: usize = 5;
/// Minimum pitches of a type before its density is worth drawing.
const MIN_PITCHES: usize = 8;
/// Sample points along the shared speed axis.
const GRID_POINTS: usize = 120;
/// Horizontal padding past the observed speed range, in mph.
const SPEED_PAD_MPH: f64 = 2.0;

pub struct VelocityPanel<'a> {
    events: &'a DataFrame,
    league: &'a LeagueAverages,
}

struct Ridge {
    code: String,
    speeds: Vec<f64>,
    mean: f64,
    league_avg: Option<f64>,
}

impl<'a> VelocityPanel<'a> {
    pub fn new(events: &'a DataFrame, league: &'a LeagueAverages) -> Self {
        Self { events, league }
    }

    pub fn render<DB: DrawingBackend>(&self, area: &DrawingArea<DB, Shift>) -> Result<()> {
        let Some(ridges) = self.ridges() else {
            debug!("velocity panel skipped: no usable release speeds");
            return Ok(());
        };
        self.draw(area, &ridges)
            .map_err(|e| anyhow!("velocity panel: {e}"))
    }

    /// Densities to draw, ordered by usage. `None` when the frame has no
    /// pitch type with enough recorded speeds.
    fn ridges(&self) -> Option<Vec<Ridge>> {
        let usage = pitch_metrics::pitch_types_by_usage(self.events).ok()?;
        let mut ridges = Vec::new();
        for (code, count) in usage.into_iter().take(MAX_TYPES) {
            if count < MIN_PITCHES {
                continue;
            }
            let Some(rows) = rows_for_pitch(self.events, &code) else {
                continue;
            };
            let Some(speeds) = float_values(&rows, "release_speed") else {
                continue;
            };
            if speeds.len() < MIN_PITCHES {
                continue;
            }
            let mean = speeds.iter().sum::<f64>() / speeds.len() as f64;
            let league_avg = self.league.for_pitch(&code).map(|line| line.velocity);
            ridges.push(Ridge {
                code,
                speeds,
                mean,
                league_avg,
            });
        }
        if ridges.is_empty() {
            None
        } else {
            Some(ridges)
        }
    }

    fn draw<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        ridges: &[Ridge],
    ) -> std::result::Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
        let (width, height) = area.dim_in_pixel();
        if width < 80 || (height as usize) < ridges.len() * 20 {
            return Ok(());
        }

        let mut lo = f64::MAX;
        let mut hi = f64::MIN;
        for ridge in ridges {
            for &speed in &ridge.speeds {
                lo = lo.min(speed);
                hi = hi.max(speed);
            }
            if let Some(avg) = ridge.league_avg {
                lo = lo.min(avg);
                hi = hi.max(avg);
            }
        }
        let lo = lo - SPEED_PAD_MPH;
        let hi = hi + SPEED_PAD_MPH;
        let grid = speed_grid(lo, hi);

        let bands = area.split_evenly((ridges.len(), 1));
        for (i, ridge) in ridges.iter().enumerate() {
            let last = i == ridges.len() - 1;
            let density = gaussian_kde(&ridge.speeds, &grid);
            let peak = density.iter().copied().fold(0.0f64, f64::max);
            if !peak.is_finite() || peak <= 0.0 {
                continue;
            }
            let top = peak * 1.08;
            let label_area = if last && fonts_available() { 18 } else { 0 };

            let mut chart = ChartBuilder::on(&bands[i])
                .margin_left(4)
                .margin_right(4)
                .x_label_area_size(label_area)
                .build_cartesian_2d(lo..hi, 0f64..top)?;

            if last && fonts_available() {
                chart
                    .configure_mesh()
                    .disable_mesh()
                    .disable_y_axis()
                    .x_labels(6)
                    .x_label_formatter(&|v| format!("{v:.0}"))
                    .axis_style(INK.mix(0.4).stroke_width(1))
                    .label_style(label_font(10))
                    .draw()?;
            }

            let color = pitch_color(&ridge.code);
            chart.draw_series(
                AreaSeries::new(
                    grid.iter().zip(density.iter()).map(|(&x, &y)| (x, y)),
                    0.0,
                    color.mix(0.35).filled(),
                )
                .border_style(color.stroke_width(1)),
            )?;

            if let Some(avg) = ridge.league_avg {
                if avg > lo && avg < hi {
                    chart.draw_series(std::iter::once(PathElement::new(
                        vec![(avg, 0.0), (avg, top)],
                        INK.mix(0.55).stroke_width(1),
                    )))?;
                }
            }

            try_text(
                &bands[i],
                &format!("{} {:.1} mph", ridge.code, ridge.mean),
                (8, 2),
                &label_font(11),
            );
        }
        Ok(())
    }
}

fn speed_grid(lo: f64, hi: f64) -> Vec<f64> {
    let step = (hi - lo) / (GRID_POINTS - 1) as f64;
    (0..GRID_POINTS).map(|i| lo + step * i as f64).collect()
}

/// Gaussian kernel density over `grid`. Bandwidth is Silverman's rule
/// with a floor so a cluster of identical speeds still spreads.
fn gaussian_kde(samples: &[f64], grid: &[f64]) -> Vec<f64> {
    let n = samples.len() as f64;
    let mean = samples.iter().sum::<f64>() / n;
    let variance = samples.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    let bandwidth = (1.06 * variance.sqrt() * n.powf(-0.2)).max(0.25);
    let norm = 1.0 / (n * bandwidth * (2.0 * std::f64::consts::PI).sqrt());
    grid.iter()
        .map(|&x| {
            samples
                .iter()
                .map(|&s| (-0.5 * ((x - s) / bandwidth).powi(2)).exp())
                .sum::<f64>()
                * norm
        })
        .collect()
}
