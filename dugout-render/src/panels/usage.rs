//! Rolling per-game usage share per pitch type.
//!
//! Pitches are grouped by game date, each game's share per type is
//! computed, and the shares are smoothed with a trailing mean over full
//! windows only. A season with fewer games than the window draws nothing.

use std::collections::BTreeMap;

use anyhow::{anyhow, Result};
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use tracing::debug;

use dugout_core::pitch_metrics;

use crate::panels::str_values;
use crate::style::{fonts_available, label_font, pitch_color, INK, RULE};

/// Most lines a panel will draw.
const MAX_TYPES: usize = 5;

pub struct UsagePanel<'a> {
    events: &'a polars::prelude::DataFrame,
    window: usize,
}

struct UsageSeries {
    window: usize,
    games: usize,
    y_top: f64,
    series: Vec<(String, Vec<f64>)>,
}

impl<'a> UsagePanel<'a> {
    pub fn new(events: &'a polars::prelude::DataFrame, window: usize) -> Self {
        Self { events, window }
    }

    pub fn render<DB: DrawingBackend>(&self, area: &DrawingArea<DB, Shift>) -> Result<()> {
        let Some(prep) = self.series() else {
            debug!("usage panel skipped: fewer games than the rolling window");
            return Ok(());
        };
        self.draw(area, &prep)
            .map_err(|e| anyhow!("usage panel: {e}"))
    }

    /// Rolled usage shares per type, `None` when the frame lacks the
    /// columns or the season is shorter than the window.
    fn series(&self) -> Option<UsageSeries> {
        let dates = str_values(self.events, "game_date")?;
        let types = str_values(self.events, "pitch_type")?;

        // ISO dates, so the BTreeMap iterates games in season order.
        let mut games: BTreeMap<String, BTreeMap<String, usize>> = BTreeMap::new();
        for (date, code) in dates.iter().zip(types.iter()) {
            let (Some(date), Some(code)) = (date, code) else {
                continue;
            };
            *games
                .entry(date.clone())
                .or_default()
                .entry(code.clone())
                .or_default() += 1;
        }
        if self.window == 0 || games.len() < self.window {
            return None;
        }

        let usage = pitch_metrics::pitch_types_by_usage(self.events).ok()?;
        let mut series = Vec::new();
        let mut peak = 0.0f64;
        for (code, _) in usage.into_iter().take(MAX_TYPES) {
            let shares: Vec<f64> = games
                .values()
                .map(|counts| {
                    let total: usize = counts.values().sum();
                    counts.get(&code).copied().unwrap_or(0) as f64 / total as f64
                })
                .collect();
            let rolled = rolling_mean(&shares, self.window);
            peak = peak.max(rolled.iter().copied().fold(0.0, f64::max));
            series.push((code, rolled));
        }
        if series.is_empty() {
            return None;
        }
        Some(UsageSeries {
            window: self.window,
            games: games.len(),
            y_top: (peak * 1.15).clamp(0.05, 1.0),
            series,
        })
    }

    fn draw<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        prep: &UsageSeries,
    ) -> std::result::Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
        let (width, height) = area.dim_in_pixel();
        if width < 100 || height < 60 {
            return Ok(());
        }
        let fonts = fonts_available();
        let (x_label, y_label) = if fonts { (18, 34) } else { (0, 0) };
        let first = prep.window as f64;
        let last = (prep.games as f64).max(first + 1.0);

        let mut chart = ChartBuilder::on(area)
            .margin(6)
            .x_label_area_size(x_label)
            .y_label_area_size(y_label)
            .build_cartesian_2d(first..last, 0f64..prep.y_top)?;

        if fonts {
            chart
                .configure_mesh()
                .disable_mesh()
                .x_labels(6)
                .y_labels(4)
                .x_label_formatter(&|v| format!("{v:.0}"))
                .y_label_formatter(&|v| format!("{:.0}%", v * 100.0))
                .axis_style(INK.mix(0.4).stroke_width(1))
                .label_style(label_font(10))
                .draw()?;
        }

        for (code, rolled) in &prep.series {
            let color = pitch_color(code);
            let series = chart.draw_series(LineSeries::new(
                rolled
                    .iter()
                    .enumerate()
                    .map(|(i, &v)| (first + i as f64, v)),
                color.stroke_width(2),
            ))?;
            if fonts {
                series.label(code.clone()).legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 14, y)], color.stroke_width(2))
                });
            }
        }

        if fonts {
            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperRight)
                .background_style(WHITE.mix(0.8).filled())
                .border_style(RULE.stroke_width(1))
                .label_font(label_font(10))
                .draw()?;
        }
        Ok(())
    }
}

/// Trailing mean over full windows only; `n - window + 1` points out.
fn rolling_mean(values: &[f64], window: usize) -> Vec<f64> {
    if window == 0 || values.len() < window {
        return Vec::new();
    }
    values
        .windows(window)
        .map(|w| w.iter().sum::<f64>() / window as f64)
        .collect()
}
