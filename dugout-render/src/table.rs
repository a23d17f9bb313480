//! DataFrame-to-table drawing.
//!
//! A [`StatTable`] draws one reconciled frame as a titled table: header
//! band, one row per frame row, rule lines between rows, values formatted
//! the way stat pages print them (rates as `.268`, whole numbers bare).
//! Rows that do not fit the region are dropped from the bottom.

use crate::style::{centered_font, try_text, HEADER_FILL, RULE};
use anyhow::anyhow;
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use polars::prelude::*;

const TITLE_BAND: i32 = 24;
const MIN_ROW_H: i32 = 16;
const MAX_ROW_H: i32 = 30;

pub struct StatTable<'a> {
    df: &'a DataFrame,
    title: &'a str,
}

impl<'a> StatTable<'a> {
    pub fn new(df: &'a DataFrame, title: &'a str) -> Self {
        Self { df, title }
    }

    pub fn render<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
    ) -> anyhow::Result<()> {
        self.draw(area)
            .map_err(|e| anyhow!("{} table: {e}", self.title))
    }

    fn draw<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
    ) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
        let (w, h) = area.dim_in_pixel();
        let (w, h) = (w as i32, h as i32);
        if self.df.height() == 0 || self.df.width() == 0 || w < 60 || h < TITLE_BAND + MIN_ROW_H {
            return Ok(());
        }

        try_text(area, self.title, (w / 2, TITLE_BAND / 2), &centered_font(16));

        let ncols = self.df.width() as i32;
        let col_w = w / ncols;
        let body_top = TITLE_BAND;
        let body_h = h - body_top;
        // Header takes one slot; data rows fill the rest, clipped to fit.
        let max_rows = ((body_h / MIN_ROW_H) - 1).max(0) as usize;
        let nrows = self.df.height().min(max_rows);
        if nrows == 0 {
            return Ok(());
        }
        let row_h = (body_h / (nrows as i32 + 1)).clamp(MIN_ROW_H, MAX_ROW_H);

        area.draw(&Rectangle::new(
            [(0, body_top), (w, body_top + row_h)],
            HEADER_FILL.filled(),
        ))?;

        let font = centered_font(cell_font_size(col_w, row_h));
        for (ci, name) in self.df.get_column_names().iter().enumerate() {
            let cx = ci as i32 * col_w + col_w / 2;
            try_text(area, name.as_str(), (cx, body_top + row_h / 2), &font);
        }

        let columns = self.df.get_columns();
        for ri in 0..nrows {
            let y = body_top + (ri as i32 + 1) * row_h;
            area.draw(&PathElement::new(vec![(0, y), (w, y)], RULE.stroke_width(1)))?;
            for (ci, column) in columns.iter().enumerate() {
                let text = column
                    .get(ri)
                    .map(|av| format_value(&av))
                    .unwrap_or_else(|_| "-".to_string());
                let cx = ci as i32 * col_w + col_w / 2;
                try_text(area, &text, (cx, y + row_h / 2), &font);
            }
        }
        let bottom = body_top + (nrows as i32 + 1) * row_h;
        area.draw(&PathElement::new(
            vec![(0, bottom), (w, bottom)],
            RULE.stroke_width(1),
        ))?;
        Ok(())
    }
}

/// Font size that keeps cell text inside narrow columns.
pub(crate) fn cell_font_size(col_w: i32, row_h: i32) -> u32 {
    let by_width = (col_w / 5).clamp(9, 14);
    let by_height = (row_h * 3 / 5).clamp(9, 14);
    by_width.min(by_height) as u32
}

/// Stat-page formatting for one cell value. Rates print as `.268`, whole
/// floats drop the fraction, strings pass through untouched.
pub(crate) fn format_value(av: &AnyValue) -> String {
    match av {
        AnyValue::Null => "-".to_string(),
        AnyValue::String(s) => (*s).to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::Boolean(b) => b.to_string(),
        AnyValue::Float64(f) => format_float(*f),
        AnyValue::Float32(f) => format_float(f64::from(*f)),
        AnyValue::Int64(i) => i.to_string(),
        AnyValue::Int32(i) => i.to_string(),
        AnyValue::UInt32(i) => i.to_string(),
        other => other.to_string(),
    }
}

fn format_float(v: f64) -> String {
    if !v.is_finite() {
        return "-".to_string();
    }
    if v == v.trunc() && v.abs() < 1e9 {
        return format!("{v:.0}");
    }
    let mut s = format!("{v:.3}");
    while s.ends_with('0') {
        s.pop();
    }
    if s.ends_with('.') {
        s.pop();
    }
    if let Some(rest) = s.strip_prefix("0.") {
        return format!(".{rest}");
    }
    if let Some(rest) = s.strip_prefix("-0.") {
        return format!("-.{rest}");
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rates_drop_the_leading_zero() {
        assert_eq!(format_float(0.268), ".268");
        assert_eq!(format_float(-0.045), "-.045");
        assert_eq!(format_float(0.3), ".3");
    }

    #[test]
    fn whole_floats_print_bare() {
        assert_eq!(format_float(54.0), "54");
        assert_eq!(format_float(-3.0), "-3");
        assert_eq!(format_float(0.0), "0");
    }

    #[test]
    fn mixed_floats_trim_trailing_zeros() {
        assert_eq!(format_float(2.35), "2.35");
        assert_eq!(format_float(8.2), "8.2");
        assert_eq!(format_float(1.012), "1.012");
    }

    #[test]
    fn non_finite_prints_a_dash() {
        assert_eq!(format_float(f64::NAN), "-");
        assert_eq!(format_float(f64::INFINITY), "-");
    }

    #[test]
    fn values_format_by_type() {
        assert_eq!(format_value(&AnyValue::Null), "-");
        assert_eq!(format_value(&AnyValue::Int64(12)), "12");
        assert_eq!(format_value(&AnyValue::Float64(0.442)), ".442");
        assert_eq!(format_value(&AnyValue::String("vs LHP")), "vs LHP");
        assert_eq!(format_value(&AnyValue::Boolean(true)), "true");
    }

    #[test]
    fn renders_into_a_buffer_without_panic() {
        let df = df!(
            "W" => &[11i64],
            "ERA" => &[2.35],
            "SO" => &[228i64],
        )
        .unwrap();
        let mut buf = vec![0u8; 400 * 160 * 3];
        {
            let root = BitMapBackend::with_buffer(&mut buf, (400, 160)).into_drawing_area();
            root.fill(&WHITE).unwrap();
            StatTable::new(&df, "Standard Pitching").render(&root).unwrap();
            root.present().unwrap();
        }
        assert!(buf.iter().any(|&b| b != 0), "canvas should not be all black");
    }

    #[test]
    fn tiny_region_is_a_no_op() {
        let df = df!("W" => &[11i64]).unwrap();
        let mut buf = vec![0u8; 20 * 20 * 3];
        let root = BitMapBackend::with_buffer(&mut buf, (20, 20)).into_drawing_area();
        StatTable::new(&df, "Standard").render(&root).unwrap();
    }
}
