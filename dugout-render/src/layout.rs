//! Ratio-based grid layout.
//!
//! A sheet is a fixed grid of rows and columns with explicit relative
//! sizing. [`SheetGrid`] turns the ratio lists into pixel edges once, and
//! [`SheetGrid::region`] maps a half-open cell span onto the pixel
//! rectangle it covers. Adjacent regions share edges exactly, so the
//! regions partition the canvas with no gaps or overlap.

use std::ops::Range;

/// A pixel-space rectangle, `x1`/`y1` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

impl PixelRect {
    pub fn width(&self) -> u32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> u32 {
        self.y1 - self.y0
    }
}

/// Pixel edges for a ratio-sized grid on a fixed canvas.
#[derive(Debug, Clone)]
pub struct SheetGrid {
    col_edges: Vec<u32>,
    row_edges: Vec<u32>,
}

impl SheetGrid {
    pub fn new(width: u32, height: u32, width_ratios: &[f64], height_ratios: &[f64]) -> Self {
        Self {
            col_edges: edges(width, width_ratios),
            row_edges: edges(height, height_ratios),
        }
    }

    pub fn rows(&self) -> usize {
        self.row_edges.len() - 1
    }

    pub fn cols(&self) -> usize {
        self.col_edges.len() - 1
    }

    /// Rectangle covered by a half-open span of cells. `rows`/`cols` index
    /// grid cells, so `1..3` spans cells 1 and 2.
    pub fn region(&self, rows: Range<usize>, cols: Range<usize>) -> PixelRect {
        PixelRect {
            x0: self.col_edges[cols.start],
            y0: self.row_edges[rows.start],
            x1: self.col_edges[cols.end],
            y1: self.row_edges[rows.end],
        }
    }
}

/// Cumulative ratio edges scaled to the total, first edge 0, last exactly
/// `total`. Rounding happens on the cumulative sum so error never
/// accumulates across cells.
fn edges(total: u32, ratios: &[f64]) -> Vec<u32> {
    let sum: f64 = ratios.iter().sum();
    let mut out = Vec::with_capacity(ratios.len() + 1);
    out.push(0);
    let mut acc = 0.0;
    for ratio in ratios {
        acc += ratio;
        out.push(((acc / sum) * f64::from(total)).round() as u32);
    }
    out
}
