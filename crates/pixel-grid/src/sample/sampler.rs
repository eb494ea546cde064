//! Logical grid extraction, 1:1 or one color per detected cell.

use std::ops::Range;

use super::median::median_rgb;
use crate::color::Rgb;
use crate::grid::GridInfo;
use crate::image::PixelImage;

/// Fraction of a cell dimension trimmed from each side before sampling.
pub const CELL_MARGIN_PERCENT: usize = 20;

/// A row-major grid of logical pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    pub width: usize,
    pub height: usize,
    pub cells: Vec<Rgb>,
}

impl PixelGrid {
    /// Cell at column `col`, row `row`, or `None` when out of bounds.
    pub fn get(&self, col: usize, row: usize) -> Option<Rgb> {
        if col >= self.width || row >= self.height {
            return None;
        }
        self.cells.get(row * self.width + col).copied()
    }

    /// Rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Rgb]> + '_ {
        self.cells.chunks(self.width.max(1))
    }

    /// Number of logical pixels.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Copy every source pixel unchanged.
pub fn extract_pixels_simple(image: &PixelImage) -> PixelGrid {
    PixelGrid {
        width: image.width(),
        height: image.height(),
        cells: image.pixels().to_vec(),
    }
}

/// One median color per cell of `grid`.
///
/// Each cell's box is clipped to the image, then shrunk by 20% of the cell
/// dimension on every side (never below one pixel). A cell whose box lies
/// entirely outside the image comes out black.
pub fn extract_pixels_from_grid(image: &PixelImage, grid: &GridInfo) -> PixelGrid {
    let cell_w = grid.cell_width.max(1);
    let cell_h = grid.cell_height.max(1);
    let margin_x = cell_w * CELL_MARGIN_PERCENT / 100;
    let margin_y = cell_h * CELL_MARGIN_PERCENT / 100;

    let mut cells = Vec::with_capacity(grid.grid_cols * grid.grid_rows);
    for row in 0..grid.grid_rows {
        let ys = clip(row * cell_h, cell_h, image.height());
        let ys = shrink(ys, margin_y);
        for col in 0..grid.grid_cols {
            let xs = shrink(clip(col * cell_w, cell_w, image.width()), margin_x);
            let window = ys
                .clone()
                .flat_map(|y| xs.clone().map(move |x| image.get(x, y)));
            cells.push(median_rgb(window));
        }
    }

    PixelGrid {
        width: grid.grid_cols,
        height: grid.grid_rows,
        cells,
    }
}

fn clip(start: usize, len: usize, limit: usize) -> Range<usize> {
    start.min(limit)..(start + len).min(limit)
}

/// Trim `margin` from both ends, keeping at least the middle sample of a
/// non-empty range.
fn shrink(span: Range<usize>, margin: usize) -> Range<usize> {
    if span.is_empty() {
        return span;
    }
    let (lo, hi) = (span.start + margin, span.end.saturating_sub(margin));
    if lo < hi {
        lo..hi
    } else {
        let mid = span.start + span.len() / 2;
        mid..mid + 1
    }
}
