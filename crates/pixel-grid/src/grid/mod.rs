//! Cell-size detection for upscaled pixel art.
//!
//! The detector looks at one horizontal and one vertical grayscale scanline
//! through the center of the image, autocorrelates each, and searches the
//! lag range `[min_cell_size, max_cell_size]` for the first repeating
//! period. Peak search escalates through three strategies (see
//! [`peaks::STRATEGIES`]). Both axes must succeed.
//!
//! On a two-color checkerboard the autocorrelation at the cell size is a
//! trough, because neighbouring cells differ; the signal only repeats at twice
//! the cell size. Whenever that lag lies inside the search window the
//! prominence strategy picks it, so 8px cells x 8 blocks report 16 and 5px
//! cells x 6 blocks report 10. A board of 8px cells x 4 blocks is too short
//! to contain lag 16 and is detected as 8 through the curvature strategy.

mod autocorr;
mod detector;
pub mod peaks;

pub use autocorr::{autocorrelate, center_scanlines, Scanlines, MAX_ANALYSIS_SIZE};
pub use detector::{detect_grid, AxisPeriod, GridDetector, DETECTION_CONFIDENCE};

/// Result of a successful detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridInfo {
    /// Cell width in pixels, at least 1
    pub cell_width: usize,
    /// Cell height in pixels, at least 1
    pub cell_height: usize,
    /// `image_width / cell_width`
    pub grid_cols: usize,
    /// `image_height / cell_height`
    pub grid_rows: usize,
    pub confidence: f64,
}

impl GridInfo {
    /// Grid of `cell_width × cell_height` cells over an image of the given
    /// size, with the fixed detection confidence. Partial cells at the right
    /// and bottom edges are dropped.
    pub fn new(image_width: usize, image_height: usize, cell_width: usize, cell_height: usize) -> Self {
        let cell_width = cell_width.max(1);
        let cell_height = cell_height.max(1);
        Self {
            cell_width,
            cell_height,
            grid_cols: image_width / cell_width,
            grid_rows: image_height / cell_height,
            confidence: DETECTION_CONFIDENCE,
        }
    }
}
