//! Grid period detection from center scanlines.

use super::autocorr::{autocorrelate, center_scanlines};
use super::peaks::find_period;
use super::GridInfo;
use crate::image::PixelImage;

/// Confidence reported for every successful detection.
///
/// This is a fixed value, not a statistical estimate. Callers compare
/// against it literally.
pub const DETECTION_CONFIDENCE: f64 = 0.9;

/// Period found on a single axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisPeriod {
    /// Detected cell size in pixels
    pub lag: usize,
    /// Name of the peak strategy that produced it
    pub strategy: &'static str,
}

/// Autocorrelation-based grid detector.
///
/// # Example
///
/// ```
/// use pixel_grid::{GridDetector, PixelImage, Rgb};
///
/// let image = PixelImage::from_fn(32, 32, |_, _| Rgb::new(50, 60, 70));
/// assert!(GridDetector::default().detect(&image).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridDetector {
    pub min_cell_size: usize,
    pub max_cell_size: usize,
}

impl Default for GridDetector {
    fn default() -> Self {
        Self {
            min_cell_size: 2,
            max_cell_size: 50,
        }
    }
}

impl GridDetector {
    pub fn new(min_cell_size: usize, max_cell_size: usize) -> Self {
        Self {
            min_cell_size,
            max_cell_size,
        }
    }

    /// Detect the cell size of `image`.
    ///
    /// Returns `None` unless both axes yield a period.
    pub fn detect(&self, image: &PixelImage) -> Option<GridInfo> {
        let (horizontal, vertical) = self.detect_axes(image);
        Some(GridInfo::new(
            image.width(),
            image.height(),
            horizontal?.lag,
            vertical?.lag,
        ))
    }

    /// Per-axis results: `(horizontal, vertical)`.
    pub fn detect_axes(&self, image: &PixelImage) -> (Option<AxisPeriod>, Option<AxisPeriod>) {
        let lines = center_scanlines(image);
        (
            self.detect_axis(&lines.horizontal),
            self.detect_axis(&lines.vertical),
        )
    }

    /// Period of a single grayscale scanline.
    pub fn detect_axis(&self, signal: &[f64]) -> Option<AxisPeriod> {
        let min = self.min_cell_size.max(1);
        if signal.len() / 2 < min {
            return None;
        }

        let r = autocorrelate(signal);
        let last = self.max_cell_size.min(r.len().checked_sub(1)?);
        if last < min {
            return None;
        }

        find_period(&r[min..=last], min).map(|(lag, strategy)| AxisPeriod { lag, strategy })
    }
}

/// Detect with explicit cell-size bounds.
pub fn detect_grid(image: &PixelImage, min_cell_size: usize, max_cell_size: usize) -> Option<GridInfo> {
    GridDetector::new(min_cell_size, max_cell_size).detect(image)
}
