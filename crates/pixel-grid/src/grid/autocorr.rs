//! Scanline extraction and 1-D autocorrelation.

use crate::image::PixelImage;

/// Largest side of the centered region that detection looks at.
pub const MAX_ANALYSIS_SIZE: usize = 256;

/// Horizontal and vertical grayscale scanlines through the center of the
/// analysis region.
#[derive(Debug, Clone, PartialEq)]
pub struct Scanlines {
    pub horizontal: Vec<f64>,
    pub vertical: Vec<f64>,
}

/// Crop to a centered region of at most 256x256 and take the middle row and
/// middle column, reduced to gray by channel averaging.
pub fn center_scanlines(image: &PixelImage) -> Scanlines {
    let crop_w = image.width().min(MAX_ANALYSIS_SIZE);
    let crop_h = image.height().min(MAX_ANALYSIS_SIZE);
    if crop_w == 0 || crop_h == 0 {
        return Scanlines {
            horizontal: Vec::new(),
            vertical: Vec::new(),
        };
    }

    let x0 = (image.width() - crop_w) / 2;
    let y0 = (image.height() - crop_h) / 2;
    let mid_x = x0 + crop_w / 2;
    let mid_y = y0 + crop_h / 2;

    let horizontal = image.row(mid_y)[x0..x0 + crop_w]
        .iter()
        .map(|p| p.gray())
        .collect();
    let vertical = (y0..y0 + crop_h)
        .map(|y| image.get(mid_x, y).gray())
        .collect();

    Scanlines {
        horizontal,
        vertical,
    }
}

/// Autocorrelation of a mean-centered signal for the non-negative lags of a
/// "same"-length correlation: `r[k] = Σ x[i]·x[i+k]` for `k` in
/// `0..n - n/2`.
///
/// Direct summation; the signals are at most 256 samples long.
pub fn autocorrelate(signal: &[f64]) -> Vec<f64> {
    let n = signal.len();
    if n == 0 {
        return Vec::new();
    }

    let mean = signal.iter().sum::<f64>() / n as f64;
    let centered: Vec<f64> = signal.iter().map(|v| v - mean).collect();

    (0..n - n / 2)
        .map(|lag| {
            centered[..n - lag]
                .iter()
                .zip(&centered[lag..])
                .map(|(a, b)| a * b)
                .sum()
        })
        .collect()
}
