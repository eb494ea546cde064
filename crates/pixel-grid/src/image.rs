//! Immutable RGB raster read by every pipeline stage.

use std::fmt;

use crate::color::Rgb;

/// Error type for constructing a [`PixelImage`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageError {
    /// Pixel buffer length does not equal `width * height`
    DimensionMismatch {
        width: usize,
        height: usize,
        len: usize,
    },
}

impl fmt::Display for ImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageError::DimensionMismatch { width, height, len } => write!(
                f,
                "pixel buffer has {len} pixels, expected {width}x{height} = {}",
                width * height
            ),
        }
    }
}

impl std::error::Error for ImageError {}

/// An immutable 2-D array of RGB pixels, stored row-major.
///
/// # Example
///
/// ```
/// use pixel_grid::{PixelImage, Rgb};
///
/// let image = PixelImage::from_fn(4, 2, |x, _| Rgb::new(x as u8 * 60, 0, 0));
/// assert_eq!(image.get(3, 1), Rgb::new(180, 0, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelImage {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
}

impl PixelImage {
    /// Wrap a row-major pixel buffer.
    ///
    /// # Errors
    ///
    /// [`ImageError::DimensionMismatch`] if `pixels.len() != width * height`.
    pub fn new(width: usize, height: usize, pixels: Vec<Rgb>) -> Result<Self, ImageError> {
        if pixels.len() != width * height {
            return Err(ImageError::DimensionMismatch {
                width,
                height,
                len: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build an image by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> Rgb) -> Self {
        let mut pixels = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Pixel at column `x`, row `y`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Rgb {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        self.pixels[y * self.width + x]
    }

    /// One row of pixels.
    #[inline]
    pub fn row(&self, y: usize) -> &[Rgb] {
        let start = y * self.width;
        &self.pixels[start..start + self.width]
    }

    /// All pixels, row-major.
    #[inline]
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }
}
