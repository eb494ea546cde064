//! pixel-grid: recover the logical pixels of upscaled pixel art and map them
//! onto a bead palette.
//!
//! The pipeline has three stages, each usable on its own:
//!
//! 1. [`GridDetector`] finds the repeating cell size of an image by
//!    autocorrelating its center scanlines.
//! 2. [`extract_pixels_from_grid`] samples one median color per detected cell;
//!    [`extract_pixels_simple`] is the 1:1 fallback when detection fails.
//! 3. [`ColorMatcher`] maps colors to the nearest entry of a [`BeadPalette`],
//!    in CIE LAB or RGB, steering grey pixels away from saturated beads.
//!
//! # Quick Start
//!
//! ```
//! use pixel_grid::{
//!     extract_pixels_from_grid, extract_pixels_simple, BeadPalette, ColorMatcher,
//!     GridDetector, PaletteEntry, PixelImage, Rgb,
//! };
//!
//! // 4x4 checkerboard of 8px cells
//! let image = PixelImage::from_fn(32, 32, |x, y| {
//!     if (x / 8 + y / 8) % 2 == 0 {
//!         Rgb::new(255, 255, 255)
//!     } else {
//!         Rgb::new(20, 20, 20)
//!     }
//! });
//!
//! let grid = match GridDetector::default().detect(&image) {
//!     Some(info) => extract_pixels_from_grid(&image, &info),
//!     None => extract_pixels_simple(&image),
//! };
//! assert_eq!((grid.width, grid.height), (4, 4));
//!
//! let palette = BeadPalette::new(vec![
//!     PaletteEntry::new("P01", "#F1F1F1", "White"),
//!     PaletteEntry::new("P18", "#2E2F32", "Black"),
//! ])
//! .unwrap();
//! let bead = ColorMatcher::default().match_rgb(grid.cells[1], &palette).unwrap();
//! assert_eq!(bead.matched_id, "P18");
//! ```
//!
//! # Color Science
//!
//! LAB conversion uses the sRGB transfer curve, the sRGB/D65 RGB-to-XYZ
//! matrix and the D65 reference white `(0.95047, 1.0, 1.08883)`. Distance
//! in LAB is plain CIE76 Delta E. LAB values outside the sRGB gamut clamp
//! per channel on the way back.
//!
//! A query color is *neutral* when its channel spread is below 30. For
//! neutral queries each candidate bead's distance grows by
//! `saturation × 50`, where saturation is the HSV saturation of the bead.
//!
//! # Detection Confidence
//!
//! [`GridInfo::confidence`] is always `0.9` on success. It is a fixed marker,
//! not a measured probability.

pub mod color;
pub mod grid;
pub mod image;
pub mod palette;
pub mod sample;


pub use color::{Lab, Rgb};
pub use grid::{detect_grid, GridDetector, GridInfo};
pub use image::{ImageError, PixelImage};
pub use palette::{
    BeadPalette, ColorMatch, ColorMatcher, DistanceMethod, InvalidColorFormat, MatchError,
    PaletteEntry, PaletteError, UnknownMethod,
};
pub use sample::{extract_pixels_from_grid, extract_pixels_simple, PixelGrid};
