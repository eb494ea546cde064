//! Color types and conversion utilities
//!
//! - [`Rgb`]: 8-bit sRGB, the pixel type of images and grids
//! - [`Lab`]: CIE LAB (D65), used for perceptual distance
//!
//! The free functions below are thin wrappers over the type methods for
//! callers that work with bare channel values.
//!
//! # Example
//!
//! ```
//! use pixel_grid::color::{hex_to_rgb, lab_distance, rgb_to_lab};
//!
//! let red = hex_to_rgb("#FF0000").unwrap();
//! let lab = rgb_to_lab(red.r, red.g, red.b);
//! assert!(lab.a > 50.0);
//! assert_eq!(lab_distance(lab, lab), 0.0);
//! ```

mod lab;
mod rgb;

pub use lab::Lab;
pub use rgb::{Rgb, NEUTRAL_SPREAD_THRESHOLD};

use crate::palette::InvalidColorFormat;

/// Parse a `#RRGGBB` / `RRGGBB` string.
pub fn hex_to_rgb(s: &str) -> Result<Rgb, InvalidColorFormat> {
    s.parse()
}

/// Format channels as `#rrggbb`.
pub fn rgb_to_hex(r: u8, g: u8, b: u8) -> String {
    Rgb::new(r, g, b).to_hex()
}

pub fn rgb_to_lab(r: u8, g: u8, b: u8) -> Lab {
    Lab::from(Rgb::new(r, g, b))
}

pub fn lab_to_rgb(l: f64, a: f64, b: f64) -> Rgb {
    Lab::new(l, a, b).to_rgb()
}

/// Euclidean distance in RGB space.
pub fn rgb_distance(c1: Rgb, c2: Rgb) -> f64 {
    c1.distance(c2)
}

/// CIE76 Delta E.
pub fn lab_distance(c1: Lab, c2: Lab) -> f64 {
    c1.distance(c2)
}
