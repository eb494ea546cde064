//! Turning an image into a grid of logical pixels.

mod median;
mod sampler;

pub use median::{median_rgb, median_u8};
pub use sampler::{extract_pixels_from_grid, extract_pixels_simple, PixelGrid, CELL_MARGIN_PERCENT};
