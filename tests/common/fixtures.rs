//! Test fixtures: encoded images with known structure.

use std::io::Cursor;

pub const LIGHT: [u8; 3] = [255, 255, 255];
pub const DARK: [u8; 3] = [20, 20, 20];

/// Encode an RGB image as PNG
pub fn png_from_fn(width: u32, height: u32, f: impl Fn(u32, u32) -> [u8; 3]) -> Vec<u8> {
    let buffer = image::RgbImage::from_fn(width, height, |x, y| image::Rgb(f(x, y)));
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgb8(buffer)
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .expect("Failed to encode PNG");
    bytes
}

/// Light/dark checkerboard of `blocks`x`blocks` cells, each `cell` pixels wide.
///
/// The top-left cell is light.
pub fn checkerboard_png(cell: u32, blocks: u32) -> Vec<u8> {
    png_from_fn(cell * blocks, cell * blocks, |x, y| {
        if (x / cell + y / cell) % 2 == 0 {
            LIGHT
        } else {
            DARK
        }
    })
}

/// Single-color image
pub fn uniform_png(width: u32, height: u32, color: [u8; 3]) -> Vec<u8> {
    png_from_fn(width, height, |_, _| color)
}
