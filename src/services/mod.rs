pub mod image_service;
pub mod palette_store;
pub mod pattern;

pub use image_service::{
    DecodedImage, ExtractOptions, Extraction, ImageService, ImageServiceError,
};
pub use palette_store::{PaletteLoadError, PaletteStore};
pub use pattern::{count_beads, BeadCount};
