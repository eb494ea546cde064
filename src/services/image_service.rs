//! Image decoding, validation and logical grid extraction.

use image::ImageReader;
use pixel_grid::{
    extract_pixels_from_grid, extract_pixels_simple, GridDetector, GridInfo, PixelGrid,
    PixelImage, Rgb,
};
use sha2::{Digest, Sha256};
use std::io::Cursor;
use thiserror::Error;

use crate::models::{AppConfig, ExtractMode, GridConfig, UploadConfig};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ImageServiceError {
    #[error("Invalid image file")]
    InvalidImage,

    #[error("Image file too large ({size} bytes, max {max})")]
    FileTooLarge { size: usize, max: usize },

    #[error("Image too large ({width}x{height}). Maximum {max_width}x{max_height} pixels.")]
    DimensionsTooLarge {
        width: u32,
        height: u32,
        max_width: u32,
        max_height: u32,
    },

    #[error("Invalid cell size range: min {min}, max {max}")]
    InvalidCellRange { min: usize, max: usize },

    #[error("No pixel grid detected")]
    GridNotDetected,

    #[error("Pattern too large ({cols}x{rows}). Maximum {max_cols}x{max_rows} beads.")]
    GridTooLarge {
        cols: usize,
        rows: usize,
        max_cols: usize,
        max_rows: usize,
    },
}

/// A validated, decoded upload.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub image: PixelImage,
    /// Container format, e.g. "PNG"
    pub format: String,
    /// SHA-256 of the uploaded bytes, lowercase hex
    pub hash: String,
}

/// Parameters for one extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractOptions {
    pub mode: ExtractMode,
    pub min_cell_size: usize,
    pub max_cell_size: usize,
}

impl ExtractOptions {
    /// Auto mode with the configured cell-size range.
    pub fn from_config(grid: &GridConfig) -> Self {
        Self {
            mode: ExtractMode::Auto,
            min_cell_size: grid.min_cell_size,
            max_cell_size: grid.max_cell_size,
        }
    }
}

/// Outcome of an extraction.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub grid: PixelGrid,
    /// Mode actually used: `Grid` or `Direct`, never `Auto`
    pub mode: ExtractMode,
    pub grid_info: Option<GridInfo>,
}

/// Turns uploaded bytes into logical pixel grids.
#[derive(Debug, Clone)]
pub struct ImageService {
    upload: UploadConfig,
    grid: GridConfig,
}

impl ImageService {
    pub fn new(upload: UploadConfig, grid: GridConfig) -> Self {
        Self { upload, grid }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.upload, config.grid)
    }

    pub fn upload_config(&self) -> &UploadConfig {
        &self.upload
    }

    pub fn grid_config(&self) -> &GridConfig {
        &self.grid
    }

    /// Decode and validate an upload.
    ///
    /// Checks byte size, then the image header, then the pixel dimensions
    /// before the full decode.
    pub fn decode(&self, bytes: &[u8]) -> Result<DecodedImage, ImageServiceError> {
        if bytes.len() > self.upload.max_bytes {
            tracing::warn!(
                size = bytes.len(),
                max = self.upload.max_bytes,
                "Upload exceeds byte limit"
            );
            return Err(ImageServiceError::FileTooLarge {
                size: bytes.len(),
                max: self.upload.max_bytes,
            });
        }

        let format = reader(bytes)?
            .format()
            .ok_or(ImageServiceError::InvalidImage)?;

        let (width, height) = reader(bytes)?.into_dimensions().map_err(|e| {
            tracing::error!(%e, "Invalid image file");
            ImageServiceError::InvalidImage
        })?;
        if width > self.upload.max_width || height > self.upload.max_height {
            tracing::warn!(width, height, "Image too large");
            return Err(ImageServiceError::DimensionsTooLarge {
                width,
                height,
                max_width: self.upload.max_width,
                max_height: self.upload.max_height,
            });
        }

        let decoded = reader(bytes)?.decode().map_err(|e| {
            tracing::error!(%e, "Invalid image file");
            ImageServiceError::InvalidImage
        })?;

        let rgb = decoded.to_rgb8();
        let pixels: Vec<Rgb> = rgb.pixels().map(|p| Rgb::from(p.0)).collect();
        let image = PixelImage::new(width as usize, height as usize, pixels)
            .map_err(|_| ImageServiceError::InvalidImage)?;

        let format = format!("{format:?}").to_uppercase();
        tracing::info!(width, height, format = %format, "Image decoded");

        Ok(DecodedImage {
            image,
            format,
            hash: hex::encode(Sha256::digest(bytes)),
        })
    }

    /// Build the logical grid for `image`.
    ///
    /// `Auto` falls back to direct extraction when no grid is found; `Grid`
    /// reports [`ImageServiceError::GridNotDetected`] instead. The result must
    /// fit within the configured bead board.
    pub fn extract(
        &self,
        image: &PixelImage,
        options: &ExtractOptions,
    ) -> Result<Extraction, ImageServiceError> {
        let extraction = match options.mode {
            ExtractMode::Direct => direct(image),
            ExtractMode::Auto | ExtractMode::Grid => {
                match self.detect(image, options.min_cell_size, options.max_cell_size)? {
                    Some(info) => Extraction {
                        grid: extract_pixels_from_grid(image, &info),
                        mode: ExtractMode::Grid,
                        grid_info: Some(info),
                    },
                    None if options.mode == ExtractMode::Grid => {
                        return Err(ImageServiceError::GridNotDetected)
                    }
                    None => direct(image),
                }
            }
        };

        let (cols, rows) = (extraction.grid.width, extraction.grid.height);
        if cols > self.grid.max_columns || rows > self.grid.max_rows {
            tracing::warn!(cols, rows, "Logical grid exceeds bead board");
            return Err(ImageServiceError::GridTooLarge {
                cols,
                rows,
                max_cols: self.grid.max_columns,
                max_rows: self.grid.max_rows,
            });
        }

        tracing::info!(
            mode = %extraction.mode,
            cols,
            rows,
            "Extracted logical grid"
        );
        Ok(extraction)
    }

    /// Run grid detection and log what each axis found.
    pub fn detect(
        &self,
        image: &PixelImage,
        min_cell_size: usize,
        max_cell_size: usize,
    ) -> Result<Option<GridInfo>, ImageServiceError> {
        if min_cell_size == 0 || min_cell_size > max_cell_size {
            return Err(ImageServiceError::InvalidCellRange {
                min: min_cell_size,
                max: max_cell_size,
            });
        }

        let detector = GridDetector::new(min_cell_size, max_cell_size);
        match detector.detect_axes(image) {
            (Some(horizontal), Some(vertical)) => {
                let info = GridInfo::new(image.width(), image.height(), horizontal.lag, vertical.lag);
                tracing::info!(
                    cell_width = info.cell_width,
                    cell_height = info.cell_height,
                    grid_cols = info.grid_cols,
                    grid_rows = info.grid_rows,
                    horizontal_strategy = horizontal.strategy,
                    vertical_strategy = vertical.strategy,
                    "Grid detected"
                );
                Ok(Some(info))
            }
            (horizontal, vertical) => {
                tracing::info!(
                    horizontal = ?horizontal.map(|p| p.lag),
                    vertical = ?vertical.map(|p| p.lag),
                    "No grid detected"
                );
                Ok(None)
            }
        }
    }
}

fn reader(bytes: &[u8]) -> Result<ImageReader<Cursor<&[u8]>>, ImageServiceError> {
    ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|_| ImageServiceError::InvalidImage)
}

fn direct(image: &PixelImage) -> Extraction {
    Extraction {
        grid: extract_pixels_simple(image),
        mode: ExtractMode::Direct,
        grid_info: None,
    }
}

/// Encode an image as PNG.
#[cfg(test)]
pub(crate) fn encode_png(image: &PixelImage) -> Vec<u8> {
    let buffer = image::RgbImage::from_fn(image.width() as u32, image.height() as u32, |x, y| {
        let p = image.get(x as usize, y as usize);
        image::Rgb([p.r, p.g, p.b])
    });
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgb8(buffer)
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> ImageService {
        ImageService::new(UploadConfig::default(), GridConfig::default())
    }

    fn checkerboard() -> PixelImage {
        PixelImage::from_fn(32, 32, |x, y| {
            if (x / 8 + y / 8) % 2 == 0 {
                Rgb::new(255, 255, 255)
            } else {
                Rgb::new(20, 20, 20)
            }
        })
    }

    #[test]
    fn test_decode_png() {
        let bytes = encode_png(&checkerboard());
        let decoded = service().decode(&bytes).unwrap();
        assert_eq!(decoded.format, "PNG");
        assert_eq!(decoded.image, checkerboard());
        assert_eq!(decoded.hash.len(), 64);
        assert_eq!(decoded.hash, hex::encode(Sha256::digest(&bytes)));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert_eq!(
            service().decode(b"definitely not an image").unwrap_err(),
            ImageServiceError::InvalidImage
        );
    }

    #[test]
    fn test_decode_enforces_limits() {
        let bytes = encode_png(&checkerboard());

        let small_files = ImageService::new(
            UploadConfig {
                max_bytes: 10,
                ..UploadConfig::default()
            },
            GridConfig::default(),
        );
        assert!(matches!(
            small_files.decode(&bytes),
            Err(ImageServiceError::FileTooLarge { max: 10, .. })
        ));

        let small_images = ImageService::new(
            UploadConfig {
                max_width: 16,
                ..UploadConfig::default()
            },
            GridConfig::default(),
        );
        assert_eq!(
            small_images.decode(&bytes).unwrap_err().to_string(),
            "Image too large (32x32). Maximum 16x2048 pixels."
        );
    }

    #[test]
    fn test_auto_uses_detected_grid() {
        let svc = service();
        let options = ExtractOptions::from_config(svc.grid_config());
        let extraction = svc.extract(&checkerboard(), &options).unwrap();

        assert_eq!(extraction.mode, ExtractMode::Grid);
        assert_eq!(extraction.grid_info.map(|i| i.cell_width), Some(8));
        assert_eq!((extraction.grid.width, extraction.grid.height), (4, 4));
    }

    #[test]
    fn test_auto_falls_back_to_direct() {
        let flat = PixelImage::from_fn(10, 6, |_, _| Rgb::new(9, 9, 9));
        let svc = service();
        let extraction = svc
            .extract(&flat, &ExtractOptions::from_config(svc.grid_config()))
            .unwrap();

        assert_eq!(extraction.mode, ExtractMode::Direct);
        assert!(extraction.grid_info.is_none());
        assert_eq!((extraction.grid.width, extraction.grid.height), (10, 6));
    }

    #[test]
    fn test_grid_mode_requires_detection() {
        let flat = PixelImage::from_fn(10, 6, |_, _| Rgb::new(9, 9, 9));
        let options = ExtractOptions {
            mode: ExtractMode::Grid,
            ..ExtractOptions::from_config(&GridConfig::default())
        };
        assert_eq!(
            service().extract(&flat, &options).unwrap_err(),
            ImageServiceError::GridNotDetected
        );
    }

    #[test]
    fn test_grid_limit() {
        let svc = ImageService::new(
            UploadConfig::default(),
            GridConfig {
                max_columns: 16,
                ..GridConfig::default()
            },
        );
        let options = ExtractOptions {
            mode: ExtractMode::Direct,
            ..ExtractOptions::from_config(svc.grid_config())
        };
        assert!(matches!(
            svc.extract(&checkerboard(), &options),
            Err(ImageServiceError::GridTooLarge { cols: 32, .. })
        ));
    }

    #[test]
    fn test_invalid_cell_range() {
        let options = ExtractOptions {
            mode: ExtractMode::Auto,
            min_cell_size: 12,
            max_cell_size: 4,
        };
        assert_eq!(
            service().extract(&checkerboard(), &options).unwrap_err(),
            ImageServiceError::InvalidCellRange { min: 12, max: 4 }
        );
    }
}
