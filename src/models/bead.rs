use pixel_grid::{ColorMatch, GridInfo, PaletteEntry, Rgb};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A bead color from the palette table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BeadColor {
    /// Manufacturer id (e.g. "P01")
    pub id: String,
    /// Hex color, `#RRGGBB`
    pub hex: String,
    /// Human-readable name
    pub name: String,
}

impl From<&PaletteEntry> for BeadColor {
    fn from(entry: &PaletteEntry) -> Self {
        Self {
            id: entry.id.clone(),
            hex: entry.hex.clone(),
            name: entry.name.clone(),
        }
    }
}

impl From<BeadColor> for PaletteEntry {
    fn from(color: BeadColor) -> Self {
        PaletteEntry::new(color.id, color.hex, color.name)
    }
}

/// The bead chosen for one query color
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct BeadMatch {
    /// Query color, normalized to `#rrggbb`
    pub source_color: String,
    pub matched_id: String,
    pub matched_hex: String,
    pub matched_name: String,
    /// Distance in the requested color space, including any neutrality penalty
    pub distance: f64,
}

impl From<ColorMatch> for BeadMatch {
    fn from(m: ColorMatch) -> Self {
        Self {
            source_color: m.source_color,
            matched_id: m.matched_id,
            matched_hex: m.matched_hex,
            matched_name: m.matched_name,
            distance: m.distance,
        }
    }
}

/// One logical pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RgbValue {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl From<Rgb> for RgbValue {
    fn from(c: Rgb) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
        }
    }
}

/// Detected grid geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct GridInfoResponse {
    pub cell_width: usize,
    pub cell_height: usize,
    pub grid_cols: usize,
    pub grid_rows: usize,
    /// Fixed at 0.9 for every successful detection
    pub confidence: f64,
}

impl From<GridInfo> for GridInfoResponse {
    fn from(info: GridInfo) -> Self {
        Self {
            cell_width: info.cell_width,
            cell_height: info.cell_height,
            grid_cols: info.grid_cols,
            grid_rows: info.grid_rows,
            confidence: info.confidence,
        }
    }
}

/// How an image is turned into a logical grid
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ExtractMode {
    /// Detect the grid, fall back to direct extraction
    #[default]
    Auto,
    /// One logical pixel per source pixel
    Direct,
    /// Require a detected grid
    Grid,
}

impl ExtractMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ExtractMode::Auto => "auto",
            ExtractMode::Direct => "direct",
            ExtractMode::Grid => "grid",
        }
    }
}

impl std::fmt::Display for ExtractMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
