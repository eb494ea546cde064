//! Process-wide bead palette, loaded once at startup.

use pixel_grid::{BeadPalette, PaletteEntry, PaletteError};
use std::io;
use thiserror::Error;

use crate::assets::AssetLoader;
use crate::models::BeadColor;

#[derive(Debug, Error)]
pub enum PaletteLoadError {
    #[error("Failed to read palette: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid palette JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid palette: {0}")]
    Palette(#[from] PaletteError),
}

/// Read-only bead palette shared by all requests.
#[derive(Debug, Clone, Default)]
pub struct PaletteStore {
    palette: BeadPalette,
}

impl PaletteStore {
    pub fn new(palette: BeadPalette) -> Self {
        Self { palette }
    }

    /// Parse a JSON array of `{id, hex, name}` objects.
    pub fn from_json(json: &str) -> Result<Self, PaletteLoadError> {
        let colors: Vec<BeadColor> = serde_json::from_str(json)?;
        let entries: Vec<PaletteEntry> = colors.into_iter().map(Into::into).collect();
        Ok(Self::new(BeadPalette::new(entries)?))
    }

    /// Load the palette from AssetLoader (embedded or external).
    ///
    /// A palette that cannot be read or parsed is logged and replaced by an
    /// empty one, so the server still starts; matching then fails with
    /// "no candidate colors".
    pub fn load_from_assets(loader: &AssetLoader) -> Self {
        let result = loader
            .read_palette_string()
            .map_err(PaletteLoadError::from)
            .and_then(|json| Self::from_json(&json));

        match result {
            Ok(store) => {
                tracing::info!(colors = store.len(), "Loaded bead palette");
                store
            }
            Err(e) => {
                tracing::error!(%e, "Failed to load bead palette, continuing with an empty palette");
                Self::default()
            }
        }
    }

    pub fn palette(&self) -> &BeadPalette {
        &self.palette
    }

    /// All colors in palette order.
    pub fn colors(&self) -> Vec<BeadColor> {
        self.palette.entries().iter().map(BeadColor::from).collect()
    }

    pub fn get(&self, id: &str) -> Option<BeadColor> {
        self.palette.get(id).map(BeadColor::from)
    }

    pub fn len(&self) -> usize {
        self.palette.len()
    }

    pub fn is_empty(&self) -> bool {
        self.palette.is_empty()
    }
}
