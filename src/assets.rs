//! Asset loading with embedded fallbacks
//!
//! Two assets ship inside the binary: `config.yaml` and the bead palette
//! `data/perler_colors.json`. Each can be replaced by a file on disk:
//!
//! - If the env var is NOT set: use the embedded asset only (no filesystem access)
//! - If the env var IS set and the file exists: use the file
//! - If the env var IS set but the file is missing: fall back to the embedded asset

use rust_embed::RustEmbed;
use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Embedded default config
#[derive(RustEmbed)]
#[folder = "."]
#[include = "config.yaml"]
struct EmbeddedConfig;

/// Embedded data files (bead palettes)
#[derive(RustEmbed)]
#[folder = "data/"]
#[include = "*.json"]
struct EmbeddedData;

/// File name of the bundled bead palette
pub const PALETTE_ASSET: &str = "perler_colors.json";

/// Asset category for selective operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetCategory {
    Config,
    Palette,
}

impl AssetCategory {
    fn embedded_name(self) -> &'static str {
        match self {
            AssetCategory::Config => "config.yaml",
            AssetCategory::Palette => PALETTE_ASSET,
        }
    }

    fn embedded(self) -> Option<Cow<'static, [u8]>> {
        let name = self.embedded_name();
        match self {
            AssetCategory::Config => EmbeddedConfig::get(name).map(|f| f.data),
            AssetCategory::Palette => EmbeddedData::get(name).map(|f| f.data),
        }
    }
}

/// Asset loader with optional filesystem override
#[derive(Debug, Clone, Default)]
pub struct AssetLoader {
    /// External config file path (from CONFIG_FILE env var)
    config_file: Option<PathBuf>,
    /// External palette file path (from PALETTE_FILE env var)
    palette_file: Option<PathBuf>,
}

impl AssetLoader {
    /// Create a new asset loader
    ///
    /// Paths should be `Some` only if the corresponding env var was set.
    /// If `None`, embedded assets are used exclusively.
    pub fn new(config_file: Option<PathBuf>, palette_file: Option<PathBuf>) -> Self {
        Self {
            config_file,
            palette_file,
        }
    }

    /// Build a loader from `CONFIG_FILE` and `PALETTE_FILE`.
    pub fn from_env() -> Self {
        Self::new(
            std::env::var("CONFIG_FILE").ok().map(PathBuf::from),
            std::env::var("PALETTE_FILE").ok().map(PathBuf::from),
        )
    }

    /// Where an asset will be read from, for startup logging.
    pub fn source(&self, category: AssetCategory) -> String {
        match self.override_path(category) {
            Some(path) if path.exists() => path.display().to_string(),
            _ => "embedded".to_string(),
        }
    }

    fn override_path(&self, category: AssetCategory) -> Option<&Path> {
        match category {
            AssetCategory::Config => self.config_file.as_deref(),
            AssetCategory::Palette => self.palette_file.as_deref(),
        }
    }

    /// Read an asset, preferring the configured file over the embedded copy.
    pub fn read(&self, category: AssetCategory) -> io::Result<Cow<'static, [u8]>> {
        if let Some(path) = self.override_path(category) {
            if path.exists() {
                tracing::trace!(path = %path.display(), ?category, "Loading asset from filesystem");
                return Ok(Cow::Owned(fs::read(path)?));
            }
            tracing::warn!(
                path = %path.display(),
                ?category,
                "Configured asset file not found, using embedded copy"
            );
        }

        category
            .embedded()
            .map(|data| {
                tracing::trace!(?category, "Loading asset from embedded assets");
                data
            })
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("Embedded {} not found", category.embedded_name()),
                )
            })
    }

    /// Read an asset as a UTF-8 string
    pub fn read_string(&self, category: AssetCategory) -> io::Result<String> {
        let bytes = self.read(category)?;
        String::from_utf8(bytes.into_owned())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Read the config file
    pub fn read_config_string(&self) -> io::Result<String> {
        self.read_string(AssetCategory::Config)
    }

    /// Read the bead palette JSON
    pub fn read_palette_string(&self) -> io::Result<String> {
        self.read_string(AssetCategory::Palette)
    }
}
