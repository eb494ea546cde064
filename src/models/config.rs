use crate::assets::AssetLoader;
use pixel_grid::DistanceMethod;
use serde::Deserialize;

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub upload: UploadConfig,
    pub grid: GridConfig,
    pub matching: MatchingConfig,
    pub cors: CorsConfig,
}

/// Limits applied to uploaded images
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct UploadConfig {
    /// Largest accepted upload in bytes
    pub max_bytes: usize,
    /// Largest accepted image width in pixels
    pub max_width: u32,
    /// Largest accepted image height in pixels
    pub max_height: u32,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_bytes: 10 * 1024 * 1024,
            max_width: 2048,
            max_height: 2048,
        }
    }
}

/// Grid detection range and pattern size limits
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct GridConfig {
    pub min_cell_size: usize,
    pub max_cell_size: usize,
    /// Widest logical grid a pattern may have
    pub max_columns: usize,
    /// Tallest logical grid a pattern may have
    pub max_rows: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            min_cell_size: 2,
            max_cell_size: 50,
            max_columns: 200,
            max_rows: 200,
        }
    }
}

/// Color matching defaults
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct MatchingConfig {
    /// Method used when a request does not name one ("lab" or "rgb")
    #[serde(deserialize_with = "deserialize_method")]
    pub default_method: DistanceMethod,
}

fn deserialize_method<'de, D>(deserializer: D) -> Result<DistanceMethod, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let name = String::deserialize(deserializer)?;
    name.parse().map_err(serde::de::Error::custom)
}

/// Cross-origin settings for browser frontends
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["http://localhost:5173".to_string()],
        }
    }
}

impl AppConfig {
    /// Load configuration from AssetLoader (embedded or external)
    pub fn load_from_assets(loader: &AssetLoader) -> Self {
        match loader.read_config_string() {
            Ok(content) => Self::from_yaml(&content).unwrap_or_else(|e| {
                tracing::warn!(%e, "Failed to parse config, using defaults");
                Self::default()
            }),
            Err(e) => {
                tracing::warn!(%e, "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Parse configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        let config: Self = serde_yaml::from_str(content)?;
        tracing::info!(
            max_bytes = config.upload.max_bytes,
            max_columns = config.grid.max_columns,
            max_rows = config.grid.max_rows,
            method = %config.matching.default_method,
            "Loaded configuration"
        );
        Ok(config)
    }
}
