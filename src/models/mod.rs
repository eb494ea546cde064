pub mod bead;
pub mod config;

pub use bead::{BeadColor, BeadMatch, ExtractMode, GridInfoResponse, RgbValue};
pub use config::{AppConfig, CorsConfig, GridConfig, MatchingConfig, UploadConfig};
