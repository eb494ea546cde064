//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{
    extract::{DefaultBodyLimit, FromRef},
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::api;
use crate::assets::{AssetCategory, AssetLoader};
use crate::models::{AppConfig, CorsConfig};
use crate::services::{ImageService, PaletteStore};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub palette: Arc<PaletteStore>,
    pub images: Arc<ImageService>,
}

impl FromRef<AppState> for Arc<AppConfig> {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for Arc<PaletteStore> {
    fn from_ref(state: &AppState) -> Self {
        state.palette.clone()
    }
}

impl FromRef<AppState> for Arc<ImageService> {
    fn from_ref(state: &AppState) -> Self {
        state.images.clone()
    }
}

/// Create application state from an asset loader.
pub fn create_app_state(asset_loader: Arc<AssetLoader>) -> anyhow::Result<AppState> {
    tracing::info!(
        config = %asset_loader.source(AssetCategory::Config),
        palette = %asset_loader.source(AssetCategory::Palette),
        "Asset sources configured"
    );

    let config = AppConfig::load_from_assets(&asset_loader);
    if config.grid.min_cell_size == 0 || config.grid.min_cell_size > config.grid.max_cell_size {
        anyhow::bail!(
            "Invalid grid config: min_cell_size {} must be between 1 and max_cell_size {}",
            config.grid.min_cell_size,
            config.grid.max_cell_size
        );
    }

    let palette = Arc::new(PaletteStore::load_from_assets(&asset_loader));
    let images = Arc::new(ImageService::from_config(&config));

    Ok(AppState {
        config: Arc::new(config),
        palette,
        images,
    })
}

/// Build the API router with all endpoints and middleware.
///
/// This is the core router used by both production and tests.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.upload.max_bytes;
    let cors = cors_layer(&state.config.cors);

    Router::new()
        .route("/", get(api::handle_root))
        .route("/health", get(api::handle_health))
        // Bead palette
        .route("/api/colors/perler", get(api::handle_list_colors))
        .route("/api/colors/perler/:color_id", get(api::handle_get_color))
        .route("/api/colors/match", post(api::handle_match_colors))
        // Image pipeline
        .route("/api/images/upload", post(api::handle_upload))
        .route("/api/images/extract", post(api::handle_extract))
        .with_state(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(%origin, %e, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE])
}
