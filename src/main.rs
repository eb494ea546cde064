use anyhow::Context;
use clap::{Parser, Subcommand};
use pixel_grid::{ColorMatcher, DistanceMethod};
use serde_json::json;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use beadsprite::api;
use beadsprite::assets::AssetLoader;
use beadsprite::models::{AppConfig, ExtractMode, GridInfoResponse};
use beadsprite::server;
use beadsprite::services::{count_beads, ExtractOptions, ImageService, PaletteStore};

#[derive(Parser)]
#[command(name = "beadsprite")]
#[command(about = "Beadsprite helper - turn pixel art into fuse-bead patterns")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server (default)
    Serve,
    /// Detect the pixel grid of an image and count the beads it needs
    Analyze {
        /// Image file to analyze
        image: PathBuf,

        /// Extraction mode
        #[arg(long, value_enum, default_value_t = ExtractMode::Auto)]
        mode: ExtractMode,

        /// Smallest cell size to look for (default from config)
        #[arg(long)]
        min_cell: Option<usize>,

        /// Largest cell size to look for (default from config)
        #[arg(long)]
        max_cell: Option<usize>,

        /// Color distance: "lab" or "rgb" (default from config)
        #[arg(long)]
        method: Option<DistanceMethod>,
    },
    /// List the bead palette
    Colors,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Beadsprite Helper API",
        description = "Pixel-grid detection and bead color matching for pixel art",
        version = "0.1.0",
        license(name = "MIT")
    ),
    paths(
        api::handle_root,
        api::handle_health,
        api::handle_list_colors,
        api::handle_get_color,
        api::handle_match_colors,
        api::handle_upload,
        api::handle_extract,
    ),
    components(schemas(
        api::RootResponse,
        api::HealthResponse,
        api::MatchRequest,
        api::MatchResponse,
        api::UploadResponse,
        api::ExtractResponse,
        beadsprite::models::BeadColor,
        beadsprite::models::BeadMatch,
        beadsprite::models::RgbValue,
        beadsprite::models::GridInfoResponse,
        beadsprite::models::ExtractMode,
    )),
    tags(
        (name = "Service", description = "Service status"),
        (name = "Colors", description = "Bead palette and color matching"),
        (name = "Images", description = "Image upload and logical grid extraction")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Analyze {
            image,
            mode,
            min_cell,
            max_cell,
            method,
        }) => run_analyze_command(&image, mode, min_cell, max_cell, method),
        Some(Commands::Colors) => run_colors_command(),
        Some(Commands::Serve) | None => run_server().await,
    }
}

/// Minimal logging for CLI commands
fn init_cli_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "beadsprite=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

/// Run the full pipeline on a file and print a JSON summary
fn run_analyze_command(
    path: &Path,
    mode: ExtractMode,
    min_cell: Option<usize>,
    max_cell: Option<usize>,
    method: Option<DistanceMethod>,
) -> anyhow::Result<()> {
    init_cli_tracing();

    let loader = AssetLoader::from_env();
    let config = AppConfig::load_from_assets(&loader);
    let palette = PaletteStore::load_from_assets(&loader);
    let images = ImageService::from_config(&config);

    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let decoded = images.decode(&bytes)?;

    let defaults = ExtractOptions::from_config(&config.grid);
    let options = ExtractOptions {
        mode,
        min_cell_size: min_cell.unwrap_or(defaults.min_cell_size),
        max_cell_size: max_cell.unwrap_or(defaults.max_cell_size),
    };
    let extraction = images.extract(&decoded.image, &options)?;

    let method = method.unwrap_or(config.matching.default_method);
    let beads = count_beads(
        &extraction.grid,
        palette.palette(),
        &ColorMatcher::new(method),
    )?;

    let summary = json!({
        "file": path.display().to_string(),
        "format": decoded.format,
        "width": decoded.image.width(),
        "height": decoded.image.height(),
        "mode": extraction.mode,
        "grid_info": extraction.grid_info.map(GridInfoResponse::from),
        "columns": extraction.grid.width,
        "rows": extraction.grid.height,
        "method": method.as_str(),
        "beads": beads,
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}

/// Print the bead palette, one color per line
fn run_colors_command() -> anyhow::Result<()> {
    init_cli_tracing();

    let palette = PaletteStore::load_from_assets(&AssetLoader::from_env());
    if palette.is_empty() {
        anyhow::bail!("Bead palette is empty");
    }

    for color in palette.colors() {
        println!("{:<5} {}  {}", color.id, color.hex, color.name);
    }
    println!("\n{} colors", palette.len());

    Ok(())
}

/// Run the HTTP server
async fn run_server() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "beadsprite=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_string());
    let asset_loader = Arc::new(AssetLoader::from_env());

    let state = server::create_app_state(asset_loader)?;

    let app = server::build_router(state)
        // OpenAPI documentation (production only)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "Beadsprite server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
