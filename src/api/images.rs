use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

use crate::error::ApiError;
use crate::models::{ExtractMode, GridInfoResponse, RgbValue};
use crate::services::{ExtractOptions, ImageService, ImageServiceError};

/// Response from a successful upload
#[derive(Debug, Serialize, ToSchema)]
pub struct UploadResponse {
    pub success: bool,
    pub width: usize,
    pub height: usize,
    /// Container format, e.g. "PNG"
    pub format: String,
    pub message: String,
    /// SHA-256 of the uploaded bytes
    pub image_hash: String,
}

/// Query parameters for /api/images/extract
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ExtractQuery {
    /// auto (default), direct or grid
    #[serde(default)]
    pub mode: Option<ExtractMode>,
    /// Smallest cell size to look for (default from config)
    #[serde(default)]
    pub min_cell_size: Option<usize>,
    /// Largest cell size to look for (default from config)
    #[serde(default)]
    pub max_cell_size: Option<usize>,
}

/// Logical pixel grid of an image
#[derive(Debug, Serialize, ToSchema)]
pub struct ExtractResponse {
    /// Grid columns
    pub width: usize,
    /// Grid rows
    pub height: usize,
    /// Row-major logical pixels
    pub grid: Vec<Vec<RgbValue>>,
    /// Mode actually used: "grid" or "direct"
    pub mode: ExtractMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid_info: Option<GridInfoResponse>,
}

/// Upload and validate an image
///
/// The request body is the raw image file (PNG, JPEG, GIF, ...).
#[utoipa::path(
    post,
    path = "/api/images/upload",
    request_body(content = Vec<u8>, content_type = "application/octet-stream", description = "Raw image file"),
    responses(
        (status = 200, description = "Image accepted", body = UploadResponse),
        (status = 400, description = "Invalid image, file too large or image too large"),
    ),
    tag = "Images"
)]
pub async fn handle_upload(
    State(images): State<Arc<ImageService>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<UploadResponse>, ApiError> {
    let bytes = read_body(&images, body)?;

    let decoded = run_blocking(move || images.decode(&bytes)).await??;
    let (width, height) = (decoded.image.width(), decoded.image.height());

    tracing::info!(
        width,
        height,
        format = %decoded.format,
        image_hash = %decoded.hash,
        "Image uploaded"
    );

    Ok(Json(UploadResponse {
        success: true,
        width,
        height,
        format: decoded.format,
        message: format!("Image uploaded successfully: {width}x{height}"),
        image_hash: decoded.hash,
    }))
}

/// Extract the logical pixel grid of an image
///
/// In `auto` mode the grid is detected and, when none is found, every source
/// pixel becomes one logical pixel. `grid` mode fails with 422 instead.
#[utoipa::path(
    post,
    path = "/api/images/extract",
    request_body(content = Vec<u8>, content_type = "application/octet-stream", description = "Raw image file"),
    params(ExtractQuery),
    responses(
        (status = 200, description = "Logical pixel grid", body = ExtractResponse),
        (status = 400, description = "Invalid image or parameters, or grid too large"),
        (status = 422, description = "Grid mode requested but no grid detected"),
    ),
    tag = "Images"
)]
pub async fn handle_extract(
    State(images): State<Arc<ImageService>>,
    query: Result<Query<ExtractQuery>, QueryRejection>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<ExtractResponse>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let bytes = read_body(&images, body)?;

    let defaults = ExtractOptions::from_config(images.grid_config());
    let options = ExtractOptions {
        mode: query.mode.unwrap_or(defaults.mode),
        min_cell_size: query.min_cell_size.unwrap_or(defaults.min_cell_size),
        max_cell_size: query.max_cell_size.unwrap_or(defaults.max_cell_size),
    };

    tracing::info!(
        mode = %options.mode,
        min_cell_size = options.min_cell_size,
        max_cell_size = options.max_cell_size,
        size = bytes.len(),
        "Extract request received"
    );

    let extraction = run_blocking(move || {
        let decoded = images.decode(&bytes)?;
        images.extract(&decoded.image, &options)
    })
    .await??;

    let grid = extraction
        .grid
        .rows()
        .map(|row| row.iter().copied().map(RgbValue::from).collect())
        .collect();

    Ok(Json(ExtractResponse {
        width: extraction.grid.width,
        height: extraction.grid.height,
        grid,
        mode: extraction.mode,
        grid_info: extraction.grid_info.map(GridInfoResponse::from),
    }))
}

/// Unwrap the request body, reporting oversized bodies like any other
/// oversized upload.
fn read_body(
    images: &ImageService,
    body: Result<Bytes, BytesRejection>,
) -> Result<Bytes, ApiError> {
    body.map_err(|e| {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            tracing::warn!(max = images.upload_config().max_bytes, "Upload exceeds byte limit");
            ApiError::BadRequest(format!(
                "Image file too large (max {} bytes)",
                images.upload_config().max_bytes
            ))
        } else {
            ApiError::BadRequest(e.body_text())
        }
    })
}

/// Run CPU-bound image work on the blocking pool.
async fn run_blocking<T, F>(f: F) -> Result<Result<T, ImageServiceError>, ApiError>
where
    F: FnOnce() -> Result<T, ImageServiceError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ApiError::Internal(format!("Task error: {e}")))
}
