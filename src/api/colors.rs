use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::Json,
};
use pixel_grid::{ColorMatcher, DistanceMethod};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::models::{AppConfig, BeadColor, BeadMatch};
use crate::services::PaletteStore;

/// Request body for color matching
#[derive(Debug, Deserialize, ToSchema)]
pub struct MatchRequest {
    /// Query colors as `#RRGGBB` or `RRGGBB`
    pub colors: Vec<String>,
    /// "lab" (default) or "rgb"
    #[serde(default)]
    pub method: Option<String>,
    /// Restrict matching to these bead ids
    #[serde(default)]
    pub candidate_ids: Option<Vec<String>>,
}

/// Matches for every well-formed query color
#[derive(Debug, Serialize, ToSchema)]
pub struct MatchResponse {
    pub matches: Vec<BeadMatch>,
    /// Method actually used
    pub method: String,
    /// Query colors that could not be parsed
    pub invalid_colors: Vec<String>,
}

/// List all bead colors
#[utoipa::path(
    get,
    path = "/api/colors/perler",
    responses(
        (status = 200, description = "All bead colors in palette order", body = Vec<BeadColor>),
    ),
    tag = "Colors"
)]
pub async fn handle_list_colors(State(palette): State<Arc<PaletteStore>>) -> Json<Vec<BeadColor>> {
    tracing::info!(count = palette.len(), "Returning bead colors");
    Json(palette.colors())
}

/// Get one bead color by id
#[utoipa::path(
    get,
    path = "/api/colors/perler/{color_id}",
    responses(
        (status = 200, description = "Bead color", body = BeadColor),
        (status = 404, description = "Unknown color id"),
    ),
    params(
        ("color_id" = String, Path, description = "Bead id, e.g. 'P01'"),
    ),
    tag = "Colors"
)]
pub async fn handle_get_color(
    State(palette): State<Arc<PaletteStore>>,
    Path(color_id): Path<String>,
) -> Result<Json<BeadColor>, ApiError> {
    match palette.get(&color_id) {
        Some(color) => {
            tracing::info!(color_id = %color_id, "Returning bead color");
            Ok(Json(color))
        }
        None => {
            tracing::warn!(color_id = %color_id, "Color not found");
            Err(ApiError::NotFound(format!("Color {color_id} not found")))
        }
    }
}

/// Match colors to the nearest beads
///
/// Grey-like query colors are steered toward grey beads. Malformed query
/// colors are listed in `invalid_colors` and do not fail the request.
#[utoipa::path(
    post,
    path = "/api/colors/match",
    request_body = MatchRequest,
    responses(
        (status = 200, description = "Nearest bead per query color", body = MatchResponse),
        (status = 400, description = "Unknown method or no candidate colors"),
    ),
    tag = "Colors"
)]
pub async fn handle_match_colors(
    State(config): State<Arc<AppConfig>>,
    State(palette): State<Arc<PaletteStore>>,
    request: Result<Json<MatchRequest>, JsonRejection>,
) -> Result<Json<MatchResponse>, ApiError> {
    let Json(request) = request.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let method = match request.method.as_deref() {
        Some(name) => name.parse::<DistanceMethod>()?,
        None => config.matching.default_method,
    };
    let matcher = ColorMatcher::new(method);

    // Batches can be large, so match on the blocking pool
    let results = tokio::task::spawn_blocking(move || {
        matcher.match_colors(
            &request.colors,
            palette.palette(),
            request.candidate_ids.as_deref(),
        )
    })
    .await
    .map_err(|e| ApiError::Internal(format!("Task error: {e}")))??;

    let mut matches = Vec::with_capacity(results.len());
    let mut invalid_colors = Vec::new();
    for result in results {
        match result {
            Ok(m) => matches.push(BeadMatch::from(m)),
            Err(e) => {
                tracing::debug!(%e, "Skipping invalid query color");
                invalid_colors.push(e.input().to_string());
            }
        }
    }

    tracing::info!(
        method = %method,
        matched = matches.len(),
        invalid = invalid_colors.len(),
        "Matched colors"
    );

    Ok(Json(MatchResponse {
        matches,
        method: method.to_string(),
        invalid_colors,
    }))
}
