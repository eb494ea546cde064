use axum::response::Json;
use serde::Serialize;
use utoipa::ToSchema;

/// Service banner
#[derive(Debug, Serialize, ToSchema)]
pub struct RootResponse {
    pub message: String,
}

/// Health probe result
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

/// Service banner
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service name", body = RootResponse),
    ),
    tag = "Service"
)]
pub async fn handle_root() -> Json<RootResponse> {
    tracing::info!("Root endpoint accessed");
    Json(RootResponse {
        message: "Beadsprite Helper API".to_string(),
    })
}

/// Liveness probe
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse),
    ),
    tag = "Service"
)]
pub async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
    })
}
