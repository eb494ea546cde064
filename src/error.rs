use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pixel_grid::{MatchError, UnknownMethod};
use serde_json::json;
use thiserror::Error;

use crate::services::ImageServiceError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Image(#[from] ImageServiceError),

    #[error("{0}")]
    Match(#[from] MatchError),

    #[error("{0}")]
    UnknownMethod(#[from] UnknownMethod),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Image(ImageServiceError::GridNotDetected) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Image(_) => StatusCode::BAD_REQUEST,
            ApiError::Match(_) => StatusCode::BAD_REQUEST,
            ApiError::UnknownMethod(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "status": status.as_u16(),
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}
