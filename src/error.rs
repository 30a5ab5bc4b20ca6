use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::vision::VisionError;

/// Errors surfaced to HTTP callers as JSON `{ "error": ... }` bodies.
///
/// These only cover failures detected before the response body starts; once
/// streaming has begun, a failure can no longer produce a structured error
/// and instead aborts the connection.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("No image provided")]
    MissingImage,
    #[error("Invalid multipart payload: {0}")]
    InvalidForm(String),
    #[error("{0}")]
    Upstream(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingImage | ApiError::InvalidForm(_) => StatusCode::BAD_REQUEST,
            ApiError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::error!(%status, "request failed: {self}");
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

impl From<VisionError> for ApiError {
    fn from(err: VisionError) -> Self {
        ApiError::Upstream(err.to_string())
    }
}
